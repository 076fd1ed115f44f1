use serde::{Deserialize, Serialize};

/// Per-serving nutrition estimate. Values arrive as strings from the model
/// (e.g. `"420"`), so they are kept opaque.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionFacts {
    pub calories_kcal: String,
    pub protein_g: String,
    pub carbs_g: String,
    pub fat_g: String,
}

/// One generated recipe suggestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub servings: String,
    pub ingredients_used: Vec<String>,
    pub additional_ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub nutrition: NutritionFacts,
    pub health_score: String,
    pub health_explanation: String,
    pub diet_tags: Vec<String>,
    pub estimated_time_minutes: String,
    pub youtube_query: String,
}

impl Recipe {
    /// Stable dedupe key for a recipe, matching how the product decides
    /// whether a suggestion is already saved.
    pub fn dedupe_key(&self) -> String {
        format!(
            "{}::{}::{}",
            if self.name.is_empty() { "recipe" } else { &self.name },
            self.estimated_time_minutes,
            self.ingredients_used.join("|"),
        )
    }
}

/// Result of a food-photo analysis.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub detected_ingredients: Vec<String>,
    pub recipes: Vec<Recipe>,
    pub ranking: Vec<String>,
}

/// A stored recipe, as listed by `GET saved-recipes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SavedRecipe {
    pub id: String,
    pub saved_at: serde_json::Value,
    #[serde(flatten)]
    pub recipe: Recipe,
}

/// Acknowledgement of `POST saved-recipes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SavedAck {
    pub id: String,
    pub message: String,
}

/// One past analysis, as listed by `GET food-history`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    pub id: String,
    pub detected_ingredients: Vec<String>,
    pub recipes_generated: Vec<String>,
    pub analyzed_at: serde_json::Value,
    pub preferences_used: crate::types::Preferences,
}

/// Payload of `POST feedback`.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackPayload {
    pub recipe_name: String,
    pub feedback_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn analysis_result_decodes_model_output() {
        let value = json!({
            "detected_ingredients": ["tomato", "basil"],
            "recipes": [{
                "name": "Tomato Basil Pasta",
                "ingredients_used": ["tomato", "basil"],
                "estimated_time_minutes": "25",
                "nutrition": {"calories_kcal": "420"}
            }],
            "ranking": ["Tomato Basil Pasta"]
        });
        let result: AnalysisResult = serde_json::from_value(value).unwrap();
        assert_eq!(result.detected_ingredients.len(), 2);
        assert_eq!(result.recipes[0].nutrition.calories_kcal, "420");
        assert!(result.recipes[0].description.is_empty());
    }

    #[test]
    fn saved_recipe_flattens_recipe_fields() {
        let value = json!({
            "id": "doc-1",
            "saved_at": "2026-01-10T12:00:00Z",
            "name": "Salad",
            "ingredients_used": ["lettuce"]
        });
        let saved: SavedRecipe = serde_json::from_value(value).unwrap();
        assert_eq!(saved.id, "doc-1");
        assert_eq!(saved.recipe.name, "Salad");
    }

    #[test]
    fn dedupe_key_is_stable() {
        let mut recipe = Recipe {
            name: "Salad".to_string(),
            estimated_time_minutes: "10".to_string(),
            ingredients_used: vec!["lettuce".to_string(), "tomato".to_string()],
            ..Recipe::default()
        };
        assert_eq!(recipe.dedupe_key(), "Salad::10::lettuce|tomato");
        recipe.name.clear();
        assert!(recipe.dedupe_key().starts_with("recipe::"));
    }
}
