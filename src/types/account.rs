use serde::{Deserialize, Serialize};

/// Dietary and lifestyle preferences driving recipe generation.
///
/// Defaults mirror the backend's `DEFAULT_PREFERENCES`, so a fresh account
/// round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub health_goal: String,
    pub diet_type: String,
    pub allergies: String,
    pub cooking_time: String,
    pub cuisine_preferences: String,
    pub calorie_target: String,
    pub fitness_goal: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            health_goal: "balanced".to_string(),
            diet_type: "non-vegetarian".to_string(),
            allergies: "none".to_string(),
            cooking_time: "moderate".to_string(),
            cuisine_preferences: "any".to_string(),
            calorie_target: "not specified".to_string(),
            fitness_goal: "general health".to_string(),
        }
    }
}

/// Free-form account profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub full_name: String,
    pub age: String,
    pub city: String,
    pub notes: String,
}

/// The user document returned by `GET profile`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDocument {
    pub uid: String,
    pub profile: Profile,
    pub preferences: Preferences,
}

/// Generic mutation acknowledgement (`{"message": ...}`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Ack {
    pub message: String,
}

/// Response of the `test` health-check route.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub detail: Option<String>,
}

impl HealthStatus {
    pub fn is_degraded(&self) -> bool {
        self.status == "degraded"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_default_matches_backend_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.health_goal, "balanced");
        assert_eq!(prefs.diet_type, "non-vegetarian");
        assert_eq!(prefs.calorie_target, "not specified");
    }

    #[test]
    fn profile_document_tolerates_missing_fields() {
        let doc: ProfileDocument = serde_json::from_str(r#"{"uid": "u1"}"#).unwrap();
        assert_eq!(doc.uid, "u1");
        assert_eq!(doc.preferences, Preferences::default());
        assert_eq!(doc.profile, Profile::default());
    }

    #[test]
    fn health_status_decodes_plain_backend_shape() {
        // The bare dev backend returns only a message.
        let hs: HealthStatus =
            serde_json::from_str(r#"{"message": "Hello from the FastAPI backend!"}"#).unwrap();
        assert!(!hs.is_degraded());
        assert!(hs.detail.is_none());
    }
}
