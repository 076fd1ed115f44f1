//! Typed operations over the backend's resource routes.
//!
//! Each method is a thin wrapper: build a descriptor, execute, deserialize.
//! Paths are logical (no deployment prefix); `config` supplies the shapes.

use crate::client::batch::BatchStatus;
use crate::client::core::ApiClient;
use crate::client::request::{ApiRequest, FilePart};
use crate::types::{
    Ack, AnalysisResult, FeedbackPayload, HealthStatus, HistoryEntry, Preferences, Profile,
    ProfileDocument, SavedAck, SavedRecipe,
};
use crate::{Error, Result};
use serde::Serialize;

/// Wrapper shape expected by `PUT profile`.
#[derive(Serialize)]
struct ProfileUpdate<'a> {
    profile: &'a Profile,
}

/// Everything the dashboard needs after sign-in, loaded in parallel.
///
/// Each part is independent: a failed sub-request leaves its field `None`
/// and contributes to `errors`, while the others still populate. `status`
/// distinguishes all/some/none for user-facing messaging.
#[derive(Debug)]
pub struct AccountSnapshot {
    pub profile: Option<ProfileDocument>,
    pub preferences: Option<Preferences>,
    pub saved_recipes: Option<Vec<SavedRecipe>>,
    pub history: Option<Vec<HistoryEntry>>,
    pub errors: Vec<Error>,
    pub status: BatchStatus,
}

impl ApiClient {
    /// `GET test`: backend reachability and configuration health.
    pub async fn health_check(&self) -> Result<HealthStatus> {
        self.execute_as(ApiRequest::get("test")).await
    }

    /// `GET profile`: the signed-in user's document.
    pub async fn get_profile(&self) -> Result<ProfileDocument> {
        self.execute_as(ApiRequest::get("profile").requires_auth(true))
            .await
    }

    /// `PUT profile`: merge profile fields into the user document.
    pub async fn update_profile(&self, profile: &Profile) -> Result<Ack> {
        self.execute_as(
            ApiRequest::put("profile")
                .requires_auth(true)
                .json_body(&ProfileUpdate { profile })?,
        )
        .await
    }

    /// `GET preferences`: current preferences, backend defaults applied.
    pub async fn get_preferences(&self) -> Result<Preferences> {
        self.execute_as(ApiRequest::get("preferences").requires_auth(true))
            .await
    }

    /// `PUT preferences`: replace the stored preferences.
    pub async fn update_preferences(&self, preferences: &Preferences) -> Result<Ack> {
        self.execute_as(
            ApiRequest::put("preferences")
                .requires_auth(true)
                .json_body(preferences)?,
        )
        .await
    }

    /// `GET saved-recipes`: newest first.
    pub async fn saved_recipes(&self) -> Result<Vec<SavedRecipe>> {
        self.execute_as(ApiRequest::get("saved-recipes").requires_auth(true))
            .await
    }

    /// `POST saved-recipes`: store a recipe, returning its new id.
    pub async fn save_recipe(&self, recipe: &crate::types::Recipe) -> Result<SavedAck> {
        self.execute_as(
            ApiRequest::post("saved-recipes")
                .requires_auth(true)
                .json_body(recipe)?,
        )
        .await
    }

    /// `DELETE saved-recipes/{id}`.
    pub async fn delete_saved_recipe(&self, id: &str) -> Result<Ack> {
        self.execute_as(ApiRequest::delete(format!("saved-recipes/{id}")).requires_auth(true))
            .await
    }

    /// `GET food-history`: past analyses, newest first.
    pub async fn food_history(&self) -> Result<Vec<HistoryEntry>> {
        self.execute_as(ApiRequest::get("food-history").requires_auth(true))
            .await
    }

    /// `POST analyze-food`: multipart image upload.
    ///
    /// Auth is not required: anonymous analysis works, but a session token is
    /// attached when one exists so the backend can record history and apply
    /// stored preferences.
    pub async fn analyze_food(&self, image: FilePart) -> Result<AnalysisResult> {
        self.execute_as(ApiRequest::post("analyze-food").multipart(image))
            .await
    }

    /// `POST feedback`: thumbs up/down on a generated recipe.
    pub async fn submit_feedback(&self, recipe_name: &str, feedback_type: &str) -> Result<Ack> {
        self.execute_as(
            ApiRequest::post("feedback")
                .requires_auth(true)
                .json_body(&FeedbackPayload {
                    recipe_name: recipe_name.to_string(),
                    feedback_type: feedback_type.to_string(),
                })?,
        )
        .await
    }

    /// Load profile, preferences, saved recipes, and history concurrently.
    ///
    /// The token is fetched once and passed as an override to all four calls,
    /// so a slow identity provider is consulted a single time per snapshot.
    /// Fails outright only when no token is obtainable at all; sub-request
    /// failures are aggregated, never fatal.
    pub async fn account_snapshot(&self) -> Result<AccountSnapshot> {
        let token = self
            .tokens
            .fetch_token()
            .await?
            .ok_or(Error::AuthRequired)?;

        let (profile, preferences, saved, history) = tokio::join!(
            self.execute_as::<ProfileDocument>(
                ApiRequest::get("profile")
                    .requires_auth(true)
                    .token_override(&token),
            ),
            self.execute_as::<Preferences>(
                ApiRequest::get("preferences")
                    .requires_auth(true)
                    .token_override(&token),
            ),
            self.execute_as::<Vec<SavedRecipe>>(
                ApiRequest::get("saved-recipes")
                    .requires_auth(true)
                    .token_override(&token),
            ),
            self.execute_as::<Vec<HistoryEntry>>(
                ApiRequest::get("food-history")
                    .requires_auth(true)
                    .token_override(&token),
            ),
        );

        let mut errors = Vec::new();
        let profile = keep(profile, &mut errors);
        let preferences = keep(preferences, &mut errors);
        let saved_recipes = keep(saved, &mut errors);
        let history = keep(history, &mut errors);

        let ok = [
            profile.is_some(),
            preferences.is_some(),
            saved_recipes.is_some(),
            history.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count();

        Ok(AccountSnapshot {
            profile,
            preferences,
            saved_recipes,
            history,
            status: BatchStatus::from_counts(ok, errors.len()),
            errors,
        })
    }
}

fn keep<T>(result: Result<T>, errors: &mut Vec<Error>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}
