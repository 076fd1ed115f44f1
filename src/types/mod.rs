//! Resource types exchanged with the backend.
//!
//! The backend owns these schemas; everything here is deserialization-
//! tolerant (`#[serde(default)]` throughout) so schema additions on the
//! server never break the client.

pub mod account;
pub mod recipe;

pub use account::{Ack, HealthStatus, Preferences, Profile, ProfileDocument};
pub use recipe::{
    AnalysisResult, FeedbackPayload, HistoryEntry, NutritionFacts, Recipe, SavedAck, SavedRecipe,
};
