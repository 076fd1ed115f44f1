//! # nutrisnap-client
//!
//! Async client SDK for the NutriSnap food-photo analysis backend: upload an
//! image, get detected ingredients and generated recipes back, and manage the
//! signed-in user's profile, preferences, saved recipes, and history.
//!
//! ## Overview
//!
//! The backend's address is ambiguous by design: it may live at an explicitly
//! configured origin, on the current host at the development port, or on a
//! loopback address, and a single logical resource may be served under
//! `/api/...`, under the serverless router prefix `/api/index.py/...`, or
//! unprefixed. The client resolves both dimensions per request by walking a
//! deterministic candidate list, remembers which base answered, and normalizes
//! every failure into one error taxonomy.
//!
//! ## Core behavior
//!
//! - **Fail-fast auth**: operations marked as requiring auth are rejected with
//!   [`Error::AuthRequired`] before any network call when no bearer token can
//!   be resolved from the injected [`TokenProvider`].
//! - **Host + path fallback**: transport failures and 404s advance to the next
//!   candidate; any other response is final.
//! - **Preferred base memory**: the base that last produced a response is
//!   tried first on subsequent calls. Per-instance state, not a global.
//! - **Normalized errors**: failure bodies are parsed leniently (`detail` /
//!   `message` / `"Request failed (<status>)"`); unparsable bodies degrade to
//!   an empty object instead of failing the call.
//! - **Independent batches**: [`settle`] and
//!   [`account_snapshot`](ApiClient::account_snapshot) aggregate parallel
//!   calls so one failed sub-request never blocks the rest.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nutrisnap_client::{ApiClientBuilder, FilePart, StaticTokenProvider};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> nutrisnap_client::Result<()> {
//!     let client = ApiClientBuilder::new()
//!         .base_url("https://nutrisnap.example.com")
//!         .token_provider(Arc::new(StaticTokenProvider::new("id-token")))
//!         .build()?;
//!
//!     let photo = std::fs::read("fridge.jpg")?;
//!     let analysis = client
//!         .analyze_food(FilePart::image("fridge.jpg", "image/jpeg", photo))
//!         .await?;
//!
//!     for recipe in &analysis.recipes {
//!         println!("{} ({} min)", recipe.name, recipe.estimated_time_minutes);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Request execution, builder, typed endpoints, batching |
//! | [`config`] | Candidate bases and path shapes |
//! | [`auth`] | Token provider seam onto the identity provider |
//! | [`transport`] | Single-attempt HTTP execution over reqwest |
//! | [`types`] | Resource schemas (profiles, recipes, history) |

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use auth::{NoSession, StaticTokenProvider, TokenProvider};
pub use client::{
    settle, AccountSnapshot, ApiClient, ApiClientBuilder, ApiRequest, BatchStatus, FilePart,
    RequestBody, Settled,
};
pub use config::ApiConfig;
pub use error::Error;
pub use types::{AnalysisResult, Preferences, Profile, ProfileDocument, Recipe};

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, Error>;
