//! Client interface for the NutriSnap backend.
//!
//! Developer-friendly goal: keep the public surface small and predictable.
//! Implementation details are split into submodules under `src/client/`.

pub mod batch;
pub mod builder;
pub mod core;
pub mod endpoints;
pub mod request;

pub use batch::{settle, BatchStatus, Settled};
pub use builder::ApiClientBuilder;
pub use core::ApiClient;
pub use endpoints::AccountSnapshot;
pub use request::{ApiRequest, FilePart, RequestBody};
