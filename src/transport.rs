//! HTTP transport layer.
//!
//! A thin wrapper over `reqwest` that executes exactly one attempt against
//! one fully-resolved URL. Candidate iteration, auth gating, and error
//! normalization live in `client::core`.

pub mod http;

pub use http::HttpTransport;

/// Transport-level failure: the request never produced an HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
