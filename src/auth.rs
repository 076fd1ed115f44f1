//! Token acquisition seam.
//!
//! The client never authenticates users itself; it consumes bearer tokens
//! from an external identity provider through the [`TokenProvider`] trait.
//! Tokens are fetched fresh per request and never cached by the client, so
//! a provider backed by a session store (e.g. a Firebase auth wrapper) stays
//! the single source of truth for freshness.

use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Capability interface onto the external identity provider.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Whether a user session currently exists. When true, tokens are
    /// attached even to operations that do not strictly require them.
    async fn session_active(&self) -> bool;

    /// Fetch a fresh bearer token for the current session, or `None` when
    /// no session exists.
    async fn fetch_token(&self) -> Result<Option<String>>;
}

/// Provider for the signed-out state: no session, no tokens.
pub struct NoSession;

#[async_trait]
impl TokenProvider for NoSession {
    async fn session_active(&self) -> bool {
        false
    }

    async fn fetch_token(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Provider holding a fixed bearer string. Useful for service accounts and
/// as the test double.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn session_active(&self) -> bool {
        true
    }

    async fn fetch_token(&self) -> Result<Option<String>> {
        Ok(Some(self.token.clone()))
    }
}

/// The default signed-out provider.
pub fn no_session() -> Arc<dyn TokenProvider> {
    Arc::new(NoSession)
}
