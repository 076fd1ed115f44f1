use crate::auth::TokenProvider;
use crate::client::request::ApiRequest;
use crate::config::{ApiConfig, CandidateUrl};
use crate::transport::{HttpTransport, TransportError};
use crate::{Error, Result};
use arc_swap::ArcSwapOption;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Client for the NutriSnap backend API.
///
/// Owns the transport, the token provider seam, and the per-instance
/// "preferred base" memory. The preferred base is an opportunistic hint
/// (last candidate that produced a response), not authoritative state:
/// updates are last-writer-wins and a stale value only costs one extra
/// failover on the next call.
pub struct ApiClient {
    pub(crate) config: ApiConfig,
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) tokens: Arc<dyn TokenProvider>,
    preferred_base: ArcSwapOption<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("preferred_base", &self.preferred_base.load_full())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Client with environment-derived configuration and no session.
    pub fn from_env() -> Result<Self> {
        crate::client::builder::ApiClientBuilder::new().build()
    }

    pub(crate) fn from_parts(
        config: ApiConfig,
        transport: Arc<HttpTransport>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            config,
            transport,
            tokens,
            preferred_base: ArcSwapOption::empty(),
        }
    }

    /// The most recently successful base origin, if any candidate has
    /// produced a response yet.
    pub fn preferred_base(&self) -> Option<String> {
        self.preferred_base.load_full().map(|b| (*b).clone())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Execute one logical operation: resolve a token, gate on the auth
    /// requirement, walk the candidate URL list, and normalize the outcome.
    ///
    /// Candidate walk rules:
    /// - transport failure (no response): record and try the next candidate;
    /// - 404: record and try the next candidate (path-shape ambiguity);
    /// - any other response, success or failure: final, stop iterating.
    pub async fn execute(&self, req: ApiRequest) -> Result<serde_json::Value> {
        let token = self.resolve_token(&req).await?;
        if req.requires_auth && token.is_none() {
            return Err(Error::AuthRequired);
        }

        let preferred = self.preferred_base();
        let candidates = self.config.candidate_urls(preferred.as_deref(), &req.path);
        let client_request_id = Uuid::new_v4().to_string();

        let mut last_transport: Option<TransportError> = None;
        let mut saw_not_found = false;
        let mut outcome: Option<(String, reqwest::Response)> = None;

        for CandidateUrl { base, url } in &candidates {
            let attempt = self.transport.execute(
                &req.method,
                url,
                token.as_deref(),
                req.body.as_ref(),
                &client_request_id,
            );

            let result = match &req.cancel {
                Some(cancel) => tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(Error::Cancelled),
                    result = attempt => result,
                },
                None => attempt.await,
            };

            match result {
                Ok(resp) if resp.status() == StatusCode::NOT_FOUND => {
                    debug!(url = url.as_str(), "candidate answered 404, trying next shape");
                    saw_not_found = true;
                }
                Ok(resp) => {
                    outcome = Some((base.clone(), resp));
                    break;
                }
                Err(e) => {
                    debug!(url = url.as_str(), error = %e, "candidate unreachable");
                    last_transport = Some(e);
                }
            }
        }

        let (base, resp) = match outcome {
            Some(hit) => hit,
            None if saw_not_found => {
                let attempted: Vec<String> =
                    candidates.iter().map(|c| c.url.clone()).collect();
                return Err(Error::not_found_exhausted(&attempted));
            }
            None => {
                // Candidates are host-major, so consecutive duplicates are
                // the same base under different shapes.
                let mut attempted: Vec<String> =
                    candidates.iter().map(|c| c.base.clone()).collect();
                attempted.dedup();
                return Err(Error::Unreachable {
                    attempted,
                    last_error: last_transport.map(|e| e.to_string()),
                });
            }
        };

        if preferred.as_deref() != Some(base.as_str()) {
            debug!(
                base = base.as_str(),
                request_id = client_request_id.as_str(),
                "adopting responding base as preferred"
            );
            self.preferred_base.store(Some(Arc::new(base)));
        }

        let status = resp.status();
        // A body that fails to read or parse is treated as empty rather than
        // failing the whole call; the status still decides the outcome.
        let text = resp.text().await.unwrap_or_default();
        let data: serde_json::Value =
            serde_json::from_str(&text).unwrap_or_else(|_| serde_json::json!({}));

        if !status.is_success() {
            debug!(
                http_status = status.as_u16(),
                path = req.path.as_str(),
                request_id = client_request_id.as_str(),
                "request failed"
            );
            return Err(Error::http_from_body(status.as_u16(), &data));
        }

        Ok(data)
    }

    /// Execute and deserialize the success payload.
    pub async fn execute_as<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T> {
        let value = self.execute(req).await?;
        serde_json::from_value(value).map_err(Error::Serialization)
    }

    /// Token resolution order: explicit override, else a fresh token from
    /// the provider when the operation requires auth or a session exists.
    async fn resolve_token(&self, req: &ApiRequest) -> Result<Option<String>> {
        if let Some(token) = &req.token_override {
            return Ok(Some(token.clone()));
        }
        if req.requires_auth || self.tokens.session_active().await {
            return self.tokens.fetch_token().await;
        }
        Ok(None)
    }
}
