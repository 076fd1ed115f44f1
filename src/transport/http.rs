use crate::client::request::{FilePart, RequestBody};
use crate::transport::TransportError;
use reqwest::Method;
use std::env;
use std::time::Duration;

/// Shared `reqwest` client with production-friendly defaults.
///
/// Pool knobs are env-overridable; the per-attempt timeout comes from
/// [`ApiConfig`](crate::ApiConfig).
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let builder = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(
                env::var("NUTRISNAP_HTTP_POOL_MAX_IDLE_PER_HOST")
                    .ok()
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or(8),
            )
            .pool_idle_timeout(Some(Duration::from_secs(
                env::var("NUTRISNAP_HTTP_POOL_IDLE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(90),
            )));

        let client = builder
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Execute one attempt against one fully-resolved URL.
    ///
    /// Returns the raw response for any HTTP exchange that completed,
    /// regardless of status; an `Err` here always means the transport layer
    /// failed before a response was received.
    pub async fn execute(
        &self,
        method: &Method,
        url: &str,
        token: Option<&str>,
        body: Option<&RequestBody>,
        client_request_id: &str,
    ) -> Result<reqwest::Response, TransportError> {
        let mut req = self.client.request(method.clone(), url);

        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        // Correlation id for log linkage; the backend may ignore it.
        req = req.header("x-client-request-id", client_request_id);

        match body {
            // Sets `Content-Type: application/json`.
            Some(RequestBody::Json(value)) => req = req.json(value),
            // No explicit content type here: reqwest supplies the
            // `multipart/form-data; boundary=...` header itself.
            Some(RequestBody::Multipart(part)) => req = req.multipart(build_form(part)?),
            None => {}
        }

        req.send().await.map_err(TransportError::Http)
    }
}

fn build_form(part: &FilePart) -> Result<reqwest::multipart::Form, TransportError> {
    // Forms are single-use in reqwest, so each attempt rebuilds one from the
    // retained bytes.
    let file = reqwest::multipart::Part::bytes(part.data.to_vec())
        .file_name(part.file_name.clone())
        .mime_str(&part.content_type)
        .map_err(|e| TransportError::Other(format!("invalid content type: {e}")))?;
    Ok(reqwest::multipart::Form::new().part(part.field.clone(), file))
}
