//! Request descriptors.

use crate::{Error, Result};
use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// Body of an outgoing request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Structured payload, serialized to JSON with
    /// `Content-Type: application/json`.
    Json(serde_json::Value),
    /// Binary file payload, sent as multipart form data. The client sets no
    /// explicit content type; the transport owns the boundary header.
    Multipart(FilePart),
}

/// One file part of a multipart upload, retained as plain data so the form
/// can be rebuilt for every candidate attempt.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl FilePart {
    /// The `image` form field the analysis endpoint expects.
    pub fn image(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            field: "image".to_string(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}

/// Descriptor for one logical backend operation. Built per call site and
/// consumed by [`ApiClient::execute`](crate::ApiClient::execute).
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Logical resource path, without any deployment prefix
    /// (e.g. `"saved-recipes"`, not `"/api/saved-recipes"`).
    pub path: String,
    pub method: Method,
    pub body: Option<RequestBody>,
    /// When true, the request fails with [`Error::AuthRequired`] before any
    /// network call if no token can be resolved.
    pub requires_auth: bool,
    /// Used verbatim instead of asking the token provider.
    pub token_override: Option<String>,
    /// Optional caller-owned cancellation signal.
    pub cancel: Option<CancellationToken>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            requires_auth: false,
            token_override: None,
            cancel: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a structured JSON body.
    pub fn json_body<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(Error::Serialization)?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    /// Attach a multipart file body.
    pub fn multipart(mut self, part: FilePart) -> Self {
        self.body = Some(RequestBody::Multipart(part));
        self
    }

    pub fn requires_auth(mut self, required: bool) -> Self {
        self.requires_auth = required;
        self
    }

    pub fn token_override(mut self, token: impl Into<String>) -> Self {
        self.token_override = Some(token.into());
        self
    }

    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}
