use thiserror::Error;

/// Unified error type for the NutriSnap client.
///
/// Every failure a caller can observe is normalized into one of these
/// categories; the client itself never prints or displays messages, it only
/// returns them. UI layers decide how (and whether) to surface each variant.
#[derive(Debug, Error)]
pub enum Error {
    /// The operation requires a signed-in user and no bearer token could be
    /// resolved. Raised before any network call is made.
    #[error("Please sign in to continue.")]
    AuthRequired,

    /// Every candidate endpoint failed at the transport level (DNS,
    /// connection refused, timeout) and no HTTP response was received.
    #[error("{}", unreachable_message(.last_error, .attempted))]
    Unreachable {
        /// Base URLs that were attempted, in trial order.
        attempted: Vec<String>,
        /// Message of the last transport-level error, if any.
        last_error: Option<String>,
    },

    /// A response was received but carried a failure status. The message is
    /// extracted from the body's `detail` or `message` field when present.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The caller's cancellation token fired while the request was in flight.
    #[error("Request cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),
}

fn unreachable_message(last_error: &Option<String>, attempted: &[String]) -> String {
    match last_error {
        Some(msg) => msg.clone(),
        None => format!(
            "Failed to fetch. Backend unreachable (tried: {}).",
            attempted.join(" | ")
        ),
    }
}

impl Error {
    /// Build an `Http` error from a status code and an already-parsed body,
    /// preferring the backend's `detail`/`message` fields over the generic
    /// status-based fallback.
    pub(crate) fn http_from_body(status: u16, body: &serde_json::Value) -> Self {
        let message = body
            .get("detail")
            .and_then(|v| v.as_str())
            .or_else(|| body.get("message").and_then(|v| v.as_str()))
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("Request failed ({status})"));
        Error::Http { status, message }
    }

    /// Build the terminal 404 error raised when every path shape of every
    /// candidate base answered 404. Names each attempted URL so deployment
    /// misconfigurations are diagnosable from the message alone.
    pub(crate) fn not_found_exhausted(attempted: &[String]) -> Self {
        Error::Http {
            status: 404,
            message: format!("Server error: 404 (Tried: {})", attempted.join(" | ")),
        }
    }

    /// HTTP status carried by this error, if it is an `Http` failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_auth_required(&self) -> bool {
        matches!(self, Error::AuthRequired)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn http_message_prefers_detail_over_message() {
        let err = Error::http_from_body(500, &json!({"detail": "boom", "message": "other"}));
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn http_message_falls_back_to_message_field() {
        let err = Error::http_from_body(400, &json!({"message": "bad input"}));
        assert_eq!(err.to_string(), "bad input");
    }

    #[test]
    fn http_message_falls_back_to_status() {
        let err = Error::http_from_body(500, &json!({}));
        assert_eq!(err.to_string(), "Request failed (500)");
    }

    #[test]
    fn not_found_exhausted_names_every_attempt() {
        let err = Error::not_found_exhausted(&[
            "http://a/api/profile".to_string(),
            "http://a/profile".to_string(),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("http://a/api/profile"));
        assert!(msg.contains("http://a/profile"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn unreachable_surfaces_last_transport_error() {
        let err = Error::Unreachable {
            attempted: vec!["http://localhost:8000".to_string()],
            last_error: Some("connection refused".to_string()),
        };
        assert_eq!(err.to_string(), "connection refused");
    }
}
