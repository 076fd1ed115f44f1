//! Endpoint configuration: candidate bases and path shapes.
//!
//! The backend may live at an explicitly configured origin, on the current
//! host at the development port, or on a loopback address; and a single
//! logical resource may be served under `/api/...`, under the serverless
//! router prefix `/api/index.py/...`, or unprefixed. Both dimensions are
//! plain configuration here; the trial logic lives in `client::core`.

use crate::{Error, Result};
use std::collections::HashSet;
use std::env;
use std::time::Duration;
use url::Url;

/// Port the development backend listens on.
pub const DEV_PORT: u16 = 8000;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A single URL the client may try for one logical request, together with
/// the base it was derived from (the base is what gets remembered as
/// preferred when the attempt produces a response).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUrl {
    pub base: String,
    pub url: String,
}

/// Static endpoint configuration for an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// The configured primary origin, tried first on a fresh client.
    pub primary_base: String,
    /// Additional origins tried when earlier candidates are unreachable.
    pub fallback_bases: Vec<String>,
    /// Path prefixes a logical resource may be served under, in trial order.
    /// An empty string means "no prefix".
    pub path_shapes: Vec<String>,
    /// Transport-level timeout per attempt.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Configuration rooted at an explicit primary origin, with the standard
    /// loopback fallbacks and path shapes.
    pub fn new(primary_base: impl Into<String>) -> Self {
        Self {
            primary_base: trim_base(&primary_base.into()),
            fallback_bases: default_fallbacks(),
            path_shapes: default_path_shapes(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Configuration from the environment: `NUTRISNAP_API_BASE` for the
    /// primary origin (loopback default when unset) and
    /// `NUTRISNAP_HTTP_TIMEOUT_SECS` for the per-attempt timeout.
    pub fn from_env() -> Self {
        let primary = env::var("NUTRISNAP_API_BASE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("http://localhost:{DEV_PORT}"));

        let timeout_secs = env::var("NUTRISNAP_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let mut config = Self::new(primary);
        config.timeout = Duration::from_secs(timeout_secs);
        config
    }

    /// Derive the "same host, dev port" fallback used when the embedding
    /// application knows which hostname it is being served from.
    pub fn host_guess(hostname: &str) -> String {
        format!("http://{hostname}:{DEV_PORT}")
    }

    /// Check that every configured base is an absolute http(s) origin with a
    /// host. Run once at build time so a typo in configuration fails the
    /// constructor instead of burning a candidate slot on every request.
    pub(crate) fn validate_bases(&self) -> Result<()> {
        for base in self.bases() {
            let parsed = Url::parse(&base)
                .map_err(|e| Error::Configuration(format!("invalid base URL `{base}`: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::Configuration(format!(
                    "unsupported scheme `{}` in base URL `{base}`",
                    parsed.scheme()
                )));
            }
            if parsed.host_str().is_none() {
                return Err(Error::Configuration(format!(
                    "base URL `{base}` has no host"
                )));
            }
        }
        Ok(())
    }

    /// Ordered, deduplicated base origins: primary first, then fallbacks.
    pub fn bases(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        std::iter::once(self.primary_base.clone())
            .chain(self.fallback_bases.iter().map(|b| trim_base(b)))
            .filter(|b| !b.is_empty() && seen.insert(b.clone()))
            .collect()
    }

    /// The flattened candidate list for one logical path: the full
    /// host x path-shape cross-product, host-major, with `preferred` (when it
    /// is still a configured base) moved to the front. Deduplicated,
    /// order-preserving, never empty for a non-empty base set.
    pub fn candidate_urls(&self, preferred: Option<&str>, path: &str) -> Vec<CandidateUrl> {
        let mut bases = self.bases();
        if let Some(preferred) = preferred {
            if let Some(pos) = bases.iter().position(|b| b == preferred) {
                let hit = bases.remove(pos);
                bases.insert(0, hit);
            }
        }

        let clean_path = path.trim_start_matches('/');
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(bases.len() * self.path_shapes.len());
        for base in &bases {
            for shape in &self.path_shapes {
                let url = join_url(base, shape, clean_path);
                if seen.insert(url.clone()) {
                    out.push(CandidateUrl {
                        base: base.clone(),
                        url,
                    });
                }
            }
        }
        out
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn default_fallbacks() -> Vec<String> {
    vec![
        format!("http://localhost:{DEV_PORT}"),
        format!("http://127.0.0.1:{DEV_PORT}"),
    ]
}

fn default_path_shapes() -> Vec<String> {
    vec![
        "api".to_string(),
        "api/index.py".to_string(),
        String::new(),
    ]
}

fn trim_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

fn join_url(base: &str, shape: &str, clean_path: &str) -> String {
    let shape = shape.trim_matches('/');
    if shape.is_empty() {
        format!("{base}/{clean_path}")
    } else {
        format!("{base}/{shape}/{clean_path}")
    }
}
