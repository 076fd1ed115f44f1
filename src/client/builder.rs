use crate::auth::TokenProvider;
use crate::client::core::ApiClient;
use crate::config::ApiConfig;
use crate::transport::HttpTransport;
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Keep this surface area small and predictable (developer-friendly).
pub struct ApiClientBuilder {
    base_url: Option<String>,
    extra_bases: Vec<String>,
    replace_fallbacks: Option<Vec<String>>,
    path_shapes: Option<Vec<String>>,
    timeout: Option<Duration>,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            extra_bases: Vec::new(),
            replace_fallbacks: None,
            path_shapes: None,
            timeout: None,
            tokens: crate::auth::no_session(),
        }
    }

    /// Set the primary base origin. Defaults to `NUTRISNAP_API_BASE` or the
    /// loopback dev server when unset.
    pub fn base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = Some(base.into());
        self
    }

    /// Append an additional fallback origin, tried after the defaults.
    pub fn extra_base(mut self, base: impl Into<String>) -> Self {
        self.extra_bases.push(base.into());
        self
    }

    /// Replace the default loopback fallbacks entirely. An empty list pins
    /// the client to the primary base alone.
    pub fn fallback_bases(mut self, bases: Vec<String>) -> Self {
        self.replace_fallbacks = Some(bases);
        self
    }

    /// Add the "same host, dev port" fallback for the given hostname.
    /// Embedders that know which host serves the frontend use this to reach
    /// a co-located dev backend.
    pub fn host_hint(mut self, hostname: &str) -> Self {
        self.extra_bases.push(ApiConfig::host_guess(hostname));
        self
    }

    /// Replace the path shapes tried for every logical resource.
    ///
    /// This is primarily for testing with mock servers that only serve one
    /// prefix. In production the defaults cover the known deployments.
    pub fn path_shapes(mut self, shapes: Vec<String>) -> Self {
        self.path_shapes = Some(shapes);
        self
    }

    /// Per-attempt transport timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Inject a token provider. Default is the signed-out [`NoSession`]
    /// provider.
    ///
    /// [`NoSession`]: crate::auth::NoSession
    pub fn token_provider(mut self, tokens: Arc<dyn TokenProvider>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient> {
        let mut config = match self.base_url {
            Some(base) => ApiConfig::new(base),
            None => ApiConfig::from_env(),
        };

        if let Some(fallbacks) = self.replace_fallbacks {
            config.fallback_bases = fallbacks;
        }
        config.fallback_bases.extend(self.extra_bases);
        if let Some(shapes) = self.path_shapes {
            config.path_shapes = shapes;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        config.validate_bases()?;

        let transport = Arc::new(HttpTransport::new(config.timeout)?);
        Ok(ApiClient::from_parts(config, transport, self.tokens))
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
