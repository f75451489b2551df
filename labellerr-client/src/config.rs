//! Client configuration
//!
//! Credentials, endpoint, and HTTP tuning for a [`crate::LabellerrClient`].

use std::time::Duration;

use crate::error::{ClientError, Result};
use crate::transport::RetryPolicy;

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.labellerr.com";

/// Origin header value the API expects from SDK traffic
pub const DEFAULT_ORIGIN: &str = "https://pro.labellerr.com";

/// Client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the Labellerr API
    pub base_url: String,

    pub api_key: String,

    pub api_secret: String,

    /// Workspace (client) the requests act on
    pub client_id: String,

    /// Value of the `Origin` header
    pub origin: String,

    /// Per-request timeout applied by the HTTP client
    pub request_timeout: Duration,

    /// Retries of rate-limited, unavailable, or unreachable requests
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Creates a new configuration with defaults
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            client_id: client_id.into(),
            origin: DEFAULT_ORIGIN.to_string(),
            request_timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - LABELLERR_API_KEY (required)
    /// - LABELLERR_API_SECRET (required)
    /// - LABELLERR_CLIENT_ID (required)
    /// - LABELLERR_BASE_URL (optional, default: https://api.labellerr.com)
    /// - LABELLERR_REQUEST_TIMEOUT (optional, seconds, default: 60)
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name)
                .map_err(|_| ClientError::Config(format!("{} environment variable not set", name)))
        };

        let mut config = Self::new(
            var("LABELLERR_API_KEY")?,
            var("LABELLERR_API_SECRET")?,
            var("LABELLERR_CLIENT_ID")?,
        );

        if let Ok(base_url) = std::env::var("LABELLERR_BASE_URL") {
            config.base_url = base_url;
        }

        if let Some(timeout) = std::env::var("LABELLERR_REQUEST_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.request_timeout = Duration::from_secs(timeout);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("api_key", &self.api_key),
            ("api_secret", &self.api_secret),
            ("client_id", &self.client_id),
        ] {
            if value.trim().is_empty() {
                return Err(ClientError::Config(format!("{} cannot be empty", name)));
            }
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::Config(
                "base_url must start with http:// or https://".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(ClientError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("origin", &self.origin)
            .field("request_timeout", &self.request_timeout)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
