//! Configuration module
//!
//! Resolves CLI flags into a configured API client.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use labellerr_client::{ClientConfig, LabellerrClient};
use tracing::debug;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Labellerr API
    pub base_url: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub client_id: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Build the client configuration, failing on missing credentials
    pub fn client_config(&self) -> Result<ClientConfig> {
        let (Some(api_key), Some(api_secret), Some(client_id)) =
            (&self.api_key, &self.api_secret, &self.client_id)
        else {
            bail!(
                "Missing credentials: pass --api-key, --api-secret and --client-id \
                 or set LABELLERR_API_KEY, LABELLERR_API_SECRET and LABELLERR_CLIENT_ID"
            );
        };

        Ok(ClientConfig::new(api_key, api_secret, client_id)
            .with_base_url(&self.base_url)
            .with_request_timeout(Duration::from_secs(self.request_timeout)))
    }

    /// Create an API client from this configuration
    pub fn client(&self) -> Result<LabellerrClient> {
        let config = self.client_config()?;
        debug!(
            "Using Labellerr API at {} (client {})",
            config.base_url, config.client_id
        );
        LabellerrClient::new(config).context("Failed to initialize Labellerr client")
    }
}
