//! Labellerr HTTP Client
//!
//! A typed client for the Labellerr data-labeling platform.
//!
//! Endpoint methods are grouped by resource (datasets, templates, projects,
//! exports, pre-annotations). Long-running operations are tracked with the
//! [`poll`] module, either blocking the caller ([`poll::Poller::run`]) or on a
//! background task ([`poll::JobHandle`]). [`LabellerrClient::create_project_with_dataset`]
//! chains dataset creation, upload, template creation, and project creation.
//!
//! # Example
//!
//! ```no_run
//! use labellerr_client::{ClientConfig, LabellerrClient};
//! use labellerr_client::poll::PollConfig;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = LabellerrClient::new(ClientConfig::from_env()?)?;
//!
//!     let config = PollConfig::new(Duration::from_secs(5)).with_timeout(Duration::from_secs(60));
//!     let dataset = client.wait_for_dataset("dataset-image-1a2b3c4d", config).await?;
//!
//!     println!("Dataset ready: {}", dataset.name);
//!     Ok(())
//! }
//! ```

pub mod config;
mod datasets;
pub mod error;
mod exports;
pub mod poll;
mod preannotations;
mod projects;
mod templates;
pub mod transport;
mod uploads;
pub mod workflow;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use exports::Export;
pub use poll::{JobHandle, PollConfig, PollError, Poller};
pub use uploads::{LocalFile, UploadSummary, collect_files};
pub use workflow::{CreatedProject, WorkflowError, WorkflowOptions, WorkflowStep};

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use transport::{ApiRequest, HttpTransport, RetryTransport, Transport};

/// Result of a poll loop driven by this client
pub type PollResult<T> = std::result::Result<T, PollError<ClientError>>;

/// Client for the Labellerr API
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Clone)]
pub struct LabellerrClient {
    /// Workspace every request acts on
    client_id: String,
    transport: Arc<dyn Transport>,
}

impl LabellerrClient {
    /// Create a client that talks to the API over HTTPS
    ///
    /// # Arguments
    /// * `config` - Credentials and endpoint; validated before use
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpTransport::new(&config)?;
        let transport = RetryTransport::new(Arc::new(http), config.retry);
        Ok(Self::with_transport(config.client_id, Arc::new(transport)))
    }

    /// Create a client over a custom transport
    ///
    /// # Arguments
    /// * `client_id` - Workspace the requests act on
    /// * `transport` - Executes the requests
    pub fn with_transport(client_id: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            client_id: client_id.into(),
            transport,
        }
    }

    /// The same client acting on another workspace
    pub fn for_client(&self, client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            transport: Arc::clone(&self.transport),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    // =============================================================================
    // Request Dispatch
    // =============================================================================

    /// Execute a request and return the raw JSON body
    async fn send(&self, mut request: ApiRequest) -> Result<Value> {
        request.client_id = self.client_id.clone();
        let body = self.transport.execute(request).await?;

        // Some endpoints return their JSON document encoded as a string
        match body {
            Value::String(text) => serde_json::from_str(&text).map_err(|e| {
                ClientError::ParseError(format!("Failed to parse JSON response: {}", e))
            }),
            other => Ok(other),
        }
    }

    /// Execute a request and deserialize the whole body
    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let body = self.send(request).await?;
        decode(body)
    }

    /// Execute a request and deserialize the `response` envelope of the body
    async fn call_response<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let mut body = self.send(request).await?;
        match body.get_mut("response").map(Value::take) {
            Some(Value::Null) | None => Err(ClientError::ParseError(
                "Response body has no `response` field".to_string(),
            )),
            Some(inner) => decode(inner),
        }
    }
}

impl std::fmt::Debug for LabellerrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabellerrClient")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| ClientError::ParseError(format!("Unexpected response shape: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct Fixed(Value);

    #[async_trait]
    impl Transport for Fixed {
        async fn execute(&self, request: ApiRequest) -> Result<Value> {
            assert_eq!(request.client_id, "12345");
            Ok(self.0.clone())
        }
    }

    fn client(body: Value) -> LabellerrClient {
        LabellerrClient::with_transport("12345", Arc::new(Fixed(body)))
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ClientConfig::new("", "secret", "12345");
        assert!(matches!(
            LabellerrClient::new(config),
            Err(ClientError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_response_envelope() {
        let value: Value = client(json!({ "response": { "template_id": "t-1" } }))
            .call_response(ApiRequest::get("/annotations/get_template"))
            .await
            .unwrap();
        assert_eq!(value["template_id"], "t-1");

        let err = client(json!({ "message": "ok" }))
            .call_response::<Value>(ApiRequest::get("/annotations/get_template"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_string_encoded_body_is_parsed() {
        let value: Value = client(json!("{\"status\": []}"))
            .call(ApiRequest::post("/exports/status"))
            .await
            .unwrap();
        assert_eq!(value, json!({ "status": [] }));
    }
}
