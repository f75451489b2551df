#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use labellerr_client::transport::{ApiRequest, Transport};
use labellerr_client::{LabellerrClient, Result};
use serde_json::{Value, json};

type Handler = Box<dyn Fn(&ApiRequest) -> Result<Value> + Send + Sync>;

/// In-memory transport that records every request it receives
pub struct MockTransport {
    handler: Handler,
    calls: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new(
        handler: impl Fn(&ApiRequest) -> Result<Value> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|request| request.path).collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        let response = (self.handler)(&request);
        self.calls.lock().unwrap().push(request);
        response
    }
}

pub fn client(transport: &Arc<MockTransport>) -> LabellerrClient {
    LabellerrClient::with_transport("12345", transport.clone())
}

pub fn dataset_body(status_code: u16) -> Value {
    json!({
        "response": {
            "dataset_id": "dataset-image-0a1b2c3d",
            "dataset_name": "cats",
            "data_type": "image",
            "status_code": status_code
        }
    })
}
