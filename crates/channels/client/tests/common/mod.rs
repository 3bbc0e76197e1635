#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use channels_transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// Transport that records requests and replays scripted responses in order.
#[derive(Clone, Default)]
pub struct FakeTransport {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
}

impl FakeTransport {
    pub fn respond(&self, status: u16, content_type: Option<&str>, body: &str) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            content_type: content_type.map(str::to_string),
            body: bytes::Bytes::from(body.to_string()),
        }));
        self
    }

    pub fn respond_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.respond(status, Some("application/json"), &body.to_string())
    }

    pub fn fail(&self, error: TransportError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no scripted response")))
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
