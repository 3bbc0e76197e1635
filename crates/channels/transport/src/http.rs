//! Transport implementation using reqwest.

use channels_core::TransportError;
use color_eyre::eyre::WrapErr as _;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::{Credentials, HttpRequest, HttpResponse, Method, Transport, TransportConfig};

/// HTTP transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    credentials: Option<Credentials>,
}

impl ReqwestTransport {
    /// Create a transport from configuration.
    pub fn new(config: &TransportConfig) -> color_eyre::eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .wrap_err("failed to build HTTP client")?;

        Ok(Self {
            client,
            credentials: config.credentials.clone(),
        })
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .header(ACCEPT, "application/json");

        if let Some(creds) = &self.credentials {
            builder = builder.basic_auth(&creds.api_key, Some(&creds.secret_key));
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(transport_error)?;

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            status,
            "response received"
        );

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

fn transport_error(e: reqwest::Error) -> TransportError {
    let timeout = e.is_timeout();
    let err = TransportError::with_source(format!("HTTP request failed: {e}"), e);
    if timeout { err.timed_out() } else { err }
}
