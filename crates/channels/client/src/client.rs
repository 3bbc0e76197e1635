//! Push channel operations.

use std::sync::Arc;

use channels_core::{
    ChannelsError, PendingRequest, PushChannel, SubscriptionBody, TransportError, mapper,
};
use channels_transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
use color_eyre::eyre::WrapErr as _;

use crate::{ClientConfig, CreateChannel, Installation};

/// Client for the push channel API.
///
/// Each operation spawns the request on the runtime captured at construction
/// and returns a [`PendingRequest`] right away.
pub struct ChannelsClient<T, I = String> {
    transport: Arc<T>,
    installation: Arc<I>,
    base_url: String,
    runtime: tokio::runtime::Handle,
}

impl ChannelsClient<ReqwestTransport, String> {
    /// Build a client using reqwest and the configured installation id.
    pub fn from_config(config: &ClientConfig) -> color_eyre::eyre::Result<Self> {
        let install_id = config
            .install_id
            .clone()
            .ok_or_else(|| color_eyre::eyre::eyre!("installation ID not configured"))?;
        let transport = ReqwestTransport::new(&config.transport)?;

        Self::new(config.push_url(), transport, install_id)
    }
}

impl<T, I> ChannelsClient<T, I>
where
    T: Transport + 'static,
    I: Installation + 'static,
{
    /// Create a client on the current tokio runtime.
    pub fn new(
        base_url: impl Into<String>,
        transport: T,
        installation: I,
    ) -> color_eyre::eyre::Result<Self> {
        let runtime = tokio::runtime::Handle::try_current()
            .wrap_err("channels client must be created inside a tokio runtime")?;

        Ok(Self::with_runtime(base_url, transport, installation, runtime))
    }

    /// Create a client that spawns requests on `runtime`.
    pub fn with_runtime(
        base_url: impl Into<String>,
        transport: T,
        installation: I,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            transport: Arc::new(transport),
            installation: Arc::new(installation),
            base_url,
            runtime,
        }
    }

    /// List all channels available to, or subscribed by, this installation.
    pub fn list_channels(&self) -> PendingRequest<Vec<PushChannel>> {
        let request = HttpRequest {
            method: Method::Get,
            url: format!("{}/channels", self.install_url()),
            body: None,
        };

        self.issue("list_channels", request, |response| {
            let payload = read_json(response)?;
            let channels = mapper::channels_from_payload(&payload)?;
            tracing::debug!(count = channels.len(), "channels listed");
            Ok(channels)
        })
    }

    /// Create a channel, optionally subscribing this installation to it.
    ///
    /// Resolves with a single-element list holding the created channel.
    pub fn create_channel(&self, options: CreateChannel) -> PendingRequest<Vec<PushChannel>> {
        let body = match encode_body(&options.into_body(|| self.installation.install_id())) {
            Ok(body) => body,
            Err(e) => return failed(e),
        };

        let request = HttpRequest {
            method: Method::Post,
            url: format!("{}/channels", self.base_url),
            body: Some(body),
        };

        self.issue("create_channel", request, |response| {
            let payload = read_json(response)?;
            Ok(vec![mapper::channel_from_payload(&payload)?])
        })
    }

    /// Subscribe this installation to existing channels.
    ///
    /// Duplicate subscriptions are ignored by the server.
    pub fn subscribe<U>(&self, uuids: U) -> PendingRequest<()>
    where
        U: IntoIterator,
        U::Item: Into<String>,
    {
        self.subscription_call("subscribe", Method::Post, collect(uuids))
    }

    /// Unsubscribe this installation from channels.
    pub fn unsubscribe<U>(&self, uuids: U) -> PendingRequest<()>
    where
        U: IntoIterator,
        U::Item: Into<String>,
    {
        self.subscription_call("unsubscribe", Method::Delete, collect(uuids))
    }

    /// Replace the subscription set with exactly `uuids`.
    pub fn set_subscriptions<U>(&self, uuids: U) -> PendingRequest<()>
    where
        U: IntoIterator,
        U::Item: Into<String>,
    {
        self.subscription_call("set_subscriptions", Method::Put, collect(uuids))
    }

    /// Remove every subscription of this installation.
    pub fn clear_subscriptions(&self) -> PendingRequest<()> {
        self.subscription_call("clear_subscriptions", Method::Put, Vec::new())
    }

    fn subscription_call(
        &self,
        operation: &'static str,
        method: Method,
        uuids: Vec<String>,
    ) -> PendingRequest<()> {
        let body = match encode_body(&SubscriptionBody { uuids }) {
            Ok(body) => body,
            Err(e) => return failed(e),
        };

        let request = HttpRequest {
            method,
            url: format!("{}/channels/subscriptions", self.install_url()),
            body: Some(body),
        };

        self.issue(operation, request, |response| check_status(&response))
    }

    fn install_url(&self) -> String {
        let install_id = self.installation.install_id();
        format!(
            "{}/app-installs/{}",
            self.base_url,
            urlencoding::encode(&install_id)
        )
    }

    /// Send `request` in the background and resolve the returned handle with
    /// the mapped response.
    fn issue<R, F>(&self, operation: &'static str, request: HttpRequest, map: F) -> PendingRequest<R>
    where
        R: Send + 'static,
        F: FnOnce(HttpResponse) -> Result<R, ChannelsError> + Send + 'static,
    {
        let pending = PendingRequest::new();
        let delivery = Delivery {
            operation,
            request: pending.clone(),
        };
        let transport = Arc::clone(&self.transport);

        tracing::debug!(
            operation,
            method = %request.method,
            url = %request.url,
            "issuing request"
        );

        self.runtime.spawn(async move {
            let result = match transport.send(request).await {
                Ok(response) => map(response),
                Err(e) => Err(ChannelsError::Transport(e)),
            };

            match &result {
                Ok(_) => tracing::info!(operation, "request succeeded"),
                Err(e) => tracing::warn!(operation, error = %e, "request failed"),
            }

            delivery.request.resolve(result);
        });

        pending
    }
}

impl<T, I> std::fmt::Debug for ChannelsClient<T, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelsClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Delivery side of a [`PendingRequest`] owned by the spawned task.
///
/// Fails the request if the task is dropped before resolving it, which
/// happens when the runtime has shut down or the transport panicked.
struct Delivery<R> {
    operation: &'static str,
    request: PendingRequest<R>,
}

impl<R> Drop for Delivery<R> {
    fn drop(&mut self) {
        if self.request.is_resolved() {
            return;
        }

        tracing::warn!(operation = self.operation, "request aborted before completion");
        self.request.resolve_failure(ChannelsError::Transport(TransportError::new(
            "request aborted before completion",
        )));
    }
}

fn collect<U>(uuids: U) -> Vec<String>
where
    U: IntoIterator,
    U::Item: Into<String>,
{
    uuids.into_iter().map(Into::into).collect()
}

fn encode_body(body: &impl serde::Serialize) -> Result<serde_json::Value, ChannelsError> {
    serde_json::to_value(body)
        .map_err(|e| TransportError::with_source("failed to encode request body", e).into())
}

fn failed<R>(error: ChannelsError) -> PendingRequest<R> {
    let pending = PendingRequest::new();
    pending.resolve_failure(error);
    pending
}

fn check_status(response: &HttpResponse) -> Result<(), ChannelsError> {
    if response.is_success() {
        return Ok(());
    }

    Err(ChannelsError::HttpStatus {
        status: response.status,
        body: response.body_text(),
    })
}

fn read_json(response: HttpResponse) -> Result<serde_json::Value, ChannelsError> {
    check_status(&response)?;

    if !response.is_json() {
        return Err(ChannelsError::UnexpectedContentType(response.content_type));
    }

    serde_json::from_slice(&response.body)
        .map_err(|e| ChannelsError::MalformedResponse(format!("invalid JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&str>, body: &'static str) -> HttpResponse {
        HttpResponse {
            status,
            content_type: content_type.map(str::to_string),
            body: bytes::Bytes::from_static(body.as_bytes()),
        }
    }

    #[test]
    fn test_check_status_keeps_body() {
        let err = check_status(&response(404, Some("text/plain"), "no such channel")).unwrap_err();

        match err {
            ChannelsError::HttpStatus { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body.as_deref(), Some("no such channel"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_json_requires_content_type() {
        let err = read_json(response(200, Some("text/html"), "<html>")).unwrap_err();
        assert!(matches!(
            err,
            ChannelsError::UnexpectedContentType(Some(ref ct)) if ct == "text/html"
        ));
    }

    #[test]
    fn test_read_json_rejects_invalid_json() {
        let err = read_json(response(200, Some("application/json"), "{")).unwrap_err();
        assert!(matches!(err, ChannelsError::MalformedResponse(_)));
    }

    #[test]
    fn test_status_checked_before_content_type() {
        let err = read_json(response(500, Some("text/html"), "")).unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_new_requires_runtime() {
        struct Unused;

        impl Transport for Unused {
            async fn send(
                &self,
                _request: HttpRequest,
            ) -> Result<HttpResponse, channels_core::TransportError> {
                unreachable!()
            }
        }

        assert!(ChannelsClient::new("https://push.example.com", Unused, "install-1").is_err());
    }
}
