//! Error types surfaced through failure callbacks.

/// Failure reported by the HTTP transport.
///
/// Connectivity, TLS and timeout failures all land here and are passed
/// through to callers unchanged.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    timeout: bool,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Create a transport error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timeout: false,
            source: None,
        }
    }

    /// Create a transport error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            timeout: false,
            source: Some(Box::new(source)),
        }
    }

    /// Mark this error as a timeout.
    pub fn timed_out(mut self) -> Self {
        self.timeout = true;
        self
    }

    /// Whether the request timed out.
    pub fn is_timeout(&self) -> bool {
        self.timeout
    }
}

/// Any failure of a push channel operation.
#[derive(Debug, thiserror::Error)]
pub enum ChannelsError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: u16, body: Option<String> },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("unexpected content type: {}", .0.as_deref().unwrap_or("<none>"))]
    UnexpectedContentType(Option<String>),
}

impl ChannelsError {
    /// HTTP status code, if the server answered with a non-2xx status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_for_http_errors() {
        let http = ChannelsError::HttpStatus {
            status: 404,
            body: None,
        };
        let malformed = ChannelsError::MalformedResponse("missing uuid".to_string());

        assert_eq!(http.status(), Some(404));
        assert_eq!(malformed.status(), None);
    }

    #[test]
    fn test_transport_error_source_is_kept() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ChannelsError::from(TransportError::with_source("connect failed", io));

        let transport = std::error::Error::source(&err).unwrap();
        assert_eq!(transport.to_string(), "connect failed");
        assert!(std::error::Error::source(transport).is_some());
    }

    #[test]
    fn test_content_type_display() {
        let err = ChannelsError::UnexpectedContentType(None);
        assert_eq!(err.to_string(), "unexpected content type: <none>");
    }
}
