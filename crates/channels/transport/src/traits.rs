//! Transport traits.

use channels_core::TransportError;

/// HTTP method used by the push channel API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Request handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// JSON body, sent with `Content-Type: application/json` when present.
    pub body: Option<serde_json::Value>,
}

/// Raw response returned by a [`Transport`].
///
/// Status and content type are not validated by the transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Value of the `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Response body.
    pub body: bytes::Bytes,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the content type is `application/json` (parameters ignored).
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
    }

    /// Body as lossy UTF-8, or `None` when empty.
    pub fn body_text(&self) -> Option<String> {
        if self.body.is_empty() {
            return None;
        }
        Some(String::from_utf8_lossy(&self.body).into_owned())
    }
}

/// Performs HTTP requests for the channels client.
///
/// Connection pooling, TLS, retries and timeouts all belong to the
/// implementation; failures surface as [`TransportError`].
#[trait_variant::make(Send)]
pub trait Transport: Send + Sync {
    /// Perform a request and return the raw response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&str>) -> HttpResponse {
        HttpResponse {
            status,
            content_type: content_type.map(str::to_string),
            body: bytes::Bytes::new(),
        }
    }

    #[test]
    fn test_success_range() {
        assert!(response(200, None).is_success());
        assert!(response(204, None).is_success());
        assert!(!response(302, None).is_success());
        assert!(!response(404, None).is_success());
    }

    #[test]
    fn test_json_content_type() {
        assert!(response(200, Some("application/json")).is_json());
        assert!(response(200, Some("application/json; charset=utf-8")).is_json());
        assert!(!response(200, Some("text/html")).is_json());
        assert!(!response(200, None).is_json());
    }

    #[test]
    fn test_empty_body_text() {
        assert_eq!(response(204, None).body_text(), None);
    }
}
