//! Transport configuration.

use serde::{Deserialize, Serialize};

/// Settings for [`ReqwestTransport`](crate::ReqwestTransport).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Total request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// App credentials sent as HTTP basic auth.
    #[serde(default)]
    pub credentials: Option<Credentials>,
}

/// API key and secret key of the app.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    pub secret_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    concat!("push-channels/", env!("CARGO_PKG_VERSION")).to_string()
}

impl TransportConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.connect_timeout_ms)
    }

    /// Set basic auth credentials.
    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        });
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            user_agent: default_user_agent(),
            credentials: None,
        }
    }
}
