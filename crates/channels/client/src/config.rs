//! Client configuration.

use std::path::{Path, PathBuf};

use channels_transport::TransportConfig;
use color_eyre::eyre::WrapErr as _;
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`ClientConfig::base_url`].
pub const BASE_URL_ENV: &str = "PUSH_CHANNELS_BASE_URL";

/// Environment variable overriding [`ClientConfig::install_id`].
pub const INSTALL_ID_ENV: &str = "PUSH_CHANNELS_INSTALL_ID";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the push channel API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Installation identifier. Usually provisioned elsewhere.
    #[serde(default)]
    pub install_id: Option<String>,

    #[serde(default)]
    pub transport: TransportConfig,
}

fn default_base_url() -> String {
    "https://push.kumulos.com".to_string()
}

impl ClientConfig {
    /// Load from the default config file, then apply environment overrides.
    pub fn load() -> color_eyre::eyre::Result<Self> {
        let config_path = Self::config_path();
        if !config_path.exists() {
            color_eyre::eyre::bail!("config file not found at {}", config_path.display());
        }
        Ok(Self::from_path(&config_path)?.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Load from an explicit TOML file.
    pub fn from_path(path: &Path) -> color_eyre::eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> color_eyre::eyre::Result<Self> {
        toml::from_str(content).wrap_err("failed to parse config")
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/etc"))
            .join("push-channels")
            .join("config.toml")
    }

    /// Base URL without trailing slashes.
    pub fn push_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        if let Some(install_id) = lookup(INSTALL_ID_ENV) {
            self.install_id = Some(install_id);
        }
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            install_id: None,
            transport: TransportConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = ClientConfig::from_toml_str(
            r#"
            base_url = "https://push.example.com/"
            install_id = "install-1"

            [transport]
            timeout_ms = 5000

            [transport.credentials]
            api_key = "key"
            secret_key = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.push_url(), "https://push.example.com");
        assert_eq!(config.install_id.as_deref(), Some("install-1"));
        assert_eq!(config.transport.timeout_ms, 5000);
        assert_eq!(config.transport.connect_timeout_ms, 10_000);
        assert_eq!(config.transport.credentials.unwrap().api_key, "key");
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::default().with_overrides(|key| match key {
            INSTALL_ID_ENV => Some("from-env".to_string()),
            _ => None,
        });

        assert_eq!(config.base_url, "https://push.kumulos.com");
        assert_eq!(config.install_id.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(ClientConfig::from_toml_str("base_url = [").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = ClientConfig::from_path(Path::new("/nonexistent/push-channels.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
