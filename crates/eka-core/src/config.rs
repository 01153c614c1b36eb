//! Client configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every field has a
//! default so a partial or empty file is valid.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Root configuration structure for config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the knowledge-assistant backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound for a single request. `0` leaves requests unbounded.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// File extensions accepted by the upload command (without the dot).
    #[serde(default = "default_upload_extensions")]
    pub upload_extensions: Vec<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_upload_extensions() -> Vec<String> {
    vec!["pdf".to_string(), "txt".to_string()]
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            upload_extensions: default_upload_extensions(),
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Whether a file name carries one of the accepted extensions.
    pub fn accepts_upload(&self, extension: Option<&str>) -> bool {
        extension.is_some_and(|ext| {
            self.upload_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_zero_timeout_disables_bound() {
        let config: ClientConfig = toml::from_str("request_timeout_secs = 0").unwrap();
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_accepts_upload() {
        let config = ClientConfig::default();
        assert!(config.accepts_upload(Some("pdf")));
        assert!(config.accepts_upload(Some("TXT")));
        assert!(!config.accepts_upload(Some("docx")));
        assert!(!config.accepts_upload(None));
    }
}
