//! Rental backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which implementation of the collaborator ports to use
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process backend seeded with the fixture catalogue
    #[default]
    Memory,
    /// REST backend reached over HTTP
    Http,
}

/// Rental backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,

    /// Base URL of the REST API, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Whether the backend serves `GET /vehicle-types/wheels/{n}`
    #[serde(default = "default_server_wheel_filter")]
    pub server_wheel_filter: bool,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_http(&self) -> bool {
        self.kind == BackendKind::Http
    }

    /// Validate backend configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.is_http() {
            if self.base_url.trim().is_empty() {
                return Err(ValidationError::MissingRequired("backend.base_url"));
            }
            if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
                return Err(ValidationError::InvalidBaseUrl);
            }
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            server_wheel_filter: default_server_wheel_filter(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_server_wheel_filter() -> bool {
    true
}
