//! Configuration types for Tessera.
//!
//! A single YAML file (`tessera.yaml` by default) configures the token
//! issuer/validator, the HTTP server and logging:
//!
//! ```yaml
//! server:
//!   bind: "0.0.0.0:8080"
//! token:
//!   issuer: tessera
//!   subject_group: regular_user
//!   validity: 15d
//!   secret_env: TESSERA_SECRET_KEY
//! logging:
//!   filter: info
//! ```

pub mod token;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use token::TokenConfig;

/// Complete Tessera configuration loaded from a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TesseraConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Token issuance settings.
    #[serde(default)]
    pub token: TokenConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:8080"
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_filter() -> String {
    "info".to_string()
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TesseraConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Check semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.issuer.trim().is_empty() {
            return Err(ConfigError::Config("token.issuer must not be empty".into()));
        }
        if self.token.subject_group.trim().is_empty() {
            return Err(ConfigError::Config(
                "token.subject_group must not be empty".into(),
            ));
        }

        let validity = self
            .token
            .validity_duration()
            .map_err(|e| ConfigError::Config(format!("token.validity: {e}")))?;
        if validity <= chrono::Duration::zero() {
            return Err(ConfigError::Config(format!(
                "token.validity must be positive, got '{}'",
                self.token.validity
            )));
        }

        if self.server.bind.trim().is_empty() {
            return Err(ConfigError::Config("server.bind must not be empty".into()));
        }

        Ok(())
    }
}
