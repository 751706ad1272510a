//! Token issuance and signing configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::duration::{parse_duration, DurationParseError};

/// Configuration for token issuance and validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Value of the `iss` claim on issued tokens.
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Value of the `sub` claim on issued tokens.
    #[serde(default = "default_subject_group")]
    pub subject_group: String,

    /// Time between `nbf` and `exp` (e.g., "15d", "24h").
    #[serde(default = "default_validity")]
    pub validity: String,

    /// Environment variable containing the secret key (base64-encoded).
    #[serde(default = "default_secret_env")]
    pub secret_env: Option<String>,

    /// Path to the secret key file.
    #[serde(default)]
    pub secret_file: Option<PathBuf>,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            subject_group: default_subject_group(),
            validity: default_validity(),
            secret_env: default_secret_env(),
            secret_file: None,
        }
    }
}

impl TokenConfig {
    /// Resolve the secret key from environment or file.
    pub fn resolve_secret(&self) -> Result<Option<String>, std::io::Error> {
        // Try environment variable first
        if let Some(env_var) = &self.secret_env {
            if let Ok(key) = std::env::var(env_var) {
                if !key.trim().is_empty() {
                    return Ok(Some(key.trim().to_string()));
                }
            }
        }

        if let Some(path) = &self.secret_file {
            if path.exists() {
                let key = std::fs::read_to_string(path)?;
                return Ok(Some(key.trim().to_string()));
            }
        }

        Ok(None)
    }

    /// The validity window as a duration.
    pub fn validity_duration(&self) -> Result<Duration, DurationParseError> {
        parse_duration(&self.validity)
    }
}

fn default_issuer() -> String {
    "tessera".to_string()
}

fn default_subject_group() -> String {
    "regular_user".to_string()
}

fn default_validity() -> String {
    "15d".to_string()
}

fn default_secret_env() -> Option<String> {
    Some("TESSERA_SECRET_KEY".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = TokenConfig::default();
        assert_eq!(config.issuer, "tessera");
        assert_eq!(config.subject_group, "regular_user");
        assert_eq!(config.validity_duration().unwrap(), Duration::days(15));
        assert_eq!(config.secret_env.as_deref(), Some("TESSERA_SECRET_KEY"));
    }

    #[test]
    fn test_resolve_secret_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "c2VjcmV0").unwrap();

        let config = TokenConfig {
            secret_env: None,
            secret_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        assert_eq!(config.resolve_secret().unwrap().as_deref(), Some("c2VjcmV0"));
    }

    #[test]
    fn test_resolve_secret_missing() {
        let config = TokenConfig {
            secret_env: Some("TESSERA_TEST_SECRET_THAT_IS_NEVER_SET".to_string()),
            secret_file: Some(PathBuf::from("/nonexistent/tessera/secret.key")),
            ..Default::default()
        };

        assert!(config.resolve_secret().unwrap().is_none());
    }
}
