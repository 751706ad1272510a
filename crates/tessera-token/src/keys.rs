//! Secret key management for token signing.

use crate::codec;
use crate::error::KeyError;
use rand::RngCore;
use std::fmt;
use std::path::Path;
use tessera_core::TokenConfig;

/// Length of generated secrets, matching the HMAC-SHA256 block-friendly size.
pub const GENERATED_KEY_LEN: usize = 32;

/// The process-wide HMAC secret.
///
/// Loaded once at startup and shared behind an `Arc` by signer, issuer and
/// validator. The bytes are zeroed on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Generate a new random secret.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let mut bytes = vec![0u8; GENERATED_KEY_LEN];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create a secret from raw bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, KeyError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(KeyError::Empty);
        }
        Ok(Self(bytes))
    }

    /// Create a secret from its base64 encoding.
    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        let bytes = codec::decode(encoded.trim())?;
        Self::from_bytes(bytes)
    }

    /// Load a secret from a file containing its base64 encoding.
    pub fn load_from_file(path: &Path) -> Result<Self, KeyError> {
        let encoded = std::fs::read_to_string(path)?;
        Self::from_base64(&encoded)
    }

    /// Resolve the secret named by the token configuration (env var, then file).
    pub fn from_config(config: &TokenConfig) -> Result<Self, KeyError> {
        let encoded = config.resolve_secret()?.ok_or_else(|| {
            KeyError::Missing(format!(
                "set {} or token.secret_file",
                config.secret_env.as_deref().unwrap_or("token.secret_env")
            ))
        })?;
        Self::from_base64(&encoded)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Base64 encoding of the secret, as stored in key files and env vars.
    pub fn to_base64(&self) -> String {
        codec::encode(&self.0)
    }

    /// Save the secret to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), KeyError> {
        std::fs::write(path, self.to_base64())?;
        Ok(())
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(<{} bytes redacted>)", self.0.len())
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        // Zeroize on drop
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}
