//! Token header and claim set.

use crate::error::ValidationError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tessera_core::{DurationParseError, TokenConfig};

/// Value of the `typ` header field.
pub const TOKEN_TYPE: &str = "jwt-like";

/// Value of the `alg` header field (HMAC-SHA256).
pub const ALGORITHM: &str = "HS256";

/// The fixed token header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Token type.
    pub typ: String,
    /// Signing algorithm.
    pub alg: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            typ: TOKEN_TYPE.to_string(),
            alg: ALGORITHM.to_string(),
        }
    }
}

/// Claims carried by a token.
///
/// Timestamps are Unix seconds stored as decimal strings, which is how they
/// appear on the wire. `message` is opaque to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimSet<M = Value> {
    /// Issuing system.
    pub iss: String,

    /// Subject group (e.g., "regular_user").
    pub sub: String,

    /// Subject id the token was issued to.
    pub aud: String,

    /// Issued at.
    pub iat: String,

    /// Not before.
    pub nbf: String,

    /// Expiry.
    pub exp: String,

    /// Caller-supplied payload.
    #[serde(rename = "Mes")]
    pub message: M,
}

impl<M> ClaimSet<M> {
    /// Build the claims for a token issued at `now` to `subject_id`.
    pub fn new(settings: &IssuerSettings, subject_id: i64, message: M, now: i64) -> Self {
        let now_str = now.to_string();
        Self {
            iss: settings.issuer.clone(),
            sub: settings.subject_group.clone(),
            aud: subject_id.to_string(),
            iat: now_str.clone(),
            nbf: now_str,
            exp: now.saturating_add(settings.validity.num_seconds()).to_string(),
            message,
        }
    }

    /// Parsed `iat`.
    pub fn issued_at(&self) -> Result<i64, ValidationError> {
        parse_timestamp("iat", &self.iat)
    }

    /// Parsed `nbf`.
    pub fn not_before(&self) -> Result<i64, ValidationError> {
        parse_timestamp("nbf", &self.nbf)
    }

    /// Parsed `exp`.
    pub fn expiry(&self) -> Result<i64, ValidationError> {
        parse_timestamp("exp", &self.exp)
    }
}

fn parse_timestamp(claim: &'static str, value: &str) -> Result<i64, ValidationError> {
    value
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidTimestamp {
            claim,
            value: value.to_string(),
        })
}

/// Fixed values stamped on every issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerSettings {
    /// `iss` claim.
    pub issuer: String,
    /// `sub` claim.
    pub subject_group: String,
    /// Distance between `nbf` and `exp`.
    pub validity: Duration,
}

impl Default for IssuerSettings {
    fn default() -> Self {
        Self {
            issuer: "tessera".to_string(),
            subject_group: "regular_user".to_string(),
            validity: Duration::days(15),
        }
    }
}

impl IssuerSettings {
    /// Build settings from the token configuration.
    pub fn from_config(config: &TokenConfig) -> Result<Self, DurationParseError> {
        Ok(Self {
            issuer: config.issuer.clone(),
            subject_group: config.subject_group.clone(),
            validity: config.validity_duration()?,
        })
    }

    /// Override the validity window.
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_claims_creation() {
        let settings = IssuerSettings::default();
        let claims = ClaimSet::new(&settings, 42, json!({"role": "admin"}), 1_700_000_000);

        assert_eq!(claims.iss, "tessera");
        assert_eq!(claims.sub, "regular_user");
        assert_eq!(claims.aud, "42");
        assert_eq!(claims.iat, "1700000000");
        assert_eq!(claims.nbf, "1700000000");
        assert_eq!(claims.expiry().unwrap(), 1_700_000_000 + 15 * 24 * 3600);
        assert!(claims.expiry().unwrap() > claims.not_before().unwrap());
    }

    #[test]
    fn test_wire_field_names_and_order() {
        let settings = IssuerSettings::default().with_validity(Duration::seconds(10));
        let claims = ClaimSet::new(&settings, -7, json!("hi"), 100);

        let encoded = serde_json::to_string(&claims).unwrap();
        assert_eq!(
            encoded,
            r#"{"iss":"tessera","sub":"regular_user","aud":"-7","iat":"100","nbf":"100","exp":"110","Mes":"hi"}"#
        );
    }

    #[test]
    fn test_header_wire_format() {
        let encoded = serde_json::to_string(&Header::default()).unwrap();
        assert_eq!(encoded, r#"{"typ":"jwt-like","alg":"HS256"}"#);
    }

    #[test]
    fn test_invalid_timestamp_is_an_error() {
        let mut claims = ClaimSet::new(&IssuerSettings::default(), 1, Value::Null, 0);
        claims.exp = "".to_string();
        claims.nbf = "soon".to_string();

        assert!(matches!(
            claims.expiry(),
            Err(ValidationError::InvalidTimestamp { claim: "exp", .. })
        ));
        assert!(matches!(
            claims.not_before(),
            Err(ValidationError::InvalidTimestamp { claim: "nbf", .. })
        ));
    }

    #[test]
    fn test_settings_from_config() {
        let config = TokenConfig {
            issuer: "hlccd".to_string(),
            validity: "2h".to_string(),
            ..Default::default()
        };
        let settings = IssuerSettings::from_config(&config).unwrap();
        assert_eq!(settings.issuer, "hlccd");
        assert_eq!(settings.subject_group, "regular_user");
        assert_eq!(settings.validity, Duration::hours(2));
    }
}
