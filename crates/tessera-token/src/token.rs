//! Token issuance and validation.

use crate::claims::{ClaimSet, Header, IssuerSettings};
use crate::codec;
use crate::error::{IssuanceError, Segment, ValidationError};
use crate::signer::Signer;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Current wall-clock time in Unix seconds.
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Mints tokens for authenticated subjects.
#[derive(Clone, Debug)]
pub struct TokenIssuer {
    signer: Signer,
    settings: IssuerSettings,
}

/// A freshly issued token and its time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl TokenIssuer {
    /// Create a new issuer with the given signer and settings.
    pub fn new(signer: Signer, settings: IssuerSettings) -> Self {
        Self { signer, settings }
    }

    pub fn settings(&self) -> &IssuerSettings {
        &self.settings
    }

    /// Issue a token for `subject_id` carrying `message`, valid from now.
    pub fn issue<M: Serialize>(&self, subject_id: i64, message: &M) -> Result<String, IssuanceError> {
        self.issue_at(subject_id, message, unix_now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at<M: Serialize>(
        &self,
        subject_id: i64,
        message: &M,
        now: i64,
    ) -> Result<String, IssuanceError> {
        self.issue_token(subject_id, message, now).map(|issued| issued.token)
    }

    /// Issue a token and report its time window.
    pub fn issue_token<M: Serialize>(
        &self,
        subject_id: i64,
        message: &M,
        now: i64,
    ) -> Result<IssuedToken, IssuanceError> {
        let header_segment = encode_header()?;

        let claims = ClaimSet::new(&self.settings, subject_id, message, now);
        let claims_segment = encode_claims(&claims)?;

        let signature_segment = self.signer.sign_encoded(&header_segment, &claims_segment);

        let expires_at = now.saturating_add(self.settings.validity.num_seconds());
        tracing::debug!(audience = %claims.aud, expires_at, "issued token");

        Ok(IssuedToken {
            token: format!("{header_segment}.{claims_segment}.{signature_segment}"),
            issued_at: now,
            expires_at,
        })
    }
}

fn encode_header() -> Result<String, IssuanceError> {
    let bytes = serde_json::to_vec(&Header::default()).map_err(IssuanceError::HeaderSerialization)?;
    Ok(codec::encode(bytes))
}

fn encode_claims<M: Serialize>(claims: &ClaimSet<M>) -> Result<String, IssuanceError> {
    let bytes = serde_json::to_vec(claims).map_err(IssuanceError::ClaimsSerialization)?;
    Ok(codec::encode(bytes))
}

/// Validates tokens presented on incoming requests.
#[derive(Clone, Debug)]
pub struct TokenValidator {
    signer: Signer,
}

impl TokenValidator {
    /// Create a new validator sharing the issuer's signer.
    pub fn new(signer: Signer) -> Self {
        Self { signer }
    }

    /// Validate a token against the current wall-clock time.
    pub fn validate_now<M: DeserializeOwned>(
        &self,
        token: &str,
    ) -> Result<ValidatedToken<M>, ValidationError> {
        self.validate(token, unix_now())
    }

    /// Validate a token as of `now` (Unix seconds).
    pub fn validate<M: DeserializeOwned>(
        &self,
        token: &str,
        now: i64,
    ) -> Result<ValidatedToken<M>, ValidationError> {
        let result = self.check(token, now);
        if let Err(e) = &result {
            tracing::debug!(error = %e, "token rejected");
        }
        result
    }

    fn check<M: DeserializeOwned>(
        &self,
        token: &str,
        now: i64,
    ) -> Result<ValidatedToken<M>, ValidationError> {
        let [header_segment, claims_segment, signature_segment] = split_segments(token)?;

        decode_segment(Segment::Header, header_segment)?;
        let claims_bytes = decode_segment(Segment::Claims, claims_segment)?;
        let signature = decode_segment(Segment::Signature, signature_segment)?;

        let claims: ClaimSet<M> =
            serde_json::from_slice(&claims_bytes).map_err(ValidationError::ClaimDeserialize)?;

        if !self.signer.verify(header_segment, claims_segment, &signature) {
            return Err(ValidationError::SignatureInvalid);
        }

        let not_before = claims.not_before()?;
        let expires_at = claims.expiry()?;

        if now < not_before {
            return Err(ValidationError::NotYetValid { not_before });
        }
        if now >= expires_at {
            return Err(ValidationError::Expired {
                expired_at: expires_at,
            });
        }

        Ok(ValidatedToken {
            audience: claims.aud,
            message: claims.message,
            issuer: claims.iss,
            subject_group: claims.sub,
            not_before,
            expires_at,
        })
    }
}

fn split_segments(token: &str) -> Result<[&str; 3], ValidationError> {
    let segments: Vec<&str> = token.split('.').collect();
    match segments.as_slice() {
        [header, claims, signature] => Ok([*header, *claims, *signature]),
        _ => Err(ValidationError::MalformedStructure {
            segments: segments.len(),
        }),
    }
}

fn decode_segment(segment: Segment, encoded: &str) -> Result<Vec<u8>, ValidationError> {
    codec::decode(encoded).map_err(|source| ValidationError::SegmentDecode { segment, source })
}

/// An accepted token.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedToken<M = Value> {
    /// The subject id the token was issued to (the operator).
    pub audience: String,
    /// The payload supplied at issuance.
    pub message: M,
    /// `iss` claim.
    pub issuer: String,
    /// `sub` claim.
    pub subject_group: String,
    /// Start of the validity window.
    pub not_before: i64,
    /// End of the validity window (exclusive).
    pub expires_at: i64,
}

impl<M> ValidatedToken<M> {
    /// Seconds left before expiry at `now`.
    pub fn remaining(&self, now: i64) -> i64 {
        (self.expires_at - now).max(0)
    }
}

/// Inspect a token without verification (for debugging).
///
/// Checks structure and decodes header and claims; the signature and the
/// time window are not checked.
pub fn inspect_token_unverified(token: &str) -> Result<TokenInfo, ValidationError> {
    let [header_segment, claims_segment, signature_segment] = split_segments(token)?;

    let header_bytes = decode_segment(Segment::Header, header_segment)?;
    let claims_bytes = decode_segment(Segment::Claims, claims_segment)?;
    let signature = decode_segment(Segment::Signature, signature_segment)?;

    let header = serde_json::from_slice(&header_bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&header_bytes).into_owned()));
    let claims: ClaimSet<Value> =
        serde_json::from_slice(&claims_bytes).map_err(ValidationError::ClaimDeserialize)?;

    Ok(TokenInfo {
        header,
        claims,
        signature_len: signature.len(),
    })
}

/// Information about a token (for inspection).
#[derive(Debug, Clone)]
pub struct TokenInfo {
    /// Decoded header, or its raw text if it is not JSON.
    pub header: Value,
    /// Decoded claims.
    pub claims: ClaimSet<Value>,
    /// Length of the decoded signature in bytes.
    pub signature_len: usize,
}
