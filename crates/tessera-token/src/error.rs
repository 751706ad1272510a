//! Error types for token issuance and validation.

use std::fmt;
use thiserror::Error;

/// One of the three dot-separated segments of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Header,
    Claims,
    Signature,
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Header => "header",
            Segment::Claims => "claims",
            Segment::Signature => "signature",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a presented token is rejected.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Token does not consist of exactly three dot-separated segments.
    #[error("malformed token: expected 3 segments, found {segments}")]
    MalformedStructure { segments: usize },

    /// A segment is not valid base64.
    #[error("failed to decode {segment} segment: {source}")]
    SegmentDecode {
        segment: Segment,
        #[source]
        source: base64::DecodeError,
    },

    /// The decoded claims are not a valid claim set.
    #[error("failed to deserialize claims: {0}")]
    ClaimDeserialize(#[source] serde_json::Error),

    /// The signature does not match header and claims.
    #[error("token signature is invalid")]
    SignatureInvalid,

    /// A timestamp claim is not a decimal integer.
    #[error("claim '{claim}' is not a valid timestamp: {value:?}")]
    InvalidTimestamp { claim: &'static str, value: String },

    /// Current time is before `nbf`.
    #[error("token is not valid before {not_before}")]
    NotYetValid { not_before: i64 },

    /// Current time is at or after `exp`.
    #[error("token has expired at {expired_at}")]
    Expired { expired_at: i64 },
}

/// Failures while issuing a token.
#[derive(Debug, Error)]
pub enum IssuanceError {
    /// Failed to serialize the header.
    #[error("failed to serialize token header: {0}")]
    HeaderSerialization(#[source] serde_json::Error),

    /// Failed to serialize the claim set (usually the message payload).
    #[error("failed to serialize token claims: {0}")]
    ClaimsSerialization(#[source] serde_json::Error),
}

/// Errors loading or generating the signing secret.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The secret decodes to zero bytes.
    #[error("secret key is empty")]
    Empty,

    /// The secret is not valid base64.
    #[error("failed to decode secret key: {0}")]
    Decode(#[from] base64::DecodeError),

    /// No secret was configured.
    #[error("secret key not configured: {0}")]
    Missing(String),

    /// IO error (reading/writing keys).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
