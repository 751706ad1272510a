//! # tessera-token
//!
//! Signed, time-bounded bearer tokens.
//!
//! This crate provides functionality for:
//! - Generating and loading the process-wide HMAC secret
//! - Issuing tokens that bind a subject id and an opaque message
//! - Validating presented tokens (structure, encoding, signature, time window)
//!
//! ## Wire Format
//!
//! ```text
//! token     := base64(header) "." base64(claims) "." base64(signature)
//! header    := {"typ":"jwt-like","alg":"HS256"}
//! claims    := {"iss":..,"sub":..,"aud":..,"iat":..,"nbf":..,"exp":..,"Mes":<any>}
//! signature := HMAC-SHA256(secret, base64(header) "." base64(claims))
//! ```
//!
//! Timestamps are Unix seconds carried as decimal strings. Nothing is stored
//! server-side: a token is valid if its signature matches and the current
//! time falls in `[nbf, exp)`.

pub mod claims;
pub mod codec;
pub mod error;
pub mod keys;
pub mod signer;
pub mod token;

pub use claims::{ClaimSet, Header, IssuerSettings};
pub use error::{IssuanceError, KeyError, Segment, ValidationError};
pub use keys::SecretKey;
pub use signer::Signer;
pub use token::{
    inspect_token_unverified, unix_now, IssuedToken, TokenInfo, TokenIssuer, TokenValidator,
    ValidatedToken,
};
