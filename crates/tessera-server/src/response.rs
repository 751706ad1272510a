//! Response envelope shared by all endpoints.
//!
//! Every body has the shape `{ "code": .., "info": .., "message": .. }`.
//! Success uses code 200 and info "success"; errors carry a stable numeric
//! code and a stable `info` kind so clients never parse the human message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tessera_token::{IssuanceError, Segment, ValidationError};
use thiserror::Error;

/// Uniform response body.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub code: u32,
    pub info: &'static str,
    pub message: T,
}

/// Wrap a successful result.
pub fn ok<T: Serialize>(message: T) -> Json<Envelope<T>> {
    Json(Envelope {
        code: 200,
        info: "success",
        message,
    })
}

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no token presented in the Authorization header")]
    MissingToken,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Issuance(#[from] IssuanceError),

    #[error("token audience '{0}' is not a subject id")]
    InvalidOperator(String),

    #[error("invalid request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// Stable numeric code for this error kind.
    pub fn code(&self) -> u32 {
        match self {
            ApiError::Validation(e) => match e {
                ValidationError::MalformedStructure { .. } => 4001,
                ValidationError::SegmentDecode { segment, .. } => match segment {
                    Segment::Header => 4002,
                    Segment::Claims => 4003,
                    Segment::Signature => 4004,
                },
                ValidationError::ClaimDeserialize(_) => 4005,
                ValidationError::SignatureInvalid => 4006,
                ValidationError::InvalidTimestamp { .. } => 4007,
                ValidationError::NotYetValid { .. } => 4008,
                ValidationError::Expired { .. } => 4009,
            },
            ApiError::MissingToken => 4010,
            ApiError::InvalidOperator(_) => 4011,
            ApiError::BadRequest(_) => 4000,
            ApiError::Issuance(_) => 5001,
        }
    }

    /// Stable machine-readable kind for this error.
    pub fn info(&self) -> &'static str {
        match self {
            ApiError::Validation(e) => match e {
                ValidationError::MalformedStructure { .. } => "malformed_token",
                ValidationError::SegmentDecode { segment, .. } => match segment {
                    Segment::Header => "header_decode_error",
                    Segment::Claims => "claims_decode_error",
                    Segment::Signature => "signature_decode_error",
                },
                ValidationError::ClaimDeserialize(_) => "claims_deserialize_error",
                ValidationError::SignatureInvalid => "signature_invalid",
                ValidationError::InvalidTimestamp { .. } => "invalid_timestamp",
                ValidationError::NotYetValid { .. } => "token_not_yet_valid",
                ValidationError::Expired { .. } => "token_expired",
            },
            ApiError::MissingToken => "missing_token",
            ApiError::InvalidOperator(_) => "invalid_operator",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Issuance(_) => "issuance_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MissingToken | ApiError::InvalidOperator(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Issuance(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Envelope {
            code: self.code(),
            info: self.info(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
