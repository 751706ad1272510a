use crate::response::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde_json::Value;
use std::sync::Arc;
use tessera_token::ValidatedToken;

/// Identity attached to requests that carried a valid token.
#[derive(Clone, Debug)]
pub struct Operator {
    /// Subject id from the token's `aud` claim.
    pub audience: String,
    /// Payload supplied when the token was issued.
    pub message: Value,
    pub expires_at: i64,
}

impl From<ValidatedToken> for Operator {
    fn from(token: ValidatedToken) -> Self {
        Self {
            audience: token.audience,
            message: token.message,
            expires_at: token.expires_at,
        }
    }
}

/// Axum middleware that admits only requests with a valid token.
///
/// On success the request gets an [`Operator`] extension; on failure the
/// pipeline stops with the error envelope.
pub async fn check_token(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers()).ok_or_else(|| {
        tracing::warn!(path = %req.uri().path(), "request without token");
        ApiError::MissingToken
    })?;

    let validated: ValidatedToken = state.validator.validate_now(&token).map_err(|e| {
        let err = ApiError::from(e);
        tracing::warn!(
            path = %req.uri().path(),
            kind = err.info(),
            "token rejected"
        );
        err
    })?;

    tracing::debug!(operator = %validated.audience, "token accepted");
    req.extensions_mut().insert(Operator::from(validated));

    Ok(next.run(req).await)
}

/// Read the token from `Authorization`, with or without a `Bearer ` prefix.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let value = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?
        .trim_start();
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_extract_raw_token() {
        assert_eq!(extract_token(&headers("a.b.c")).as_deref(), Some("a.b.c"));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_token(&headers("Bearer a.b.c ")).as_deref(), Some("a.b.c"));
    }

    #[test]
    fn test_extract_missing_token() {
        assert!(extract_token(&HeaderMap::new()).is_none());
        assert!(extract_token(&headers("Bearer ")).is_none());
        assert!(extract_token(&headers("   ")).is_none());
    }
}
