use crate::middleware::auth::Operator;
use crate::response::{ok, ApiError, Envelope};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tessera_token::unix_now;

pub async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true, "service": "tessera-server" }))
}

/// Body of `POST /login`.
///
/// Credential checking belongs to whatever identity store fronts this
/// service; the endpoint trusts the caller and only mints the token.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user_id: i64,
    #[serde(default)]
    pub message: Value,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub operator: String,
    pub expires_at: i64,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Envelope<TokenResponse>>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    issue(&state, req.user_id, &req.message)
}

/// Re-issue a token for the current operator with a fresh validity window.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Extension(operator): Extension<Operator>,
) -> Result<Json<Envelope<TokenResponse>>, ApiError> {
    let user_id: i64 = operator
        .audience
        .parse()
        .map_err(|_| ApiError::InvalidOperator(operator.audience.clone()))?;
    issue(&state, user_id, &operator.message)
}

pub async fn whoami(Extension(operator): Extension<Operator>) -> Json<Envelope<Value>> {
    ok(json!({
        "operator": operator.audience,
        "message": operator.message,
        "expires_at": operator.expires_at,
    }))
}

fn issue(
    state: &AppState,
    user_id: i64,
    message: &Value,
) -> Result<Json<Envelope<TokenResponse>>, ApiError> {
    let issued = state.issuer.issue_token(user_id, message, unix_now())?;
    tracing::info!(operator = user_id, expires_at = issued.expires_at, "issued token");

    Ok(ok(TokenResponse {
        token: issued.token,
        operator: user_id.to_string(),
        expires_at: issued.expires_at,
    }))
}
