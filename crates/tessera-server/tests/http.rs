//! Router-level tests: login, guarded routes and the error envelope.
//!
//! Run with: cargo test --package tessera-server --test http

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tessera_core::TesseraConfig;
use tessera_server::{router, state::AppState};
use tessera_token::{codec, unix_now, SecretKey};
use tower::ServiceExt;

fn app_with_key(key: SecretKey) -> Router {
    let cfg = TesseraConfig::default();
    router(Arc::new(AppState::with_key(&cfg, key).unwrap()))
}

fn app() -> Router {
    app_with_key(SecretKey::from_bytes(b"http-test-secret".to_vec()).unwrap())
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn login_request(body: Value) -> Request<Body> {
    Request::post("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn whoami_request(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::get("/whoami");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::empty()).unwrap()
}

async fn login(app: &Router, user_id: i64, message: Value) -> String {
    let (status, body) = send(app, login_request(json!({"user_id": user_id, "message": message}))).await;
    assert_eq!(status, StatusCode::OK);
    body["message"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_healthz() {
    let (status, body) = send(&app(), Request::get("/healthz").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
}

#[tokio::test]
async fn test_login_then_whoami() {
    let app = app();

    let (status, body) = send(&app, login_request(json!({"user_id": 42, "message": {"name": "alice"}}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], json!(200));
    assert_eq!(body["info"], json!("success"));
    assert_eq!(body["message"]["operator"], json!("42"));
    assert!(body["message"]["expires_at"].as_i64().unwrap() > unix_now());

    let token = body["message"]["token"].as_str().unwrap();
    let (status, body) = send(&app, whoami_request(Some(&format!("Bearer {token}")))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"]["operator"], json!("42"));
    assert_eq!(body["message"]["message"], json!({"name": "alice"}));

    // The raw header value without a scheme is accepted too.
    let (status, _) = send(&app, whoami_request(Some(token))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_token() {
    let (status, body) = send(&app(), whoami_request(None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], json!(4010));
    assert_eq!(body["info"], json!("missing_token"));
}

#[tokio::test]
async fn test_malformed_token() {
    let (status, body) = send(&app(), whoami_request(Some("a.b"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], json!(4001));
    assert_eq!(body["info"], json!("malformed_token"));
}

#[tokio::test]
async fn test_undecodable_signature() {
    let app = app();
    let token = login(&app, 1, Value::Null).await;
    let mut parts: Vec<&str> = token.split('.').collect();
    parts[2] = "!!!invalid!!!";

    let (status, body) = send(&app, whoami_request(Some(&parts.join(".")))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["info"], json!("signature_decode_error"));
}

#[tokio::test]
async fn test_tampered_token() {
    let app = app();
    let token = login(&app, 1, json!("user")).await;
    let parts: Vec<&str> = token.split('.').collect();

    let mut claims: Value = serde_json::from_slice(&codec::decode(parts[1]).unwrap()).unwrap();
    claims["aud"] = json!("0");
    let forged = format!(
        "{}.{}.{}",
        parts[0],
        codec::encode(serde_json::to_vec(&claims).unwrap()),
        parts[2]
    );

    let (status, body) = send(&app, whoami_request(Some(&forged))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], json!(4006));
    assert_eq!(body["info"], json!("signature_invalid"));
}

#[tokio::test]
async fn test_token_from_another_deployment() {
    let ours = app();
    let theirs = app_with_key(SecretKey::generate());
    let token = login(&theirs, 9, Value::Null).await;

    let (status, body) = send(&ours, whoami_request(Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["info"], json!("signature_invalid"));
}

#[tokio::test]
async fn test_refresh_keeps_operator_and_message() {
    let app = app();
    let token = login(&app, 7, json!({"plan": "pro"})).await;

    let (status, body) = send(
        &app,
        Request::post("/refresh")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"]["operator"], json!("7"));

    let refreshed = body["message"]["token"].as_str().unwrap();
    let (status, body) = send(&app, whoami_request(Some(refreshed))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"]["message"], json!({"plan": "pro"}));
}

#[tokio::test]
async fn test_refresh_requires_token() {
    let (status, body) = send(
        &app(),
        Request::post("/refresh").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["info"], json!("missing_token"));
}

#[tokio::test]
async fn test_login_rejects_bad_body() {
    let (status, body) = send(&app(), login_request(json!({"user_id": "not a number"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(4000));
    assert_eq!(body["info"], json!("bad_request"));
}
