//! HTTP service around the Tessera token core.
//!
//! - `POST /login` issues a token for a subject id and message
//! - `POST /refresh` re-issues a token for the presented one (guarded)
//! - `GET /whoami` echoes the operator and message (guarded)
//! - `GET /healthz`

pub mod config;
pub mod middleware;
pub mod response;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use middleware::{auth::check_token, handlers};
use state::AppState;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/whoami", get(handlers::whoami))
        .route("/refresh", post(handlers::refresh))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            check_token,
        ));

    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/login", post(handlers::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
