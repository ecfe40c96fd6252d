use std::sync::Arc;

use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::inject::inject_handler;
use crate::pull::pull_handler;
use crate::state::AppState;

/// Build the axum router with all sync endpoints.
///
/// `/sync` and `/inject` are registered with `any` so the handlers can
/// answer non-POST methods with the protocol's own 405 body.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/sync", any(pull_handler))
        .route("/inject", any(inject_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe.
async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "deltaview",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
