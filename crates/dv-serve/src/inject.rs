//! Test-only client view injection.
//!
//! Stores an arbitrary client view directly as a new commit without going
//! through the client-view fetcher. Useful for test fixtures without a
//! data layer running. Disabled by default: unless the server was started
//! with injection enabled, the endpoint answers 404.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use serde::Deserialize;

use dv_kv::Snapshot;

use crate::client_view::ClientViewResponse;
use crate::error::{ServeError, ServeResult};
use crate::state::AppState;

/// The injection request body.
#[derive(Clone, Debug, Deserialize)]
pub struct InjectRequest {
    #[serde(rename = "accountID", default)]
    pub account_id: String,
    #[serde(rename = "clientID", default)]
    pub client_id: String,
    #[serde(rename = "clientViewResponse")]
    pub client_view_response: ClientViewResponse,
}

/// `POST /inject`.
pub async fn inject_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> ServeResult<StatusCode> {
    if !state.enable_inject {
        return Err(ServeError::NotFound);
    }
    if method != Method::POST {
        return Err(ServeError::MethodNotAllowed(method.to_string()));
    }

    let request: InjectRequest = serde_json::from_slice(&body)
        .map_err(|_| ServeError::BadRequest("Bad request payload".to_string()))?;

    // Same account/client validation as pull.
    if request.account_id.is_empty() {
        return Err(ServeError::BadRequest("Missing accountID".to_string()));
    }
    if state.accounts.lookup(&request.account_id).is_none() {
        return Err(ServeError::BadRequest("Unknown accountID".to_string()));
    }
    if request.client_id.is_empty() {
        return Err(ServeError::BadRequest("Missing clientID".to_string()));
    }

    let log = state.registry.open(&request.account_id, &request.client_id);
    let cv = request.client_view_response;
    let commit = log.append(Snapshot::new(cv.client_view), cv.last_mutation_id)?;
    tracing::info!(
        account = %request.account_id,
        client = %request.client_id,
        state_id = %commit.state_id().short_hex(),
        "client view injected"
    );
    Ok(StatusCode::OK)
}
