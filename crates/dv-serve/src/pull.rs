//! The pull protocol: validate the sync request, fetch the upstream client
//! view, commit it, and answer with the patch from the client's claimed
//! base to the new head.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method};
use axum::Json;
use serde::{Deserialize, Serialize};

use dv_db::{ClientLog, Commit};
use dv_diff::{diff, Operation};
use dv_kv::{Checksum, Snapshot};
use dv_types::ObjectId;

use crate::client_view::ClientViewRequest;
use crate::error::{ServeError, ServeResult};
use crate::state::AppState;

/// The sync request body.
///
/// `baseStateID` and `checksum` are optional; absent and present-empty both
/// mean "omitted" (the wire cannot tell them apart, and the protocol treats
/// an empty `baseStateID` as "no prior state"). The `Option`s keep the
/// distinction visible until [`PullRequest::base_state_id`] collapses it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PullRequest {
    #[serde(rename = "accountID", default)]
    pub account_id: String,
    #[serde(rename = "clientID", default)]
    pub client_id: String,
    #[serde(rename = "baseStateID", default)]
    pub base_state_id: Option<String>,
    #[serde(rename = "checksum", default)]
    pub checksum: Option<String>,
}

impl PullRequest {
    /// The claimed base state, with absent and empty collapsed to `None`.
    pub fn base_state_id(&self) -> Option<&str> {
        match self.base_state_id.as_deref() {
            None | Some("") => None,
            some => some,
        }
    }

    /// The claimed checksum, with absent and empty collapsed to `None`.
    pub fn checksum(&self) -> Option<&str> {
        match self.checksum.as_deref() {
            None | Some("") => None,
            some => some,
        }
    }
}

/// The sync response body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PullResponse {
    #[serde(rename = "stateID")]
    pub state_id: String,
    #[serde(rename = "lastMutationID")]
    pub last_mutation_id: u64,
    pub patch: Vec<Operation>,
    pub checksum: String,
}

/// `POST /sync`.
pub async fn pull_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> ServeResult<Json<PullResponse>> {
    if method != Method::POST {
        return Err(ServeError::MethodNotAllowed(method.to_string()));
    }

    let request: PullRequest = serde_json::from_slice(&body)
        .map_err(|_| ServeError::BadRequest("Bad request payload".to_string()))?;
    let (account, base_state_id) = validate(&state, &request)?;

    let log = state.registry.open(&request.account_id, &request.client_id);

    // Fetch the upstream view and commit it. Failure here is non-fatal:
    // the pull degrades to re-serving the last known state.
    let fetched = match (&state.fetcher, &account.client_view_url) {
        (Some(fetcher), Some(url)) => {
            let auth_token = headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");
            let cv_request = ClientViewRequest {
                client_id: request.client_id.clone(),
            };
            match fetcher.fetch(url, &cv_request, auth_token).await {
                Ok(response) => Some(response),
                Err(err) => {
                    tracing::warn!(
                        account = %request.account_id,
                        client = %request.client_id,
                        error = %err,
                        "client view fetch failed, re-serving last known state"
                    );
                    None
                }
            }
        }
        _ => None,
    };

    let head = match fetched {
        Some(cv) => log.append(Snapshot::new(cv.client_view), cv.last_mutation_id)?,
        None => head_or_bootstrap(&log)?,
    };

    // A base the log has never heard of degrades to a full-bootstrap diff,
    // as does a base whose claimed checksum does not match the commit's:
    // the client's local state is corrupt, and only a full reset converges.
    let base: Option<Commit> = match base_state_id {
        Some(id) => log.lookup(id)?,
        None => None,
    };
    let base = match (base, request.checksum()) {
        (Some(commit), Some(claimed)) if claimed != commit.checksum().to_hex() => {
            tracing::warn!(
                account = %request.account_id,
                client = %request.client_id,
                state_id = %commit.state_id().short_hex(),
                "checksum mismatch on claimed base, forcing full reset"
            );
            None
        }
        (base, _) => base,
    };

    let patch = diff(base.as_ref().map(|c| c.snapshot()), head.snapshot());
    tracing::debug!(
        account = %request.account_id,
        client = %request.client_id,
        state_id = %head.state_id().short_hex(),
        ops = patch.len(),
        "pull served"
    );

    Ok(Json(PullResponse {
        state_id: head.state_id().to_hex(),
        last_mutation_id: head.last_mutation_id(),
        patch,
        checksum: head.checksum().to_hex(),
    }))
}

/// Field validation and account resolution, before any storage or network
/// I/O. Returns the resolved account and the parsed base state id.
fn validate<'a>(
    state: &'a AppState,
    request: &PullRequest,
) -> ServeResult<(&'a crate::accounts::Account, Option<ObjectId>)> {
    if request.account_id.is_empty() {
        return Err(ServeError::BadRequest("Missing accountID".to_string()));
    }
    let account = state
        .accounts
        .lookup(&request.account_id)
        .ok_or_else(|| ServeError::BadRequest("Unknown accountID".to_string()))?;
    if request.client_id.is_empty() {
        return Err(ServeError::BadRequest("Missing clientID".to_string()));
    }

    let base_state_id = match request.base_state_id() {
        None => None,
        Some(s) => {
            if !ObjectId::is_valid_hex(s) {
                return Err(ServeError::BadRequest("Invalid baseStateID".to_string()));
            }
            Some(
                ObjectId::from_hex(s)
                    .map_err(|_| ServeError::BadRequest("Invalid baseStateID".to_string()))?,
            )
        }
    };

    if let Some(s) = request.checksum() {
        if !Checksum::is_valid_hex(s) {
            return Err(ServeError::BadRequest("Invalid checksum".to_string()));
        }
    }

    Ok((account, base_state_id))
}

/// The current head, or a fresh empty commit if this client has no history
/// at all (so a degraded pull still has a well-defined answer).
fn head_or_bootstrap(log: &ClientLog) -> ServeResult<Commit> {
    match log.head()? {
        Some(head) => Ok(head),
        None => Ok(log.append(Snapshot::empty(), 0)?),
    }
}
