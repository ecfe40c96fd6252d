//! The client-view fetcher: retrieves `{clientView, lastMutationID}` from
//! an account's own backend.
//!
//! The orchestrator never assumes the fetch succeeds; any error here
//! degrades the pull to re-serving the last known state.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request sent to the account backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientViewRequest {
    /// The client whose view is being requested.
    #[serde(rename = "clientID")]
    pub client_id: String,
}

/// Response from the account backend.
///
/// `lastMutationID` is required: a backend that omits it has not
/// acknowledged the client's mutation stream and its view cannot be
/// committed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientViewResponse {
    /// The authoritative key-value view for the client.
    #[serde(default)]
    pub client_view: BTreeMap<String, Value>,
    /// The last client mutation the view reflects.
    #[serde(rename = "lastMutationID")]
    pub last_mutation_id: u64,
}

/// Errors from fetching a client view. Never surfaced to sync clients.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or timed out.
    #[error("client view request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("client view returned status {0}")]
    Status(u16),

    /// The response body could not be decoded (missing `lastMutationID`
    /// included).
    #[error("client view response malformed: {0}")]
    Malformed(String),
}

/// Result alias for client-view fetches.
pub type FetchResult<T> = Result<T, FetchError>;

/// Fetches a client view from an account backend.
#[async_trait]
pub trait ClientViewFetch: Send + Sync {
    /// POST `request` to `url`, forwarding `auth_token` verbatim as the
    /// `Authorization` header when non-empty.
    async fn fetch(
        &self,
        url: &str,
        request: &ClientViewRequest,
        auth_token: &str,
    ) -> FetchResult<ClientViewResponse>;
}

/// HTTP implementation over `reqwest` with a bounded per-request timeout.
pub struct HttpClientViewFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpClientViewFetcher {
    /// Create a fetcher with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }
}

#[async_trait]
impl ClientViewFetch for HttpClientViewFetcher {
    async fn fetch(
        &self,
        url: &str,
        request: &ClientViewRequest,
        auth_token: &str,
    ) -> FetchResult<ClientViewResponse> {
        let mut builder = self
            .client
            .post(url)
            .json(request)
            .timeout(self.timeout);
        if !auth_token.is_empty() {
            builder = builder.header(reqwest::header::AUTHORIZATION, auth_token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}
