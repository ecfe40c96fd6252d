//! Shared state for the HTTP handlers.

use std::sync::Arc;
use std::time::Duration;

use dv_db::LogRegistry;
use dv_store::{DatasetStore, InMemoryDatasetStore, InMemoryObjectStore, ObjectStore};

use crate::accounts::AccountRegistry;
use crate::client_view::{ClientViewFetch, HttpClientViewFetcher};
use crate::config::ServerConfig;

/// Everything a request handler needs.
///
/// The log registry is the process-wide cache of open commit logs; the
/// fetcher is `None` in bootstrap/test mode, in which case every pull
/// re-serves the last known state.
pub struct AppState {
    /// Configured accounts.
    pub accounts: AccountRegistry,
    /// Open commit logs, one per (accountID, clientID).
    pub registry: LogRegistry,
    /// Upstream client-view fetcher, if enabled.
    pub fetcher: Option<Arc<dyn ClientViewFetch>>,
    /// Whether `/inject` answers.
    pub enable_inject: bool,
}

impl AppState {
    /// Build state from config with in-memory stores and the HTTP fetcher.
    pub fn new(config: &ServerConfig) -> Self {
        let objects: Arc<dyn ObjectStore> = Arc::new(InMemoryObjectStore::new());
        let datasets: Arc<dyn DatasetStore> = Arc::new(InMemoryDatasetStore::new());
        let fetcher = HttpClientViewFetcher::new(Duration::from_secs(config.fetch_timeout_secs));
        Self {
            accounts: AccountRegistry::new(config.accounts.clone()),
            registry: LogRegistry::new(objects, datasets),
            fetcher: Some(Arc::new(fetcher)),
            enable_inject: config.enable_inject,
        }
    }
}
