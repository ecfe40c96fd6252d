//! The process-wide cache of open commit logs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use dv_store::{DatasetStore, InMemoryDatasetStore, InMemoryObjectStore, ObjectStore};

use crate::log::ClientLog;

/// Maps `(accountID, clientID)` to its open [`ClientLog`].
///
/// Opening is lazy-initialize-once: repeated or concurrent opens for the
/// same key return the same log handle, so all writers for a client share
/// one append mutex. Different clients get different handles and never
/// contend beyond this map.
pub struct LogRegistry {
    objects: Arc<dyn ObjectStore>,
    datasets: Arc<dyn DatasetStore>,
    logs: RwLock<HashMap<(String, String), Arc<ClientLog>>>,
}

impl LogRegistry {
    /// Create a registry over the given stores.
    pub fn new(objects: Arc<dyn ObjectStore>, datasets: Arc<dyn DatasetStore>) -> Self {
        Self {
            objects,
            datasets,
            logs: RwLock::new(HashMap::new()),
        }
    }

    /// Convenience constructor over fresh in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryObjectStore::new()),
            Arc::new(InMemoryDatasetStore::new()),
        )
    }

    /// Return the log for a client, creating it on first open.
    pub fn open(&self, account_id: &str, client_id: &str) -> Arc<ClientLog> {
        let key = (account_id.to_string(), client_id.to_string());
        {
            let logs = self.logs.read().expect("lock poisoned");
            if let Some(log) = logs.get(&key) {
                return Arc::clone(log);
            }
        }
        let mut logs = self.logs.write().expect("lock poisoned");
        Arc::clone(logs.entry(key).or_insert_with(|| {
            Arc::new(ClientLog::new(
                Arc::clone(&self.objects),
                Arc::clone(&self.datasets),
                account_id,
                client_id,
            ))
        }))
    }

    /// Number of logs opened so far.
    pub fn len(&self) -> usize {
        self.logs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no log has been opened yet.
    pub fn is_empty(&self) -> bool {
        self.logs.read().expect("lock poisoned").is_empty()
    }
}

impl std::fmt::Debug for LogRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogRegistry")
            .field("open_logs", &self.len())
            .finish()
    }
}
