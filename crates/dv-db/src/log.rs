//! The per-client commit log: head, append, and historical lookup.

use std::sync::{Arc, Mutex};

use dv_kv::Snapshot;
use dv_store::{DatasetStore, ObjectStore};
use dv_types::ObjectId;

use crate::commit::Commit;
use crate::error::{DbError, DbResult};

/// Canonical dataset name for a client's log.
pub fn dataset_name(account_id: &str, client_id: &str) -> String {
    format!("accounts/{account_id}/clients/{client_id}")
}

/// The append-only commit log for one `(accountID, clientID)` pair.
///
/// Reads (`head`, `lookup`) take no lock: the dataset head is read
/// atomically and every commit behind it is immutable. `append` serializes
/// through an internal mutex so the read-head/write/advance sequence is
/// exclusive per client; the dataset's compare-and-swap backstops any
/// writer that slipped past the mutex (e.g. a second log handle for the
/// same dataset).
pub struct ClientLog {
    objects: Arc<dyn ObjectStore>,
    datasets: Arc<dyn DatasetStore>,
    dataset: String,
    write_lock: Mutex<()>,
}

impl ClientLog {
    /// Open the log for a client over the given stores.
    ///
    /// Opening is cheap and does not touch storage; a log with no commits
    /// simply has no head yet.
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        datasets: Arc<dyn DatasetStore>,
        account_id: &str,
        client_id: &str,
    ) -> Self {
        Self {
            objects,
            datasets,
            dataset: dataset_name(account_id, client_id),
            write_lock: Mutex::new(()),
        }
    }

    /// The dataset name this log advances.
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// The latest commit, or `None` if this client has never synced.
    pub fn head(&self) -> DbResult<Option<Commit>> {
        match self.datasets.head(&self.dataset)? {
            Some(id) => Ok(Some(self.read_commit(id)?)),
            None => Ok(None),
        }
    }

    /// Append a new commit whose basis is the current head, atomically
    /// advancing the head reference.
    ///
    /// On any failure, dataset advancement included, the head is left
    /// unchanged: the freshly written commit object is unreferenced and the
    /// log is exactly as before, so a retry is safe.
    pub fn append(&self, snapshot: Snapshot, last_mutation_id: u64) -> DbResult<Commit> {
        let _guard = self.write_lock.lock().expect("lock poisoned");

        let basis = self.datasets.head(&self.dataset)?;
        let commit = Commit::new(basis, snapshot, last_mutation_id)?;
        let id = self.objects.write(&commit.to_stored_object()?)?;
        self.datasets.advance(&self.dataset, basis, id)?;
        Ok(commit)
    }

    /// Resolve a historical `stateID` to its commit by walking the basis
    /// chain back from the head.
    ///
    /// Returns `Ok(None)` for an id not in this client's history (the
    /// caller degrades to a full-bootstrap diff).
    pub fn lookup(&self, state_id: ObjectId) -> DbResult<Option<Commit>> {
        let mut cursor = self.datasets.head(&self.dataset)?;
        while let Some(id) = cursor {
            let commit = self.read_commit(id)?;
            if id == state_id {
                return Ok(Some(commit));
            }
            cursor = commit.basis();
        }
        Ok(None)
    }

    fn read_commit(&self, id: ObjectId) -> DbResult<Commit> {
        let obj = self.objects.read(&id)?.ok_or(DbError::DanglingHead(id))?;
        Commit::from_stored_object(&obj)
    }
}

impl std::fmt::Debug for ClientLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientLog")
            .field("dataset", &self.dataset)
            .finish()
    }
}
