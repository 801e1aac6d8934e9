//! In-memory state store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::persistence::{PersistenceError, Snapshot, StateStore};

/// Keeps the snapshot for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RwLock<Option<Snapshot>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a snapshot already saved.
    #[must_use]
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RwLock::new(Some(snapshot)),
        }
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        *self.snapshot.write().await = Some(snapshot.clone());

        Ok(())
    }
}
