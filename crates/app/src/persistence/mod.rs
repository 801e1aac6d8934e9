//! Persistence
//!
//! The product list is the only state that outlives the process. It is loaded once when the
//! context is built and written back after every change.

mod errors;
mod file;
mod memory;
mod snapshot;

use async_trait::async_trait;
use mockall::automock;

pub use errors::PersistenceError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use snapshot::{SNAPSHOT_VERSION, Snapshot, migrate};

#[automock]
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the stored snapshot, upgrading older shapes. `None` when nothing has been saved.
    async fn load(&self) -> Result<Option<Snapshot>, PersistenceError>;

    /// Replace the stored snapshot.
    async fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError>;
}
