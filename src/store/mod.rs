//! Pluggable persistence for comic records.
//!
//! `ComicStore` is the seam between the HTTP layer and storage. Handlers
//! hold an `Arc<dyn ComicStore>` and never know which implementation is
//! behind it: `MemoryStore` for tests and ephemeral serving, `FileStore`
//! for a durable JSON snapshot on disk.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::model::{Comic, NewComic};
use crate::query::{InventoryFilter, PageWindow, SortSpec};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Persistence operations for comic records.
///
/// Writes are last-writer-wins; the trait offers no cross-operation
/// transaction, and the update path (read, merge, replace) is documented
/// as non-transactional.
#[async_trait]
pub trait ComicStore: Send + Sync {
    /// Stores a new record, assigning its id and timestamps.
    async fn insert(&self, new: NewComic) -> StoreResult<Comic>;

    /// Fetches a record by id.
    async fn get(&self, id: Uuid) -> StoreResult<Option<Comic>>;

    /// Overwrites the record stored under `id` with a merged record,
    /// bumping `updated_at`. Returns the stored record, or `None` when the
    /// id is unknown.
    async fn replace(&self, id: Uuid, comic: Comic) -> StoreResult<Option<Comic>>;

    /// Removes a record. Returns whether anything was removed.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// Returns the requested page of matching records, sorted.
    async fn find(
        &self,
        filter: &InventoryFilter,
        sort: SortSpec,
        window: PageWindow,
    ) -> StoreResult<Vec<Comic>>;

    /// Counts matching records without pagination.
    async fn count(&self, filter: &InventoryFilter) -> StoreResult<u64>;
}
