//! JSON snapshot store.
//!
//! A `MemoryStore` wrapped with durability: the full record set is loaded
//! from a JSON file at open and rewritten on every mutation. A mutation is
//! staged on a copy of the records and admitted to the in-memory map only
//! after the snapshot rewrite succeeds, so a failed write leaves memory
//! and disk agreeing on the previous state.
//!
//! Snapshot rewrites follow the atomic write pattern:
//! 1. write to `<path>.tmp`
//! 2. fsync the temp file
//! 3. rename temp over the snapshot
//! 4. fsync the parent directory

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::model::{Comic, NewComic};
use crate::query::{InventoryFilter, PageWindow, SortSpec};

use super::{ComicStore, MemoryStore, StoreResult};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
    /// One rewrite at a time; concurrent writers share a temp path.
    write_gate: Mutex<()>,
}

impl FileStore {
    /// Opens the store, loading an existing snapshot when present.
    ///
    /// A missing file is an empty store; an unreadable or unparseable one
    /// is an error, never silently discarded.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let store = Self {
            path,
            inner: MemoryStore::new(),
            write_gate: Mutex::new(()),
        };

        if store.path.exists() {
            let raw = fs::read_to_string(&store.path)?;
            let records: Vec<Comic> = serde_json::from_str(&raw)?;
            debug!(
                records = records.len(),
                path = %store.path.display(),
                "loaded snapshot"
            );
            store.inner.restore(records).await;
        }

        Ok(store)
    }

    fn temp_path(&self) -> PathBuf {
        let mut raw = OsString::from(self.path.as_os_str());
        raw.push(".tmp");
        PathBuf::from(raw)
    }

    /// Writes `records` as the new snapshot. Callers hold the write gate
    /// and admit `records` to the map only after this succeeds.
    fn persist(&self, records: &[Comic]) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.temp_path();
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &self.path)?;

        // Make the rename itself durable
        if let Some(parent) = self.path.parent() {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }
}

#[async_trait]
impl ComicStore for FileStore {
    async fn insert(&self, new: NewComic) -> StoreResult<Comic> {
        let _gate = self.write_gate.lock().await;

        let comic = Comic::create(new);
        let mut records = self.inner.snapshot().await;
        records.push(comic.clone());

        self.persist(&records)?;
        self.inner.restore(records).await;

        Ok(comic)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Comic>> {
        self.inner.get(id).await
    }

    async fn replace(&self, id: Uuid, comic: Comic) -> StoreResult<Option<Comic>> {
        let _gate = self.write_gate.lock().await;

        let mut records = self.inner.snapshot().await;
        let Some(slot) = records.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        let mut comic = comic;
        comic.touch();
        *slot = comic.clone();

        self.persist(&records)?;
        self.inner.restore(records).await;

        Ok(Some(comic))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let _gate = self.write_gate.lock().await;

        let mut records = self.inner.snapshot().await;
        let before = records.len();
        records.retain(|c| c.id != id);
        if records.len() == before {
            return Ok(false);
        }

        self.persist(&records)?;
        self.inner.restore(records).await;

        Ok(true)
    }

    async fn find(
        &self,
        filter: &InventoryFilter,
        sort: SortSpec,
        window: PageWindow,
    ) -> StoreResult<Vec<Comic>> {
        self.inner.find(filter, sort, window).await
    }

    async fn count(&self, filter: &InventoryFilter) -> StoreResult<u64> {
        self.inner.count(filter).await
    }
}
