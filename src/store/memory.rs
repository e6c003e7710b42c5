//! In-memory store.
//!
//! Records live in a `BTreeMap` keyed by id, so unsorted iteration is
//! still deterministic. This is the default runtime store and the backing
//! map of `FileStore`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::{Comic, NewComic};
use crate::query::{InventoryFilter, PageWindow, SortSpec};

use super::{ComicStore, StoreResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<Uuid, Comic>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in key order, cloned out under the read lock.
    pub(super) async fn snapshot(&self) -> Vec<Comic> {
        self.records.read().await.values().cloned().collect()
    }

    /// Replaces the whole map with a loaded snapshot.
    pub(super) async fn restore(&self, records: Vec<Comic>) {
        let mut map = self.records.write().await;
        map.clear();
        for comic in records {
            map.insert(comic.id, comic);
        }
    }
}

#[async_trait]
impl ComicStore for MemoryStore {
    async fn insert(&self, new: NewComic) -> StoreResult<Comic> {
        let comic = Comic::create(new);

        let mut records = self.records.write().await;
        records.insert(comic.id, comic.clone());

        Ok(comic)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Comic>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn replace(&self, id: Uuid, comic: Comic) -> StoreResult<Option<Comic>> {
        let mut records = self.records.write().await;

        if !records.contains_key(&id) {
            return Ok(None);
        }

        let mut comic = comic;
        comic.touch();
        records.insert(id, comic.clone());

        Ok(Some(comic))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn find(
        &self,
        filter: &InventoryFilter,
        sort: SortSpec,
        window: PageWindow,
    ) -> StoreResult<Vec<Comic>> {
        let mut matching: Vec<Comic> = {
            let records = self.records.read().await;
            records.values().filter(|c| filter.matches(c)).cloned().collect()
        };

        // Stable sort keeps insertion order for equal keys
        matching.sort_by(|a, b| sort.compare(a, b));

        Ok(matching
            .into_iter()
            .skip(window.skip())
            .take(window.take())
            .collect())
    }

    async fn count(&self, filter: &InventoryFilter) -> StoreResult<u64> {
        let records = self.records.read().await;
        Ok(records.values().filter(|c| filter.matches(c)).count() as u64)
    }
}
