//! InMemoryCatalog - 開発用の ContentIndex
//!
//! host のコンテンツストアの代役です。collection ごとに ContentItem を
//! 自然順（登録順）で保持し、`insert` / `remove` で host 側の作成・削除を再現します。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{CollectionKey, ContentError, ContentFilter, ContentItem, ItemId};
use crate::ports::ContentIndex;

#[derive(Default)]
pub struct InMemoryCatalog {
    collections: RwLock<HashMap<CollectionKey, Vec<ContentItem>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collections(collections: HashMap<CollectionKey, Vec<ContentItem>>) -> Self {
        Self {
            collections: RwLock::new(collections),
        }
    }

    /// Append `item`, or replace it in place when the id already exists.
    pub async fn insert(&self, collection: &CollectionKey, item: ContentItem) {
        let mut collections = self.collections.write().await;
        let items = collections.entry(collection.clone()).or_default();
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
    }

    pub async fn remove(&self, collection: &CollectionKey, id: &ItemId) -> bool {
        let mut collections = self.collections.write().await;
        let Some(items) = collections.get_mut(collection) else {
            return false;
        };
        let before = items.len();
        items.retain(|item| &item.id != id);
        items.len() != before
    }
}

#[async_trait]
impl ContentIndex for InMemoryCatalog {
    async fn items_exist(
        &self,
        collection: &CollectionKey,
        ids: &[ItemId],
    ) -> Result<HashSet<ItemId>, ContentError> {
        let collections = self.collections.read().await;
        let Some(items) = collections.get(collection) else {
            return Ok(HashSet::new());
        };
        let known: HashSet<&ItemId> = items.iter().map(|item| &item.id).collect();
        Ok(ids
            .iter()
            .filter(|id| known.contains(id))
            .cloned()
            .collect())
    }

    async fn query(
        &self,
        collection: &CollectionKey,
        filter: &ContentFilter,
    ) -> Result<Vec<ContentItem>, ContentError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| filter.matches(item))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
