//! Shared test fixtures for the app layer.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::builder::{App, AppBuilder};
use super::{OrderingApi, QueryAdapter};
use crate::domain::{Actor, CollectionKey, ContentError, ContentFilter, ContentItem, ItemId};
use crate::impls::{CapabilityTable, InMemoryCatalog, InMemoryRankRepository};
use crate::ports::{CacheInvalidator, ContentIndex};

pub fn key(name: &str) -> CollectionKey {
    CollectionKey::new(name).unwrap()
}

pub fn ids(raw: &[i64]) -> Vec<ItemId> {
    raw.iter().copied().map(ItemId::from).collect()
}

/// Records every invalidation in emit order.
#[derive(Default)]
pub struct RecordingInvalidator {
    seen: Mutex<Vec<CollectionKey>>,
}

impl RecordingInvalidator {
    pub fn seen(&self) -> Vec<CollectionKey> {
        self.seen.lock().unwrap().clone()
    }
}

impl CacheInvalidator for RecordingInvalidator {
    fn invalidate(&self, collection: &CollectionKey) {
        self.seen.lock().unwrap().push(collection.clone());
    }
}

/// Content index that can hold the next `items_exist` call until released.
pub struct GatedCatalog {
    inner: Arc<InMemoryCatalog>,
    armed: AtomicBool,
    parked: Notify,
    release: Notify,
}

impl GatedCatalog {
    pub fn new(inner: Arc<InMemoryCatalog>) -> Self {
        Self {
            inner,
            armed: AtomicBool::new(false),
            parked: Notify::new(),
            release: Notify::new(),
        }
    }

    /// Park the next `items_exist` call. Later calls pass straight through.
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Resolves once a call is parked.
    pub async fn wait_parked(&self) {
        self.parked.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl ContentIndex for GatedCatalog {
    async fn items_exist(
        &self,
        collection: &CollectionKey,
        ids: &[ItemId],
    ) -> Result<HashSet<ItemId>, ContentError> {
        if self.armed.swap(false, Ordering::SeqCst) {
            self.parked.notify_one();
            self.release.notified().await;
        }
        self.inner.items_exist(collection, ids).await
    }

    async fn query(
        &self,
        collection: &CollectionKey,
        filter: &ContentFilter,
    ) -> Result<Vec<ContentItem>, ContentError> {
        self.inner.query(collection, filter).await
    }
}

/// An app over in-memory adapters, with handles kept for poking at them.
///
/// - `event` collection: 1 "Opening night", 2 "Gala" (draft), 3 "Picnic"
/// - `editor` may reorder `event`; `admin` may reorder anything
/// - content lookups go through `gate`, unarmed by default
pub struct TestApp {
    pub api: OrderingApi,
    pub query: QueryAdapter,
    pub catalog: Arc<InMemoryCatalog>,
    pub gate: Arc<GatedCatalog>,
    pub ranks: Arc<InMemoryRankRepository>,
    pub invalidations: Arc<RecordingInvalidator>,
}

impl TestApp {
    pub async fn new() -> Self {
        let catalog = Arc::new(InMemoryCatalog::new());
        let event = key("event");
        catalog.insert(&event, ContentItem::new(1, "Opening night")).await;
        catalog
            .insert(&event, ContentItem::new(2, "Gala").with_status("draft"))
            .await;
        catalog.insert(&event, ContentItem::new(3, "Picnic")).await;

        let gate = Arc::new(GatedCatalog::new(catalog.clone()));
        let ranks = Arc::new(InMemoryRankRepository::new());
        let invalidations = Arc::new(RecordingInvalidator::default());
        let authorizer = CapabilityTable::new()
            .grant(Actor::new("editor"), event)
            .grant_all(Actor::new("admin"));

        let App { api, query } = AppBuilder::new()
            .with_authorizer(Arc::new(authorizer))
            .with_content_index(gate.clone())
            .with_rank_repository(ranks.clone())
            .with_invalidator(invalidations.clone())
            .build()
            .unwrap();

        Self {
            api,
            query,
            catalog,
            gate,
            ranks,
            invalidations,
        }
    }
}
