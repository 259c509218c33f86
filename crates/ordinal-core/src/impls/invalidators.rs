//! CacheInvalidator の実装
//!
//! - NoopInvalidator: 何もしない（キャッシュを持たない構成用）
//! - BroadcastInvalidator: tokio の broadcast channel で collection key を流す

use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::CollectionKey;
use crate::ports::CacheInvalidator;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInvalidator;

impl CacheInvalidator for NoopInvalidator {
    fn invalidate(&self, _collection: &CollectionKey) {}
}

/// Fans invalidations out to every subscriber.
///
/// A slow subscriber that falls more than `capacity` messages behind gets
/// `RecvError::Lagged` and should treat every collection as stale.
#[derive(Debug, Clone)]
pub struct BroadcastInvalidator {
    tx: broadcast::Sender<CollectionKey>,
}

impl BroadcastInvalidator {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CollectionKey> {
        self.tx.subscribe()
    }
}

impl CacheInvalidator for BroadcastInvalidator {
    fn invalidate(&self, collection: &CollectionKey) {
        // send は受信者がいないときだけ失敗する
        match self.tx.send(collection.clone()) {
            Ok(receivers) => debug!(%collection, receivers, "invalidation emitted"),
            Err(_) => debug!(%collection, "invalidation emitted with no subscribers"),
        }
    }
}
