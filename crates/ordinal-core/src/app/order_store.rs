//! OrderStore - rank の書き込みとキャッシュ無効化
//!
//! RankRepository（永続化）と CacheInvalidator（通知）を束ね、
//! 「コミット成功後に 1 回だけ invalidate する」を保証します。
//! 失敗した書き込みでは通知を出しません。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{CollectionKey, ItemId, OrderSnapshot, Revision, StoreError};
use crate::ports::{CacheInvalidator, Clock, RankRepository, RevisionGenerator};

pub struct OrderStore {
    ranks: Arc<dyn RankRepository>,
    invalidator: Arc<dyn CacheInvalidator>,
    clock: Arc<dyn Clock>,
    revisions: Arc<dyn RevisionGenerator>,
}

impl OrderStore {
    pub fn new(
        ranks: Arc<dyn RankRepository>,
        invalidator: Arc<dyn CacheInvalidator>,
        clock: Arc<dyn Clock>,
        revisions: Arc<dyn RevisionGenerator>,
    ) -> Self {
        Self {
            ranks,
            invalidator,
            clock,
            revisions,
        }
    }

    /// Replace the whole assignment of `collection` with `ordered`
    /// (rank = index). All or nothing.
    pub async fn set_order(
        &self,
        collection: &CollectionKey,
        ordered: &[ItemId],
    ) -> Result<OrderSnapshot, StoreError> {
        let revision = self.revisions.next_revision();
        let at = self.clock.now();

        if let Err(err) = self.ranks.replace(collection, ordered, revision, at).await {
            warn!(%collection, error = %err, "rank write rejected");
            return Err(err);
        }
        Ok(self.committed(collection, ordered, revision, at))
    }

    /// Like [`set_order`](Self::set_order), but only while the stored
    /// revision is still `expected`. `Ok(None)` means another write got
    /// there first; nothing was written and nothing is invalidated.
    pub async fn set_order_if(
        &self,
        collection: &CollectionKey,
        expected: Option<Revision>,
        ordered: &[ItemId],
    ) -> Result<Option<OrderSnapshot>, StoreError> {
        let revision = self.revisions.next_revision();
        let at = self.clock.now();

        match self
            .ranks
            .replace_if(collection, expected, ordered, revision, at)
            .await
        {
            Ok(true) => Ok(Some(self.committed(collection, ordered, revision, at))),
            Ok(false) => {
                debug!(%collection, "order changed since it was read; write skipped");
                Ok(None)
            }
            Err(err) => {
                warn!(%collection, error = %err, "rank write rejected");
                Err(err)
            }
        }
    }

    fn committed(
        &self,
        collection: &CollectionKey,
        ordered: &[ItemId],
        revision: Revision,
        at: DateTime<Utc>,
    ) -> OrderSnapshot {
        self.invalidator.invalidate(collection);
        info!(%collection, items = ordered.len(), %revision, "order committed");
        OrderSnapshot::from_sequence(collection.clone(), ordered, revision, at)
    }

    pub async fn get_order(&self, collection: &CollectionKey) -> Result<OrderSnapshot, StoreError> {
        let snapshot = self.ranks.load(collection).await?;
        debug!(%collection, entries = snapshot.len(), "order loaded");
        Ok(snapshot)
    }

    /// Drop every rank of `collection`. Returns whether anything was removed.
    pub async fn clear_order(&self, collection: &CollectionKey) -> Result<bool, StoreError> {
        let removed = self.ranks.remove(collection).await?;
        if removed {
            self.invalidator.invalidate(collection);
            info!(%collection, "order cleared");
        }
        Ok(removed)
    }
}
