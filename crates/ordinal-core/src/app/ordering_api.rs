//! OrderingApi - reorder リクエストの検証と適用
//!
//! # 検証順序
//! 1. 認可（Authorizer）→ 失敗なら Forbidden
//! 2. 入力（空・重複）→ 失敗なら InvalidInput
//! 3. 存在確認（ContentIndex）→ 解決できない ID は skipped に入れて続行
//!
//! 書き込みは OrderStore::set_order に委譲します（上書きのみ・差分なし）。
//! 同じ入力を 2 回送っても最終的な rank は同じです。

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use super::order_store::OrderStore;
use crate::domain::{
    Actor, ApiError, CollectionKey, ItemId, OrderSnapshot, OrderSummary, ReconcileSummary,
    ReorderRequest, StoreError,
};
use crate::ports::{Authorizer, ContentIndex};

const RECONCILE_ATTEMPTS: usize = 3;

pub struct OrderingApi {
    store: Arc<OrderStore>,
    authorizer: Arc<dyn Authorizer>,
    content: Arc<dyn ContentIndex>,
}

impl OrderingApi {
    pub fn new(
        store: Arc<OrderStore>,
        authorizer: Arc<dyn Authorizer>,
        content: Arc<dyn ContentIndex>,
    ) -> Self {
        Self {
            store,
            authorizer,
            content,
        }
    }

    pub async fn reorder(&self, request: ReorderRequest) -> Result<OrderSummary, ApiError> {
        let ReorderRequest {
            collection,
            ordered_item_ids,
            actor,
        } = request;

        self.authorize(&actor, &collection).await?;
        validate_sequence(&ordered_item_ids)?;

        let existing = self
            .content
            .items_exist(&collection, &ordered_item_ids)
            .await?;
        let (kept, skipped): (Vec<ItemId>, Vec<ItemId>) = ordered_item_ids
            .into_iter()
            .partition(|id| existing.contains(id));
        if !skipped.is_empty() {
            warn!(%collection, %actor, skipped = ?skipped, "dropping ids unknown to the content store");
        }

        if kept.is_empty() {
            let current = self.store.get_order(&collection).await?;
            if current.is_empty() {
                return Ok(OrderSummary {
                    collection,
                    applied: 0,
                    skipped,
                    revision: current.revision,
                });
            }
        }

        let snapshot = self.store.set_order(&collection, &kept).await?;
        info!(%collection, %actor, applied = kept.len(), "reorder applied");

        Ok(OrderSummary {
            collection,
            applied: kept.len(),
            skipped,
            revision: snapshot.revision,
        })
    }

    pub async fn order(&self, collection: &CollectionKey) -> Result<OrderSnapshot, ApiError> {
        Ok(self.store.get_order(collection).await?)
    }

    /// Drop ranks whose items no longer exist and close the gaps.
    ///
    /// Nothing is written when the assignment is already clean. The rewrite
    /// only lands over the revision it was computed from; if a reorder
    /// commits in between, the pass starts over from the newer order.
    pub async fn reconcile(
        &self,
        collection: &CollectionKey,
        actor: &Actor,
    ) -> Result<ReconcileSummary, ApiError> {
        self.authorize(actor, collection).await?;

        for _ in 0..RECONCILE_ATTEMPTS {
            let current = self.store.get_order(collection).await?;
            let ranked: Vec<ItemId> = current.items().cloned().collect();
            if ranked.is_empty() {
                return Ok(ReconcileSummary {
                    collection: collection.clone(),
                    kept: 0,
                    removed: Vec::new(),
                    revision: current.revision,
                });
            }

            let existing = self.content.items_exist(collection, &ranked).await?;
            let (kept, removed): (Vec<ItemId>, Vec<ItemId>) =
                ranked.into_iter().partition(|id| existing.contains(id));

            if removed.is_empty() && current.is_contiguous() {
                return Ok(ReconcileSummary {
                    collection: collection.clone(),
                    kept: kept.len(),
                    removed,
                    revision: current.revision,
                });
            }

            let Some(snapshot) = self
                .store
                .set_order_if(collection, current.revision, &kept)
                .await?
            else {
                continue;
            };
            info!(%collection, %actor, kept = kept.len(), removed = removed.len(), "order reconciled");

            return Ok(ReconcileSummary {
                collection: collection.clone(),
                kept: kept.len(),
                removed,
                revision: snapshot.revision,
            });
        }

        warn!(%collection, %actor, "order kept changing during reconcile");
        Err(ApiError::Store(StoreError::WriteFailed {
            collection: collection.clone(),
            reason: "order kept changing during reconcile".to_string(),
        }))
    }

    /// Forget the explicit order; every item falls back to natural order.
    pub async fn reset(&self, collection: &CollectionKey, actor: &Actor) -> Result<bool, ApiError> {
        self.authorize(actor, collection).await?;
        Ok(self.store.clear_order(collection).await?)
    }

    /// Fail with `Forbidden` unless `actor` may change `collection`.
    ///
    /// Every write runs this first. Transports call it too, before they
    /// decode a request body.
    pub async fn authorize(&self, actor: &Actor, collection: &CollectionKey) -> Result<(), ApiError> {
        if self.authorizer.can_reorder(actor, collection).await {
            return Ok(());
        }
        warn!(%collection, %actor, "reorder capability missing");
        Err(ApiError::Forbidden {
            actor: actor.clone(),
            collection: collection.clone(),
        })
    }
}

fn validate_sequence(ids: &[ItemId]) -> Result<(), ApiError> {
    if ids.is_empty() {
        return Err(ApiError::InvalidInput(
            "ordered item list must not be empty".to_string(),
        ));
    }
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id) {
            return Err(ApiError::InvalidInput(format!("duplicate item id {id}")));
        }
    }
    Ok(())
}
