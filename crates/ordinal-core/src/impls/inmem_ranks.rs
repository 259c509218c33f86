//! InMemoryRankRepository - 開発・テスト用の rank テーブル
//!
//! # 実装詳細
//! - HashMap<CollectionKey, StoredOrder> を tokio の RwLock で保護
//! - replace は新しいテーブルを lock の外で完全に組み立ててから、
//!   write lock の中で 1 回の insert で差し替える
//! - staging 中に失敗（または cancel）しても以前の割り当ては残る
//! - replace_if は同じ write lock の中で revision を比較してから差し替える
//!
//! # Fault injection
//! - `fail_writes_after(n)`: 次の replace を n 行 stage した時点で失敗させる
//! - `fail_next_read()`: 次の load を失敗させる

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::domain::{CollectionKey, ItemId, OrderSnapshot, Revision, StoreError};
use crate::ports::RankRepository;

struct StoredOrder {
    items: Vec<ItemId>,
    revision: Revision,
    updated_at: DateTime<Utc>,
}

#[derive(Default)]
struct Faults {
    write_after: Option<usize>,
    fail_read: bool,
}

#[derive(Default)]
pub struct InMemoryRankRepository {
    tables: RwLock<HashMap<CollectionKey, StoredOrder>>,
    faults: Mutex<Faults>,
}

impl InMemoryRankRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `replace` fail once `rows` rows have been staged.
    /// `rows >= len` fails right before the commit swap.
    pub async fn fail_writes_after(&self, rows: usize) {
        self.faults.lock().await.write_after = Some(rows);
    }

    pub async fn fail_next_read(&self) {
        self.faults.lock().await.fail_read = true;
    }

    /// Number of collections that currently hold an assignment.
    pub async fn collection_count(&self) -> usize {
        self.tables.read().await.len()
    }
}

fn write_failed(collection: &CollectionKey, reason: impl Into<String>) -> StoreError {
    StoreError::WriteFailed {
        collection: collection.clone(),
        reason: reason.into(),
    }
}

impl InMemoryRankRepository {
    /// Build the new table outside the lock. Fails without touching the
    /// committed assignment.
    async fn stage(
        &self,
        collection: &CollectionKey,
        ordered: &[ItemId],
    ) -> Result<Vec<ItemId>, StoreError> {
        let fault = self.faults.lock().await.write_after.take();

        let mut staged = Vec::with_capacity(ordered.len());
        let mut seen = HashSet::with_capacity(ordered.len());
        for (row, item) in ordered.iter().enumerate() {
            if fault == Some(row) {
                return Err(write_failed(
                    collection,
                    format!("injected fault after {row} rows"),
                ));
            }
            if !seen.insert(item) {
                return Err(write_failed(
                    collection,
                    format!("unique constraint violated by item {item}"),
                ));
            }
            staged.push(item.clone());
        }
        if fault.is_some() {
            return Err(write_failed(collection, "injected fault at commit"));
        }
        Ok(staged)
    }
}

#[async_trait]
impl RankRepository for InMemoryRankRepository {
    async fn replace(
        &self,
        collection: &CollectionKey,
        ordered: &[ItemId],
        revision: Revision,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let items = self.stage(collection, ordered).await?;

        let mut tables = self.tables.write().await;
        tables.insert(
            collection.clone(),
            StoredOrder {
                items,
                revision,
                updated_at: at,
            },
        );
        Ok(())
    }

    async fn replace_if(
        &self,
        collection: &CollectionKey,
        expected: Option<Revision>,
        ordered: &[ItemId],
        revision: Revision,
        at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let items = self.stage(collection, ordered).await?;

        let mut tables = self.tables.write().await;
        if tables.get(collection).map(|stored| stored.revision) != expected {
            return Ok(false);
        }
        tables.insert(
            collection.clone(),
            StoredOrder {
                items,
                revision,
                updated_at: at,
            },
        );
        Ok(true)
    }

    async fn load(&self, collection: &CollectionKey) -> Result<OrderSnapshot, StoreError> {
        if std::mem::take(&mut self.faults.lock().await.fail_read) {
            return Err(StoreError::ReadFailed {
                collection: collection.clone(),
                reason: "injected read fault".to_string(),
            });
        }

        let tables = self.tables.read().await;
        Ok(match tables.get(collection) {
            Some(stored) => OrderSnapshot::from_sequence(
                collection.clone(),
                &stored.items,
                stored.revision,
                stored.updated_at,
            ),
            None => OrderSnapshot::empty(collection.clone()),
        })
    }

    async fn remove(&self, collection: &CollectionKey) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.remove(collection).is_some())
    }
}
