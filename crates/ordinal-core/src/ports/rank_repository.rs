//! RankRepository port - rank の正本（source of truth）
//!
//! # 設計原則
//! - `replace` は collection 単位で all-or-nothing
//! - 途中まで書かれた順序が reader から見えてはいけない
//! - 失敗した `replace` は以前の割り当てをそのまま残す
//! - 同じ collection 内で同じ item が 2 度現れたら制約違反（WriteFailed）
//! - `replace_if` は revision の比較と差し替えを 1 つの critical section で行う

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CollectionKey, ItemId, OrderSnapshot, Revision, StoreError};

#[async_trait]
pub trait RankRepository: Send + Sync {
    /// `collection` の割り当て全体を `ordered`（rank = index）で置き換える
    async fn replace(
        &self,
        collection: &CollectionKey,
        ordered: &[ItemId],
        revision: Revision,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// 現在の revision が `expected` のときだけ置き換える
    ///
    /// `expected = None` は「割り当てがまだ無い」を意味する。
    /// 一致しなければ何も書かずに `Ok(false)`。
    async fn replace_if(
        &self,
        collection: &CollectionKey,
        expected: Option<Revision>,
        ordered: &[ItemId],
        revision: Revision,
        at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    /// 現在の割り当て（rank 昇順）
    async fn load(&self, collection: &CollectionKey) -> Result<OrderSnapshot, StoreError>;

    /// 割り当てを削除する。何か削除したら true
    async fn remove(&self, collection: &CollectionKey) -> Result<bool, StoreError>;
}
