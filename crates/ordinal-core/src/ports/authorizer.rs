//! Authorizer port - reorder 権限の判定
//!
//! host が提供する capability チェックの結果（bool）だけを使います。

use async_trait::async_trait;

use crate::domain::{Actor, CollectionKey};

#[async_trait]
pub trait Authorizer: Send + Sync {
    /// `actor` が `collection` の並び替え権限を持つか
    async fn can_reorder(&self, actor: &Actor, collection: &CollectionKey) -> bool;
}
