//! ContentIndex port - host のコンテンツ照会
//!
//! ordering service はコンテンツのライフサイクルを持ちません。
//! 存在確認（reorder の検証）と一覧取得（read path）だけを host に委譲します。

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::{CollectionKey, ContentError, ContentFilter, ContentItem, ItemId};

#[async_trait]
pub trait ContentIndex: Send + Sync {
    /// `ids` のうち、現在 `collection` に存在するものを返す
    async fn items_exist(
        &self,
        collection: &CollectionKey,
        ids: &[ItemId],
    ) -> Result<HashSet<ItemId>, ContentError>;

    /// `filter` に一致するコンテンツを host の自然順で返す
    async fn query(
        &self,
        collection: &CollectionKey,
        filter: &ContentFilter,
    ) -> Result<Vec<ContentItem>, ContentError>;
}
