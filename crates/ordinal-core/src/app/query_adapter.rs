//! QueryAdapter - read path の並び替え
//!
//! host のコンテンツ照会結果と OrderStore の rank を join します。
//! - rank を持つ item: rank 昇順（同 rank は item id 順）
//! - rank を持たない item: その後ろに host の自然順のまま
//!
//! ranked / unranked は永続化せず、読み出し時に rank テーブルの有無から決めます。

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::order_store::OrderStore;
use crate::domain::{ApiError, CollectionKey, ContentFilter, ContentItem, OrderSnapshot, Rank};
use crate::ports::ContentIndex;

pub struct QueryAdapter {
    store: Arc<OrderStore>,
    content: Arc<dyn ContentIndex>,
}

impl QueryAdapter {
    pub fn new(store: Arc<OrderStore>, content: Arc<dyn ContentIndex>) -> Self {
        Self { store, content }
    }

    pub async fn list_ordered(
        &self,
        collection: &CollectionKey,
        filter: &ContentFilter,
    ) -> Result<OrderedListing, ApiError> {
        let items = self.content.query(collection, filter).await?;
        let order = self.store.get_order(collection).await?;
        let listing = OrderedListing::arrange(items, &order);
        debug!(
            %collection,
            total = listing.len(),
            ranked = listing.ranked_count(),
            "ordered listing built"
        );
        Ok(listing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedItem {
    #[serde(flatten)]
    pub item: ContentItem,
    /// `None` while the item has never been explicitly ranked.
    pub rank: Option<Rank>,
}

impl ListedItem {
    pub fn is_ranked(&self) -> bool {
        self.rank.is_some()
    }
}

/// A finite, restartable ordered sequence of content items.
///
/// Every call to [`OrderedListing::iter`] walks the same sequence from the start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrderedListing {
    entries: Vec<ListedItem>,
}

impl OrderedListing {
    pub fn arrange(items: Vec<ContentItem>, order: &OrderSnapshot) -> Self {
        let ranks = order.rank_map();
        let mut ranked = Vec::new();
        let mut unranked = Vec::new();
        for item in items {
            match ranks.get(&item.id) {
                Some(&rank) => ranked.push(ListedItem {
                    item,
                    rank: Some(rank),
                }),
                None => unranked.push(ListedItem { item, rank: None }),
            }
        }
        // sort_by は stable なので unranked 側の自然順はそのまま
        ranked.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.item.id.cmp(&b.item.id)));
        ranked.extend(unranked);
        Self { entries: ranked }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListedItem> + '_ {
        self.entries.iter()
    }

    pub fn items(&self) -> impl Iterator<Item = &ContentItem> + '_ {
        self.entries.iter().map(|entry| &entry.item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ranked_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_ranked()).count()
    }
}

impl<'a> IntoIterator for &'a OrderedListing {
    type Item = &'a ListedItem;
    type IntoIter = std::slice::Iter<'a, ListedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
