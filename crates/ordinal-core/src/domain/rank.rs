//! Rank model: the persisted position of an item within a collection.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CollectionKey, ItemId, Revision};

/// Position of an item within its collection (0 = first).
pub type Rank = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    pub item: ItemId,
    pub rank: Rank,
}

/// The current rank assignment of one collection.
///
/// Entries are sorted ascending by rank, ties broken by item id.
/// A collection that was never ordered has no entries and no revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub collection: CollectionKey,
    pub entries: Vec<RankEntry>,
    pub revision: Option<Revision>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl OrderSnapshot {
    pub fn empty(collection: CollectionKey) -> Self {
        Self {
            collection,
            entries: Vec::new(),
            revision: None,
            updated_at: None,
        }
    }

    /// Build a snapshot where rank = index in `ordered`.
    pub fn from_sequence(
        collection: CollectionKey,
        ordered: &[ItemId],
        revision: Revision,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let entries = ordered
            .iter()
            .enumerate()
            .map(|(index, item)| RankEntry {
                item: item.clone(),
                rank: index as Rank,
            })
            .collect();
        Self {
            collection,
            entries,
            revision: Some(revision),
            updated_at: Some(updated_at),
        }
    }

    /// Build a snapshot from arbitrary entries (e.g. rows read back from a
    /// table with gaps), sorting them into read order.
    pub fn from_entries(
        collection: CollectionKey,
        mut entries: Vec<RankEntry>,
        revision: Option<Revision>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        entries.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.item.cmp(&b.item)));
        Self {
            collection,
            entries,
            revision,
            updated_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Items in rank order.
    pub fn items(&self) -> impl Iterator<Item = &ItemId> {
        self.entries.iter().map(|entry| &entry.item)
    }

    pub fn rank_of(&self, item: &ItemId) -> Option<Rank> {
        self.entries
            .iter()
            .find(|entry| &entry.item == item)
            .map(|entry| entry.rank)
    }

    pub fn rank_map(&self) -> HashMap<&ItemId, Rank> {
        self.entries
            .iter()
            .map(|entry| (&entry.item, entry.rank))
            .collect()
    }

    /// True when ranks are exactly `0..len` in order.
    pub fn is_contiguous(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(index, entry)| entry.rank == index as Rank)
    }
}
