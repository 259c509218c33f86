//! Reorder request and result shapes.

use serde::{Deserialize, Serialize};

use super::ids::{Actor, CollectionKey, ItemId, Revision};

/// A full replacement ordered list for one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub collection: CollectionKey,
    pub ordered_item_ids: Vec<ItemId>,
    pub actor: Actor,
}

impl ReorderRequest {
    pub fn new(collection: CollectionKey, ordered_item_ids: Vec<ItemId>, actor: Actor) -> Self {
        Self {
            collection,
            ordered_item_ids,
            actor,
        }
    }
}

/// Result of a successful reorder.
///
/// `skipped` lists ids that did not resolve in the content store, in
/// request order. They are reported, not treated as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub collection: CollectionKey,
    pub applied: usize,
    pub skipped: Vec<ItemId>,
    pub revision: Option<Revision>,
}

/// Result of dropping orphan ranks from a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileSummary {
    pub collection: CollectionKey,
    pub kept: usize,
    pub removed: Vec<ItemId>,
    /// Revision in effect afterwards (unchanged when nothing was rewritten).
    pub revision: Option<Revision>,
}
