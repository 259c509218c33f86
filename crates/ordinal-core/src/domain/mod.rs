//! Domain model (IDs, ranks, content records, requests, errors).

pub mod content;
pub mod errors;
pub mod ids;
pub mod rank;
pub mod reorder;

pub use content::{ContentFilter, ContentItem};
pub use errors::{ApiError, ContentError, ErrorKind, InvalidCollectionKey, StoreError};
pub use ids::{Actor, CollectionKey, ItemId, Revision};
pub use rank::{OrderSnapshot, Rank, RankEntry};
pub use reorder::{OrderSummary, ReconcileSummary, ReorderRequest};
