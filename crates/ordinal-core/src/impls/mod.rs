//! Implementations (ports の実装)
//!
//! - **InMemoryRankRepository**: 開発・テスト用の rank テーブル（fault injection 付き）
//! - **InMemoryCatalog**: host のコンテンツストアの代役
//! - **CapabilityTable**: 静的な権限テーブル
//! - **NoopInvalidator / BroadcastInvalidator**: キャッシュ無効化通知

pub mod capability_table;
pub mod inmem_catalog;
pub mod inmem_ranks;
pub mod invalidators;

pub use self::capability_table::CapabilityTable;
pub use self::inmem_catalog::InMemoryCatalog;
pub use self::inmem_ranks::InMemoryRankRepository;
pub use self::invalidators::{BroadcastInvalidator, NoopInvalidator};
