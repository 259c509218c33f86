//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義します。
//! ordering service が host（CMS）に依存する箇所はすべてここの trait を通します。
//!
//! # 設計原則
//! - 依存は constructor で明示的に注入する（グローバルな hook 登録はしない）
//! - rank の正本は RankRepository
//! - 認可・コンテンツの存在確認・キャッシュ無効化は host 側の責務

pub mod authorizer;
pub mod cache_invalidator;
pub mod clock;
pub mod content_index;
pub mod rank_repository;
pub mod revision;

pub use self::authorizer::Authorizer;
pub use self::cache_invalidator::CacheInvalidator;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::content_index::ContentIndex;
pub use self::rank_repository::RankRepository;
pub use self::revision::{RevisionGenerator, UlidRevisions};
