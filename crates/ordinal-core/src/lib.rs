//! ordinal-core
//!
//! Drag-and-drop ordering for content collections: explicit integer ranks per
//! (collection, item), replaced atomically on every reorder.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, rank, content, reorder, errors）
//! - **ports**: 抽象化レイヤー（RankRepository, Authorizer, ContentIndex, CacheInvalidator, Clock）
//! - **app**: アプリケーションロジック（OrderStore, OrderingApi, QueryAdapter, AppBuilder）
//! - **impls**: 実装（InMemoryRankRepository などの開発用 adapter）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{App, AppBuilder, BuildError, OrderedListing, OrderingApi, QueryAdapter};
pub use domain::{
    Actor, ApiError, CollectionKey, ContentFilter, ContentItem, ItemId, OrderSnapshot,
    OrderSummary, ReconcileSummary, ReorderRequest,
};
