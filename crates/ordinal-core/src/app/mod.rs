//! App - アプリケーション層
//!
//! ports を組み合わせて ordering service のロジックを実装します。
//!
//! # 主要コンポーネント
//! - **OrderStore**: rank のアトミックな置き換えと無効化通知
//! - **OrderingApi**: reorder の認可・検証・適用（reconcile / reset も）
//! - **QueryAdapter**: コンテンツ照会結果を rank 順に並べる read path
//! - **AppBuilder**: ワイヤリングと起動時検証

pub mod builder;
pub mod order_store;
pub mod ordering_api;
pub mod query_adapter;

#[cfg(test)]
pub(crate) mod fixtures;

pub use self::builder::{App, AppBuilder, BuildError};
pub use self::order_store::OrderStore;
pub use self::ordering_api::OrderingApi;
pub use self::query_adapter::{ListedItem, OrderedListing, QueryAdapter};
