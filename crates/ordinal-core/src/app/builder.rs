//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - ports の明示的な注入（グローバル状態に頼らない）

use std::sync::Arc;

use super::order_store::OrderStore;
use super::ordering_api::OrderingApi;
use super::query_adapter::QueryAdapter;
use crate::impls::{InMemoryRankRepository, NoopInvalidator};
use crate::ports::{
    Authorizer, CacheInvalidator, Clock, ContentIndex, RankRepository, SystemClock,
    UlidRevisions,
};

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new()
///     .with_authorizer(Arc::new(capabilities))
///     .with_content_index(Arc::new(catalog))
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - Authorizer と ContentIndex は host 側にしか用意できないので必須
/// - 不足があれば build() が BuildError を返す
/// - RankRepository / CacheInvalidator / Clock は開発用のデフォルトを使う
#[derive(Default)]
pub struct AppBuilder {
    authorizer: Option<Arc<dyn Authorizer>>,
    content: Option<Arc<dyn ContentIndex>>,
    ranks: Option<Arc<dyn RankRepository>>,
    invalidator: Option<Arc<dyn CacheInvalidator>>,
    clock: Option<Arc<dyn Clock>>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("missing collaborator: {0}. Register it on AppBuilder before build().")]
    Missing(&'static str),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    pub fn with_content_index(mut self, content: Arc<dyn ContentIndex>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_rank_repository(mut self, ranks: Arc<dyn RankRepository>) -> Self {
        self.ranks = Some(ranks);
        self
    }

    pub fn with_invalidator(mut self, invalidator: Arc<dyn CacheInvalidator>) -> Self {
        self.invalidator = Some(invalidator);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        let authorizer = self.authorizer.ok_or(BuildError::Missing("authorizer"))?;
        let content = self.content.ok_or(BuildError::Missing("content index"))?;

        let ranks = self
            .ranks
            .unwrap_or_else(|| Arc::new(InMemoryRankRepository::new()));
        let invalidator = self
            .invalidator
            .unwrap_or_else(|| Arc::new(NoopInvalidator));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let revisions = Arc::new(UlidRevisions::new(clock.clone()));

        let store = Arc::new(OrderStore::new(ranks, invalidator, clock, revisions));
        Ok(App {
            api: OrderingApi::new(store.clone(), authorizer, content.clone()),
            query: QueryAdapter::new(store, content),
        })
    }
}

/// App は write path（OrderingApi）と read path（QueryAdapter）の組
///
/// 両者は同じ OrderStore を共有します。
pub struct App {
    pub api: OrderingApi,
    pub query: QueryAdapter,
}
