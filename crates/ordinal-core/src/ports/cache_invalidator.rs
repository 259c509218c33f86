//! CacheInvalidator port - キャッシュ無効化の通知
//!
//! コミット成功後に 1 回だけ呼ばれる fire-and-forget な通知です。
//! 通知が届くまでの間、read 側が古い結果を返すことは許容されます
//! （bounded staleness window）。

use crate::domain::CollectionKey;

pub trait CacheInvalidator: Send + Sync {
    fn invalidate(&self, collection: &CollectionKey);
}
