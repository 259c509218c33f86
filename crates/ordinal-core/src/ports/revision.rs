//! RevisionGenerator port - Revision 生成の抽象化
//!
//! テスト容易性のために trait として抽象化しています。
//!
//! # 実装
//! - **UlidRevisions**: Clock ベースの ULID（本番用）

use std::sync::Arc;

use ulid::Ulid;

use crate::domain::Revision;
use crate::ports::Clock;

/// RevisionGenerator はコミットごとの Revision を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数タスクから同時に reorder される）
pub trait RevisionGenerator: Send + Sync {
    fn next_revision(&self) -> Revision;
}

/// UlidRevisions は ULID ベースの Revision 生成器
///
/// Clock の時刻を timestamp 部分に使うので、FixedClock を渡すと
/// timestamp が固定された Revision が得られます。
pub struct UlidRevisions {
    clock: Arc<dyn Clock>,
}

impl UlidRevisions {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl RevisionGenerator for UlidRevisions {
    fn next_revision(&self) -> Revision {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Revision::from(Ulid::from_parts(timestamp_ms, rand::random()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn revisions_are_unique() {
        let revisions = UlidRevisions::new(Arc::new(SystemClock));

        let r1 = revisions.next_revision();
        let r2 = revisions.next_revision();
        let r3 = revisions.next_revision();

        assert_ne!(r1, r2);
        assert_ne!(r2, r3);
        assert_ne!(r1, r3);
    }

    #[test]
    fn fixed_clock_pins_the_timestamp() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let revisions = UlidRevisions::new(Arc::new(FixedClock::new(fixed_time)));

        let r1 = revisions.next_revision();
        let r2 = revisions.next_revision();

        // ランダム部分があるので ID は異なる
        assert_ne!(r1, r2);

        // timestamp 部分は同じ
        assert_eq!(r1.as_ulid().timestamp_ms(), r2.as_ulid().timestamp_ms());
        assert_eq!(
            r1.as_ulid().timestamp_ms(),
            fixed_time.timestamp_millis() as u64
        );
    }
}
