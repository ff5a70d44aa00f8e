//! # 時刻プロバイダ
//!
//! 旅行日程の検証（開始日が過去でないか）と作成日時の記録は、
//! すべてユースケースに注入された [`Clock`] の時刻を基準にする。

use chrono::{DateTime, Utc};

/// 「現在」を決めるトレイト
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 本番用: システム時刻
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// テスト用: 生成時に渡した時刻を返し続ける
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
