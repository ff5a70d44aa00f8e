//! # 旅行
//!
//! 旅行（Trip）エンティティと、その日程ルールを定義する。
//!
//! ## ライフサイクル
//!
//! ```text
//! new() ──▶ 未確認 (is_confirmed = false) ──confirmed()──▶ 確認済み
//! ```
//!
//! 確認済みの旅行が未確認に戻ることはない。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use chrono::{Duration, Utc};
//! use planner_domain::trip::{Destination, NewTrip, Trip, TripId};
//!
//! let now = Utc::now();
//! let trip = Trip::new(NewTrip {
//!     id:          TripId::new(),
//!     destination: Destination::new("Florianópolis")?,
//!     starts_at:   now + Duration::days(1),
//!     ends_at:     now + Duration::days(5),
//!     now,
//! })?;
//!
//! assert!(!trip.is_confirmed());
//! assert!(trip.confirmed().is_confirmed());
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};

use crate::DomainError;

define_uuid_id! {
    /// 旅行の一意識別子
    pub struct TripId;
}

/// 開始日が過去の場合のエラーメッセージ
pub const INVALID_START_DATE_MESSAGE: &str = "Invalid trip start date!";

/// 終了日が開始日より前の場合のエラーメッセージ
pub const INVALID_END_DATE_MESSAGE: &str = "Invalid trip end date!";

// =========================================================================
// Destination（目的地）
// =========================================================================

define_validated_string! {
    /// 目的地（値オブジェクト）
    ///
    /// 4 文字以上。空白も 1 文字として数える。
    pub struct Destination {
        label: "目的地",
        min_length: 4,
    }
}

// =========================================================================
// Trip（旅行エンティティ）
// =========================================================================

/// 旅行作成パラメータ
pub struct NewTrip {
    pub id:          TripId,
    pub destination: Destination,
    pub starts_at:   DateTime<Utc>,
    pub ends_at:     DateTime<Utc>,
    /// 日程検証の基準となる現在時刻
    pub now:         DateTime<Utc>,
}

/// DB から復元する際の行データ
pub struct TripRecord {
    pub id:           TripId,
    pub destination:  Destination,
    pub starts_at:    DateTime<Utc>,
    pub ends_at:      DateTime<Utc>,
    pub is_confirmed: bool,
    pub created_at:   DateTime<Utc>,
}

/// 旅行エンティティ
///
/// # 不変条件
///
/// - 作成時点で `starts_at` は現在時刻以降
/// - `ends_at` は `starts_at` 以降
/// - `is_confirmed` は一度 true になったら false に戻らない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    id:           TripId,
    destination:  Destination,
    starts_at:    DateTime<Utc>,
    ends_at:      DateTime<Utc>,
    is_confirmed: bool,
    created_at:   DateTime<Utc>,
}

impl Trip {
    /// 新しい旅行を作成する
    ///
    /// 日程の検証は永続化より前に行われる。
    ///
    /// # エラー
    ///
    /// - `starts_at` が `now` より前: [`INVALID_START_DATE_MESSAGE`]
    /// - `ends_at` が `starts_at` より前: [`INVALID_END_DATE_MESSAGE`]
    pub fn new(params: NewTrip) -> Result<Self, DomainError> {
        if params.starts_at < params.now {
            return Err(DomainError::Validation(
                INVALID_START_DATE_MESSAGE.to_string(),
            ));
        }

        if params.ends_at < params.starts_at {
            return Err(DomainError::Validation(
                INVALID_END_DATE_MESSAGE.to_string(),
            ));
        }

        Ok(Self {
            id:           params.id,
            destination:  params.destination,
            starts_at:    params.starts_at,
            ends_at:      params.ends_at,
            is_confirmed: false,
            created_at:   params.now,
        })
    }

    /// データベースから旅行を復元する
    ///
    /// 過去の日程を含む行も復元できるよう、日程の検証は行わない。
    pub fn from_db(record: TripRecord) -> Self {
        Self {
            id:           record.id,
            destination:  record.destination,
            starts_at:    record.starts_at,
            ends_at:      record.ends_at,
            is_confirmed: record.is_confirmed,
            created_at:   record.created_at,
        }
    }

    /// 確認済みの旅行を返す（冪等）
    pub fn confirmed(self) -> Self {
        Self {
            is_confirmed: true,
            ..self
        }
    }

    pub fn id(&self) -> &TripId {
        &self.id
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    pub fn is_confirmed(&self) -> bool {
        self.is_confirmed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// メール件名などで使う長い日付表記（例: `October 18, 2026`）
pub fn format_long_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn new_trip(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<Trip, DomainError> {
        Trip::new(NewTrip {
            id: TripId::new(),
            destination: Destination::new("Florianópolis").unwrap(),
            starts_at,
            ends_at,
            now: fixed_now(),
        })
    }

    #[rstest]
    #[case("Rio")]
    #[case("   ")]
    #[case("")]
    fn test_目的地が4文字未満なら拒否する(#[case] input: &str) {
        assert!(matches!(
            Destination::new(input),
            Err(DomainError::Validation(_))
        ));
    }

    #[rstest]
    #[case("Roma")]
    #[case("  Rio  ")]
    #[case("São Paulo")]
    fn test_目的地は入力どおりに保持する(#[case] input: &str) {
        assert_eq!(Destination::new(input).unwrap().as_str(), input);
    }

    #[test]
    fn test_目的地に上限文字数はない() {
        let long = "a".repeat(1_000);

        assert_eq!(Destination::new(long.clone()).unwrap().into_string(), long);
    }

    #[test]
    fn test_未来の日程で未確認の旅行を作成できる() {
        let trip = new_trip(
            fixed_now() + Duration::days(1),
            fixed_now() + Duration::days(5),
        )
        .unwrap();

        assert!(!trip.is_confirmed());
        assert_eq!(trip.created_at(), fixed_now());
        assert_eq!(trip.destination().as_str(), "Florianópolis");
    }

    #[test]
    fn test_開始日と終了日が同じ旅行を作成できる() {
        let day = fixed_now() + Duration::days(2);

        assert!(new_trip(day, day).is_ok());
    }

    #[test]
    fn test_開始日が過去なら拒否する() {
        let result = new_trip(
            fixed_now() - Duration::seconds(1),
            fixed_now() + Duration::days(5),
        );

        let Err(DomainError::Validation(message)) = result else {
            panic!("Validation エラーを期待した: {result:?}");
        };
        assert_eq!(message, INVALID_START_DATE_MESSAGE);
    }

    #[test]
    fn test_終了日が開始日より前なら拒否する() {
        let result = new_trip(
            fixed_now() + Duration::days(5),
            fixed_now() + Duration::days(1),
        );

        let Err(DomainError::Validation(message)) = result else {
            panic!("Validation エラーを期待した: {result:?}");
        };
        assert_eq!(message, INVALID_END_DATE_MESSAGE);
    }

    #[test]
    fn test_confirmedは冪等() {
        let trip = new_trip(
            fixed_now() + Duration::days(1),
            fixed_now() + Duration::days(2),
        )
        .unwrap();

        let once = trip.confirmed();
        let twice = once.clone().confirmed();

        assert!(once.is_confirmed());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_from_dbは過去の日程も復元する() {
        let trip = Trip::from_db(TripRecord {
            id:           TripId::new(),
            destination:  Destination::new("Lisboa").unwrap(),
            starts_at:    fixed_now() - Duration::days(30),
            ends_at:      fixed_now() - Duration::days(20),
            is_confirmed: true,
            created_at:   fixed_now() - Duration::days(40),
        });

        assert!(trip.is_confirmed());
        assert_eq!(trip.starts_at(), fixed_now() - Duration::days(30));
    }

    #[test]
    fn test_format_long_dateは月名と日と年を出力する() {
        let date = Utc.with_ymd_and_hms(2026, 10, 8, 9, 30, 0).unwrap();

        assert_eq!(format_long_date(date), "October 8, 2026");
    }
}
