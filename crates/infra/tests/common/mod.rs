//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するエンティティ生成ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use planner_domain::{
    participant::{Participant, ParticipantId, ParticipantName},
    trip::{Destination, NewTrip, Trip, TripId},
    value_objects::Email,
};
use planner_infra::{
    db::{PgTransactionManager, TransactionManager},
    repository::{PostgresTripRepository, TripRepository},
};
use sqlx::PgPool;

/// テスト用の固定日時
pub fn test_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// `created_at` をずらした未確認の旅行を作成する
pub fn create_test_trip(destination: &str, offset_secs: i64) -> Trip {
    let now = test_now() + Duration::seconds(offset_secs);
    Trip::new(NewTrip {
        id: TripId::new(),
        destination: Destination::new(destination).unwrap(),
        starts_at: now + Duration::days(1),
        ends_at: now + Duration::days(5),
        now,
    })
    .unwrap()
}

/// 旅行のオーナーを作成する
pub fn create_test_owner(trip: &Trip, email: &str) -> Participant {
    Participant::new_owner(
        ParticipantId::new(),
        trip.id().clone(),
        ParticipantName::new("Ana"),
        Email::new(email).unwrap(),
        trip.created_at(),
    )
}

/// 旅行の招待者を作成する
pub fn create_test_invitee(trip: &Trip, email: &str) -> Participant {
    Participant::new_invitee(
        ParticipantId::new(),
        trip.id().clone(),
        Email::new(email).unwrap(),
        trip.created_at(),
    )
}

/// 旅行を DB に保存する
pub async fn insert_trip(pool: &PgPool, trip: &Trip) {
    let tx_manager = PgTransactionManager::new(pool.clone());
    let mut tx = tx_manager.begin().await.unwrap();
    PostgresTripRepository::new(pool.clone())
        .insert(&mut tx, trip)
        .await
        .unwrap();
    tx.commit().await.unwrap();
}
