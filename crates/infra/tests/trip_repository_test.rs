//! TripRepository 統合テスト
//!
//! `DATABASE_URL` が必要なため、デフォルトでは無視される。
//!
//! 実行方法:
//! ```bash
//! cargo test -p planner-infra --test trip_repository_test -- --ignored
//! ```

mod common;

use common::{create_test_trip, insert_trip};
use planner_domain::trip::TripId;
use planner_infra::{
    db::{PgTransactionManager, TransactionManager},
    repository::{PostgresTripRepository, TripRepository},
};
use pretty_assertions::assert_eq;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "DATABASE_URL が必要"]
async fn test_insertした旅行をfind_by_idで取得できる(pool: PgPool) {
    let sut = PostgresTripRepository::new(pool.clone());
    let trip = create_test_trip("Florianópolis", 0);

    insert_trip(&pool, &trip).await;
    let found = sut.find_by_id(trip.id()).await.unwrap();

    assert_eq!(found, Some(trip));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "DATABASE_URL が必要"]
async fn test_存在しない旅行はnoneを返す(pool: PgPool) {
    let sut = PostgresTripRepository::new(pool);

    let found = sut.find_by_id(&TripId::new()).await.unwrap();

    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "DATABASE_URL が必要"]
async fn test_find_allは作成日時順に全件を返す(pool: PgPool) {
    let sut = PostgresTripRepository::new(pool.clone());
    let later = create_test_trip("Lisboa", 60);
    let earlier = create_test_trip("Roma", 0);

    insert_trip(&pool, &later).await;
    insert_trip(&pool, &earlier).await;
    let trips = sut.find_all().await.unwrap();

    assert_eq!(trips, vec![earlier, later]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "DATABASE_URL が必要"]
async fn test_旅行がなければfind_allは空を返す(pool: PgPool) {
    let sut = PostgresTripRepository::new(pool);

    assert!(sut.find_all().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "DATABASE_URL が必要"]
async fn test_mark_confirmedで確認済みになる(pool: PgPool) {
    let sut = PostgresTripRepository::new(pool.clone());
    let trip = create_test_trip("Florianópolis", 0);
    insert_trip(&pool, &trip).await;

    let mut tx = PgTransactionManager::new(pool.clone()).begin().await.unwrap();
    let updated = sut.mark_confirmed(&mut tx, trip.id()).await.unwrap();
    tx.commit().await.unwrap();

    assert!(updated);
    let found = sut.find_by_id(trip.id()).await.unwrap().unwrap();
    assert!(found.is_confirmed());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "DATABASE_URL が必要"]
async fn test_確認済みの旅行へのmark_confirmedはfalseを返す(pool: PgPool) {
    let sut = PostgresTripRepository::new(pool.clone());
    let trip = create_test_trip("Florianópolis", 0);
    insert_trip(&pool, &trip).await;
    let tx_manager = PgTransactionManager::new(pool.clone());

    let mut first_tx = tx_manager.begin().await.unwrap();
    assert!(sut.mark_confirmed(&mut first_tx, trip.id()).await.unwrap());
    first_tx.commit().await.unwrap();

    let mut second_tx = tx_manager.begin().await.unwrap();
    assert!(!sut.mark_confirmed(&mut second_tx, trip.id()).await.unwrap());
    second_tx.commit().await.unwrap();
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "DATABASE_URL が必要"]
async fn test_コミットしないトランザクションはロールバックされる(pool: PgPool) {
    let sut = PostgresTripRepository::new(pool.clone());
    let trip = create_test_trip("Florianópolis", 0);

    {
        let mut tx = PgTransactionManager::new(pool.clone()).begin().await.unwrap();
        sut.insert(&mut tx, &trip).await.unwrap();
    }

    assert!(sut.find_by_id(trip.id()).await.unwrap().is_none());
}
