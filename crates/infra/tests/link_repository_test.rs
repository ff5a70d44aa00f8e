//! LinkRepository 統合テスト
//!
//! `DATABASE_URL` が必要なため、デフォルトでは無視される。

mod common;

use chrono::Duration;
use common::{create_test_trip, insert_trip, test_now};
use planner_domain::{
    link::{Link, LinkId, LinkTitle, LinkUrl},
    trip::TripId,
};
use planner_infra::{
    db::{PgTransactionManager, TransactionManager},
    repository::{LinkRepository, PostgresLinkRepository},
};
use pretty_assertions::assert_eq;
use sqlx::PgPool;

fn link_for(trip_id: &TripId, title: &str, offset_secs: i64) -> Link {
    Link::new(
        LinkId::new(),
        trip_id.clone(),
        LinkTitle::new(title),
        LinkUrl::new("https://www.airbnb.com/rooms/1").unwrap(),
        test_now() + Duration::seconds(offset_secs),
    )
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "DATABASE_URL が必要"]
async fn test_リンクを旅行ごとに取得できる(pool: PgPool) {
    let sut = PostgresLinkRepository::new(pool.clone());
    let trip = create_test_trip("Florianópolis", 0);
    let other = create_test_trip("Lisboa", 10);
    insert_trip(&pool, &trip).await;
    insert_trip(&pool, &other).await;
    let link = link_for(trip.id(), "Reserva do AirBnB", 0);

    let mut tx = PgTransactionManager::new(pool.clone()).begin().await.unwrap();
    sut.insert(&mut tx, &link).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(sut.find_by_trip(trip.id()).await.unwrap(), vec![link]);
    assert!(sut.find_by_trip(other.id()).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "DATABASE_URL が必要"]
async fn test_リンクは作成日時順で返る(pool: PgPool) {
    let sut = PostgresLinkRepository::new(pool.clone());
    let trip = create_test_trip("Florianópolis", 0);
    insert_trip(&pool, &trip).await;
    let later = link_for(trip.id(), "Passeio de barco", 60);
    let earlier = link_for(trip.id(), "", 0);

    let mut tx = PgTransactionManager::new(pool.clone()).begin().await.unwrap();
    sut.insert(&mut tx, &later).await.unwrap();
    sut.insert(&mut tx, &earlier).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(sut.find_by_trip(trip.id()).await.unwrap(), vec![earlier, later]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "DATABASE_URL が必要"]
async fn test_コミットしないリンクは残らない(pool: PgPool) {
    let sut = PostgresLinkRepository::new(pool.clone());
    let trip = create_test_trip("Florianópolis", 0);
    insert_trip(&pool, &trip).await;

    {
        let mut tx = PgTransactionManager::new(pool.clone()).begin().await.unwrap();
        sut.insert(&mut tx, &link_for(trip.id(), "Reserva", 0)).await.unwrap();
    }

    assert!(sut.find_by_trip(trip.id()).await.unwrap().is_empty());
}
