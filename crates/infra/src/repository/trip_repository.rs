//! # TripRepository
//!
//! 旅行の永続化を担当するリポジトリ。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use planner_domain::trip::{Destination, Trip, TripId, TripRecord};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::TxContext, error::InfraError};

/// 旅行リポジトリトレイト
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// ID で旅行を検索する
    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, InfraError>;

    /// 全旅行を作成日時順で取得する
    async fn find_all(&self) -> Result<Vec<Trip>, InfraError>;

    /// 旅行を挿入する
    async fn insert(&self, tx: &mut TxContext, trip: &Trip) -> Result<(), InfraError>;

    /// 未確認の旅行を確認済みにする
    ///
    /// 更新した場合は `true`。既に確認済み（または存在しない）なら `false`。
    async fn mark_confirmed(&self, tx: &mut TxContext, id: &TripId) -> Result<bool, InfraError>;
}

#[derive(sqlx::FromRow)]
struct TripRow {
    id:           Uuid,
    destination:  String,
    starts_at:    DateTime<Utc>,
    ends_at:      DateTime<Utc>,
    is_confirmed: bool,
    created_at:   DateTime<Utc>,
}

impl TryFrom<TripRow> for Trip {
    type Error = InfraError;

    fn try_from(row: TripRow) -> Result<Self, Self::Error> {
        let destination =
            Destination::new(row.destination).map_err(|e| InfraError::corrupted_row("trips", e))?;

        Ok(Trip::from_db(TripRecord {
            id: TripId::from_uuid(row.id),
            destination,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
            is_confirmed: row.is_confirmed,
            created_at: row.created_at,
        }))
    }
}

/// PostgreSQL 実装の TripRepository
#[derive(Debug, Clone)]
pub struct PostgresTripRepository {
    pool: PgPool,
}

impl PostgresTripRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TripRepository for PostgresTripRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, InfraError> {
        let row = sqlx::query_as::<_, TripRow>(
            r#"
            SELECT id, destination, starts_at, ends_at, is_confirmed, created_at
            FROM trips
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Trip::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Trip>, InfraError> {
        let rows = sqlx::query_as::<_, TripRow>(
            r#"
            SELECT id, destination, starts_at, ends_at, is_confirmed, created_at
            FROM trips
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Trip::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %trip.id()))]
    async fn insert(&self, tx: &mut TxContext, trip: &Trip) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO trips (id, destination, starts_at, ends_at, is_confirmed, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(trip.id().as_uuid())
        .bind(trip.destination().as_str())
        .bind(trip.starts_at())
        .bind(trip.ends_at())
        .bind(trip.is_confirmed())
        .bind(trip.created_at())
        .execute(tx.conn()?)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn mark_confirmed(&self, tx: &mut TxContext, id: &TripId) -> Result<bool, InfraError> {
        let result = sqlx::query(
            "UPDATE trips SET is_confirmed = TRUE WHERE id = $1 AND is_confirmed = FALSE",
        )
        .bind(id.as_uuid())
        .execute(tx.conn()?)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
