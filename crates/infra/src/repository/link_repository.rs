//! # LinkRepository
//!
//! 旅行に添付するリンクの永続化を担当するリポジトリ。
//! リンクは作成後に変更されないため、書き込みは挿入のみ。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use planner_domain::{
    link::{Link, LinkId, LinkTitle, LinkUrl},
    trip::TripId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::TxContext, error::InfraError};

/// リンクリポジトリトレイト
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// 旅行のリンクを作成日時順で取得する
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Vec<Link>, InfraError>;

    /// リンクを挿入する
    async fn insert(&self, tx: &mut TxContext, link: &Link) -> Result<(), InfraError>;
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id:         Uuid,
    trip_id:    Uuid,
    title:      String,
    url:        String,
    created_at: DateTime<Utc>,
}

impl TryFrom<LinkRow> for Link {
    type Error = InfraError;

    fn try_from(row: LinkRow) -> Result<Self, Self::Error> {
        let url = LinkUrl::new(row.url).map_err(|e| InfraError::corrupted_row("links", e))?;

        Ok(Link::new(
            LinkId::from_uuid(row.id),
            TripId::from_uuid(row.trip_id),
            LinkTitle::new(row.title),
            url,
            row.created_at,
        ))
    }
}

/// PostgreSQL 実装の LinkRepository
#[derive(Debug, Clone)]
pub struct PostgresLinkRepository {
    pool: PgPool,
}

impl PostgresLinkRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PostgresLinkRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%trip_id))]
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Vec<Link>, InfraError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, trip_id, title, url, created_at
            FROM links
            WHERE trip_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(trip_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Link::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %link.id()))]
    async fn insert(&self, tx: &mut TxContext, link: &Link) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO links (id, trip_id, title, url, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(link.id().as_uuid())
        .bind(link.trip_id().as_uuid())
        .bind(link.title().as_str())
        .bind(link.url().as_str())
        .bind(link.created_at())
        .execute(tx.conn()?)
        .await?;

        Ok(())
    }
}
