//! # ParticipantRepository
//!
//! 参加者の永続化を担当するリポジトリ。
//!
//! 招待者は名前を持たないため `name` は NULL を許容する。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use planner_domain::{
    participant::{Participant, ParticipantId, ParticipantName, ParticipantRecord},
    trip::TripId,
    value_objects::Email,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::TxContext, error::InfraError};

/// 参加者リポジトリトレイト
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// ID で参加者を検索する
    async fn find_by_id(&self, id: &ParticipantId) -> Result<Option<Participant>, InfraError>;

    /// 旅行の全参加者（オーナーを含む）を作成日時順で取得する
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Vec<Participant>, InfraError>;

    /// 旅行の招待者（オーナー以外）を作成日時順で取得する
    async fn find_invitees_by_trip(&self, trip_id: &TripId)
    -> Result<Vec<Participant>, InfraError>;

    /// 参加者を挿入する
    async fn insert(&self, tx: &mut TxContext, participant: &Participant)
    -> Result<(), InfraError>;

    /// 未確認の参加者を確認済みにする。更新した場合は `true`
    async fn mark_confirmed(
        &self,
        tx: &mut TxContext,
        id: &ParticipantId,
    ) -> Result<bool, InfraError>;
}

#[derive(sqlx::FromRow)]
struct ParticipantRow {
    id:           Uuid,
    trip_id:      Uuid,
    name:         Option<String>,
    email:        String,
    is_owner:     bool,
    is_confirmed: bool,
    created_at:   DateTime<Utc>,
}

impl TryFrom<ParticipantRow> for Participant {
    type Error = InfraError;

    fn try_from(row: ParticipantRow) -> Result<Self, Self::Error> {
        let name = row.name.map(ParticipantName::new);
        let email =
            Email::new(row.email).map_err(|e| InfraError::corrupted_row("participants", e))?;

        Ok(Participant::from_db(ParticipantRecord {
            id: ParticipantId::from_uuid(row.id),
            trip_id: TripId::from_uuid(row.trip_id),
            name,
            email,
            is_owner: row.is_owner,
            is_confirmed: row.is_confirmed,
            created_at: row.created_at,
        }))
    }
}

/// PostgreSQL 実装の ParticipantRepository
#[derive(Debug, Clone)]
pub struct PostgresParticipantRepository {
    pool: PgPool,
}

impl PostgresParticipantRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantRepository for PostgresParticipantRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &ParticipantId) -> Result<Option<Participant>, InfraError> {
        let row = sqlx::query_as::<_, ParticipantRow>(
            r#"
            SELECT id, trip_id, name, email, is_owner, is_confirmed, created_at
            FROM participants
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Participant::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%trip_id))]
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Vec<Participant>, InfraError> {
        let rows = sqlx::query_as::<_, ParticipantRow>(
            r#"
            SELECT id, trip_id, name, email, is_owner, is_confirmed, created_at
            FROM participants
            WHERE trip_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(trip_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Participant::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%trip_id))]
    async fn find_invitees_by_trip(
        &self,
        trip_id: &TripId,
    ) -> Result<Vec<Participant>, InfraError> {
        let rows = sqlx::query_as::<_, ParticipantRow>(
            r#"
            SELECT id, trip_id, name, email, is_owner, is_confirmed, created_at
            FROM participants
            WHERE trip_id = $1 AND is_owner = FALSE
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(trip_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Participant::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %participant.id()))]
    async fn insert(
        &self,
        tx: &mut TxContext,
        participant: &Participant,
    ) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO participants (id, trip_id, name, email, is_owner, is_confirmed, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(participant.id().as_uuid())
        .bind(participant.trip_id().as_uuid())
        .bind(participant.name().map(ParticipantName::as_str))
        .bind(participant.email().as_str())
        .bind(participant.is_owner())
        .bind(participant.is_confirmed())
        .bind(participant.created_at())
        .execute(tx.conn()?)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn mark_confirmed(
        &self,
        tx: &mut TxContext,
        id: &ParticipantId,
    ) -> Result<bool, InfraError> {
        let result = sqlx::query(
            "UPDATE participants SET is_confirmed = TRUE WHERE id = $1 AND is_confirmed = FALSE",
        )
        .bind(id.as_uuid())
        .execute(tx.conn()?)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
