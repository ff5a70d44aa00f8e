//! # 参加者ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /trips/{trip_id}/invites` - 招待（参加確認依頼メール）
//! - `GET /trips/{trip_id}/participants` - 旅行の参加者一覧
//! - `GET /participants/{participant_id}` - 参加者取得
//! - `GET /participants/{participant_id}/confirm` - 参加確認

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use planner_domain::{
    participant::{Participant, ParticipantId},
    trip::TripId,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{CreatedResponse, UuidPath, ValidatedJson};
use crate::{
    error::ApiError,
    usecase::{ParticipantConfirmation, ParticipantUseCaseImpl},
};

/// 確認済みの参加者を再確認したときの応答
pub const ALREADY_CONFIRMED_TEXT: &str = "Redirect to trip page, participant already confirmed";

/// 参加者を確認したときの応答
pub const CONFIRMED_TEXT: &str = "Redirect to trip page, participant now confirmed";

/// 参加者 API の共有状態
pub struct ParticipantState {
    pub usecase: ParticipantUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 招待リクエスト
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInviteRequest {
    #[validate(email)]
    pub email: String,
}

/// 参加者 DTO
///
/// 招待者は参加確認まで名前を持たないため `name` は null になりうる。
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ParticipantDto {
    pub id:           Uuid,
    pub trip_id:      Uuid,
    pub name:         Option<String>,
    pub email:        String,
    pub is_owner:     bool,
    pub is_confirmed: bool,
}

impl From<&Participant> for ParticipantDto {
    fn from(participant: &Participant) -> Self {
        Self {
            id:           *participant.id().as_uuid(),
            trip_id:      *participant.trip_id().as_uuid(),
            name:         participant.name().map(|name| name.as_str().to_string()),
            email:        participant.email().as_str().to_string(),
            is_owner:     participant.is_owner(),
            is_confirmed: participant.is_confirmed(),
        }
    }
}

// --- ハンドラ ---

/// POST /trips/{trip_id}/invites
///
/// ## レスポンス
///
/// - `201 Created`: `{"id": ...}`（作成された参加者の ID）
/// - `400 Bad Request`: メールアドレスが不正
/// - `404 Not Found`: 旅行が存在しない
#[tracing::instrument(skip_all)]
pub async fn create_invite(
    State(state): State<Arc<ParticipantState>>,
    UuidPath(trip_id): UuidPath,
    ValidatedJson(req): ValidatedJson<CreateInviteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let participant = state
        .usecase
        .create_invite(&TripId::from_uuid(trip_id), req.email)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(*participant.id().as_uuid())),
    ))
}

/// GET /trips/{trip_id}/participants
#[tracing::instrument(skip_all)]
pub async fn list_participants(
    State(state): State<Arc<ParticipantState>>,
    UuidPath(trip_id): UuidPath,
) -> Result<impl IntoResponse, ApiError> {
    let participants = state
        .usecase
        .list_participants(&TripId::from_uuid(trip_id))
        .await?;

    let items: Vec<ParticipantDto> = participants.iter().map(ParticipantDto::from).collect();
    Ok((StatusCode::OK, Json(items)))
}

/// GET /participants/{participant_id}
#[tracing::instrument(skip_all)]
pub async fn get_participant(
    State(state): State<Arc<ParticipantState>>,
    UuidPath(participant_id): UuidPath,
) -> Result<impl IntoResponse, ApiError> {
    let participant = state
        .usecase
        .get_participant(&ParticipantId::from_uuid(participant_id))
        .await?;

    Ok((StatusCode::OK, Json(ParticipantDto::from(&participant))))
}

/// GET /participants/{participant_id}/confirm
#[tracing::instrument(skip_all)]
pub async fn confirm_participant(
    State(state): State<Arc<ParticipantState>>,
    UuidPath(participant_id): UuidPath,
) -> Result<impl IntoResponse, ApiError> {
    let text = match state
        .usecase
        .confirm_participant(&ParticipantId::from_uuid(participant_id))
        .await?
    {
        ParticipantConfirmation::AlreadyConfirmed => ALREADY_CONFIRMED_TEXT,
        ParticipantConfirmation::Confirmed => CONFIRMED_TEXT,
    };

    Ok((StatusCode::OK, text))
}
