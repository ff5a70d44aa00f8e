//! # 旅行ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /trips` - 旅行作成（オーナーに確認依頼メール）
//! - `GET /trips/{trip_id}` - 旅行取得
//! - `GET /trips/{trip_id}/confirm` - 旅行確認（招待者に参加確認依頼メール）
//! - `GET /list` - 旅行一覧

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use planner_domain::trip::{Trip, TripId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError};

use super::{CreatedResponse, UuidPath, ValidatedJson};
use crate::{
    error::ApiError,
    usecase::{CreateTripInput, TripConfirmation, TripUseCaseImpl},
};

/// 確認済みの旅行を再確認したときの応答
pub const ALREADY_CONFIRMED_TEXT: &str = "Redirect to trip page, you are confirmed";

/// 旅行を確認したときの応答
pub const CONFIRMED_TEXT: &str = "Redirect to trip page, now confirmed";

/// 旅行 API の共有状態
pub struct TripState {
    pub usecase: TripUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 旅行作成リクエスト
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTripRequest {
    #[validate(length(min = 4))]
    pub destination:      String,
    pub starts_at:        DateTime<Utc>,
    pub ends_at:          DateTime<Utc>,
    pub owner_name:       String,
    #[validate(email)]
    pub owner_email:      String,
    #[validate(custom(function = "validate_emails"))]
    pub emails_to_invite: Vec<String>,
}

fn validate_emails(emails: &[String]) -> Result<(), ValidationError> {
    if emails.iter().all(|email| email.validate_email()) {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

/// 旅行 DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TripDto {
    pub id:           Uuid,
    pub destination:  String,
    pub starts_at:    String,
    pub ends_at:      String,
    pub is_confirmed: bool,
    pub created_at:   String,
}

impl From<&Trip> for TripDto {
    fn from(trip: &Trip) -> Self {
        Self {
            id:           *trip.id().as_uuid(),
            destination:  trip.destination().to_string(),
            starts_at:    trip.starts_at().to_rfc3339(),
            ends_at:      trip.ends_at().to_rfc3339(),
            is_confirmed: trip.is_confirmed(),
            created_at:   trip.created_at().to_rfc3339(),
        }
    }
}

// --- ハンドラ ---

/// POST /trips
///
/// ## レスポンス
///
/// - `201 Created`: `{"id": ...}`
/// - `400 Bad Request`: スキーマ違反、開始日が過去、終了日が開始日より前
/// - `500 Internal Server Error`: 保存またはメール送信の失敗
#[tracing::instrument(skip_all)]
pub async fn create_trip(
    State(state): State<Arc<TripState>>,
    ValidatedJson(req): ValidatedJson<CreateTripRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateTripInput {
        destination:      req.destination,
        starts_at:        req.starts_at,
        ends_at:          req.ends_at,
        owner_name:       req.owner_name,
        owner_email:      req.owner_email,
        emails_to_invite: req.emails_to_invite,
    };

    let trip = state.usecase.create_trip(input).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(*trip.id().as_uuid()))))
}

/// GET /trips/{trip_id}
#[tracing::instrument(skip_all)]
pub async fn get_trip(
    State(state): State<Arc<TripState>>,
    UuidPath(trip_id): UuidPath,
) -> Result<impl IntoResponse, ApiError> {
    let trip = state.usecase.get_trip(&TripId::from_uuid(trip_id)).await?;

    Ok((StatusCode::OK, Json(TripDto::from(&trip))))
}

/// GET /trips/{trip_id}/confirm
///
/// 確認済みかどうかで応答テキストが変わる。どちらも `200 OK`。
#[tracing::instrument(skip_all)]
pub async fn confirm_trip(
    State(state): State<Arc<TripState>>,
    UuidPath(trip_id): UuidPath,
) -> Result<impl IntoResponse, ApiError> {
    let text = match state
        .usecase
        .confirm_trip(&TripId::from_uuid(trip_id))
        .await?
    {
        TripConfirmation::AlreadyConfirmed => ALREADY_CONFIRMED_TEXT,
        TripConfirmation::Confirmed => CONFIRMED_TEXT,
    };

    Ok((StatusCode::OK, text))
}

/// GET /list
///
/// 全旅行を作成日時順で返す。
#[tracing::instrument(skip_all)]
pub async fn list_trips(
    State(state): State<Arc<TripState>>,
) -> Result<impl IntoResponse, ApiError> {
    let trips = state.usecase.list_trips().await?;

    let items: Vec<TripDto> = trips.iter().map(TripDto::from).collect();
    Ok((StatusCode::OK, Json(items)))
}
