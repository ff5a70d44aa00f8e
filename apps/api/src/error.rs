//! # API エラー定義
//!
//! API 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラーの階層
//!
//! ```text
//! DomainError / InfraError / NotificationError
//!        ↓ From
//! ApiError
//!        ↓ IntoResponse
//! HTTP レスポンス（RFC 9457 Problem Details）
//! ```
//!
//! 5xx 系の詳細はクライアントに返さず、ログにのみ出力する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use planner_domain::{DomainError, notification::NotificationError};
use planner_infra::InfraError;
use planner_shared::{
    ErrorResponse,
    error_response::ProblemKind,
    event_log::error,
};
use thiserror::Error;

/// API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リクエストの形式が不正（スキーマ検証の失敗）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// ビジネスルール違反（日程の不整合など）
    #[error("{0}")]
    BadRequest(String),

    /// リソースが見つからない
    #[error("{0}")]
    NotFound(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),

    /// メール通知エラー
    #[error("メール通知エラー: {0}")]
    Notification(#[from] NotificationError),
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation(msg) => Self::BadRequest(msg),
            not_found @ DomainError::NotFound { .. } => Self::NotFound(not_found.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::Validation(msg) => ErrorResponse::new(ProblemKind::Validation, msg),
            ApiError::BadRequest(msg) => ErrorResponse::new(ProblemKind::BadRequest, msg),
            ApiError::NotFound(msg) => ErrorResponse::new(ProblemKind::NotFound, msg),
            ApiError::Database(e) => {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::DATABASE,
                    span_trace = %e.span_trace(),
                    "データベースエラー: {}",
                    e
                );
                ErrorResponse::internal()
            }
            ApiError::Notification(e) => {
                tracing::error!(
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::MAIL,
                    "メール通知エラー: {}",
                    e
                );
                ErrorResponse::internal()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}
