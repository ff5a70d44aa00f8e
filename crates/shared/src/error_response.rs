//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! plann.er API が返すエラー本文。問題の種類は [`ProblemKind`] の 4 種に限る。
//! HTTP レスポンスへの変換（axum）は API クレート側で行う。

use serde::{Deserialize, Serialize};

const ERROR_TYPE_BASE: &str = "https://planner.example.com/errors";

/// 5xx で返す固定の detail
pub const INTERNAL_ERROR_DETAIL: &str = "内部エラーが発生しました";

/// 問題の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    /// リクエストのスキーマ違反（JSON 不正、メール形式不正、パスの UUID 不正）
    Validation,
    /// 日程などのドメインルール違反
    BadRequest,
    NotFound,
    Internal,
}

impl ProblemKind {
    pub fn status(self) -> u16 {
        match self {
            Self::Validation | Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Validation => "Validation Error",
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::Internal => "Internal Server Error",
        }
    }

    /// `type` URI の末尾
    pub fn slug(self) -> &'static str {
        match self {
            Self::Validation => "validation-error",
            Self::BadRequest => "bad-request",
            Self::NotFound => "not-found",
            Self::Internal => "internal-error",
        }
    }
}

/// エラーレスポンス本文
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

impl ErrorResponse {
    pub fn new(kind: ProblemKind, detail: impl Into<String>) -> Self {
        Self {
            error_type: format!("{ERROR_TYPE_BASE}/{}", kind.slug()),
            title:      kind.title().to_string(),
            status:     kind.status(),
            detail:     detail.into(),
        }
    }

    /// 500。原因はログにだけ残し、本文には固定文言を返す。
    pub fn internal() -> Self {
        Self::new(ProblemKind::Internal, INTERNAL_ERROR_DETAIL)
    }
}
