//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケースに委譲
//! - 入力のスキーマ検証は [`ValidatedJson`] / [`UuidPath`] で済ませてからユースケースに渡す

pub mod extract;
pub mod health;
pub mod link;
pub mod participant;
pub mod trip;

pub use extract::{UuidPath, ValidatedJson};
pub use health::health_check;
pub use link::{LinkState, create_link, list_links};
pub use participant::{
    ParticipantState,
    confirm_participant,
    create_invite,
    get_participant,
    list_participants,
};
use serde::{Deserialize, Serialize};
pub use trip::{TripState, confirm_trip, create_trip, get_trip, list_trips};
use uuid::Uuid;

/// 作成系エンドポイントの共通レスポンス（`{"id": ...}`）
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedResponse {
    pub id: Uuid,
}

impl CreatedResponse {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}
