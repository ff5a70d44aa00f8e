//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 送信先 |
//! |---|------------|------|
//! | [`TripNotification::TripConfirmationRequest`] | 旅行確認依頼 | 旅行作成時 → オーナー |
//! | [`TripNotification::ParticipantConfirmationRequest`] | 参加確認依頼 | 招待時 / 旅行確認時 → 招待者 |
//!
//! ## 設計方針
//!
//! - **enum による通知イベント**: 各バリアントが送信されるメールの種類に対応
//! - **テンプレート分離**: 通知イベントとメール生成は分離（TemplateRenderer は api）

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

use crate::{
    participant::ParticipantId,
    trip::{Trip, TripId, format_long_date},
};

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// 通知イベント種別
///
/// ログの `notification.event_type` フィールドに出力される値。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationEventType {
    /// 旅行確認依頼
    TripConfirmationRequest,
    /// 参加確認依頼
    ParticipantConfirmationRequest,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 送信先の表示名（招待者は未登録のため None）
    pub to_name:   Option<String>,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

/// メール件名・本文に埋め込む旅行の概要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSummary {
    pub destination: String,
    /// `October 18, 2026` 形式の開始日
    pub starts_on:   String,
    /// `October 18, 2026` 形式の終了日
    pub ends_on:     String,
}

impl TripSummary {
    pub fn of(trip: &Trip) -> Self {
        Self {
            destination: trip.destination().to_string(),
            starts_on:   format_long_date(trip.starts_at()),
            ends_on:     format_long_date(trip.ends_at()),
        }
    }
}

/// 旅行通知イベント
#[derive(Debug, Clone)]
pub enum TripNotification {
    /// 旅行確認依頼: 旅行作成時 → オーナーに送信
    TripConfirmationRequest {
        trip_id:     TripId,
        trip:        TripSummary,
        owner_name:  String,
        owner_email: String,
    },
    /// 参加確認依頼: 招待時・旅行確認時 → 招待者に送信
    ParticipantConfirmationRequest {
        participant_id:    ParticipantId,
        trip:              TripSummary,
        participant_name:  Option<String>,
        participant_email: String,
    },
}

impl TripNotification {
    /// 通知イベント種別を返す
    pub fn event_type(&self) -> NotificationEventType {
        match self {
            Self::TripConfirmationRequest { .. } => NotificationEventType::TripConfirmationRequest,
            Self::ParticipantConfirmationRequest { .. } => {
                NotificationEventType::ParticipantConfirmationRequest
            }
        }
    }

    /// 送信先メールアドレスを返す
    pub fn recipient_email(&self) -> &str {
        match self {
            Self::TripConfirmationRequest { owner_email, .. } => owner_email,
            Self::ParticipantConfirmationRequest {
                participant_email, ..
            } => participant_email,
        }
    }

    /// 送信先の表示名を返す
    pub fn recipient_name(&self) -> Option<&str> {
        match self {
            Self::TripConfirmationRequest { owner_name, .. } => Some(owner_name),
            Self::ParticipantConfirmationRequest {
                participant_name, ..
            } => participant_name.as_deref(),
        }
    }

    /// 件名・本文に使う旅行の概要を返す
    pub fn trip(&self) -> &TripSummary {
        match self {
            Self::TripConfirmationRequest { trip, .. }
            | Self::ParticipantConfirmationRequest { trip, .. } => trip,
        }
    }

    /// 確認リンクのパス（API ベース URL からの相対）を返す
    pub fn confirmation_path(&self) -> String {
        match self {
            Self::TripConfirmationRequest { trip_id, .. } => format!("/trips/{trip_id}/confirm"),
            Self::ParticipantConfirmationRequest { participant_id, .. } => {
                format!("/participants/{participant_id}/confirm")
            }
        }
    }
}
