//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **2 つの実装**: SMTP（Mailpit などのリレー）、Noop（ログ出力のみ）
//! - **環境変数切替**: `MAIL_BACKEND` でランタイム選択

mod noop;
mod smtp;

use async_trait::async_trait;
pub use noop::NoopNotificationSender;
use planner_domain::notification::{EmailMessage, NotificationError};
pub use smtp::SmtpNotificationSender;

/// 送信元（表示名とアドレス）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSender {
    pub name:    String,
    pub address: String,
}

/// メール送信トレイト
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}
