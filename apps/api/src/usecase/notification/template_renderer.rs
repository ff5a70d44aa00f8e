//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **件名パターン**: `{destination} trip at {開始日} to {終了日}`
//! - **確認リンク**: `{api_base_url}{confirmation_path}` をテンプレートに渡す

use planner_domain::notification::{EmailMessage, NotificationError, TripNotification};
use tera::{Context, Tera};

/// テンプレートレンダラー
///
/// `TripNotification` から `EmailMessage` を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "trip_confirmation.html",
                    include_str!("../../../templates/notifications/trip_confirmation.html"),
                ),
                (
                    "trip_confirmation.txt",
                    include_str!("../../../templates/notifications/trip_confirmation.txt"),
                ),
                (
                    "participant_confirmation.html",
                    include_str!("../../../templates/notifications/participant_confirmation.html"),
                ),
                (
                    "participant_confirmation.txt",
                    include_str!("../../../templates/notifications/participant_confirmation.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 通知イベントからメールメッセージを生成する
    ///
    /// # 引数
    ///
    /// - `notification`: 旅行通知イベント
    /// - `api_base_url`: 確認リンクのベース URL（例: `http://localhost:3333`）
    pub fn render(
        &self,
        notification: &TripNotification,
        api_base_url: &str,
    ) -> Result<EmailMessage, NotificationError> {
        let template_name = match notification {
            TripNotification::TripConfirmationRequest { .. } => "trip_confirmation",
            TripNotification::ParticipantConfirmationRequest { .. } => "participant_confirmation",
        };

        let trip = notification.trip();
        let confirmation_url = format!("{api_base_url}{}", notification.confirmation_path());

        let mut context = Context::new();
        context.insert("destination", &trip.destination);
        context.insert("starts_on", &trip.starts_on);
        context.insert("ends_on", &trip.ends_on);
        context.insert("confirmation_url", &confirmation_url);

        let html_body = self
            .engine
            .render(&format!("{template_name}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{template_name}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailMessage {
            to: notification.recipient_email().to_string(),
            to_name: notification.recipient_name().map(str::to_string),
            subject: format!(
                "{} trip at {} to {}",
                trip.destination, trip.starts_on, trip.ends_on
            ),
            html_body,
            text_body,
        })
    }
}
