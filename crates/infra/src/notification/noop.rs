//! メールを送らない送信実装（`MAIL_BACKEND=noop`）
//!
//! 宛先と件名だけを info ログに残す。ローカル開発で SMTP サーバーを
//! 立てずに旅行作成・確認のフローを通すために使う。

use async_trait::async_trait;
use planner_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        tracing::info!(
            mail.to = %email.to,
            mail.subject = %email.subject,
            mail.has_recipient_name = email.to_name.is_some(),
            "メール送信を省略しました（noop）"
        );
        Ok(())
    }
}
