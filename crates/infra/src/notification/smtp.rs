//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 開発環境では Mailpit（ローカル SMTP サーバー）に接続する。

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart, header::ContentType},
};
use planner_domain::notification::{EmailMessage, NotificationError};

use super::{MailSender, NotificationSender};

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
pub struct SmtpNotificationSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from:      MailSender,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "localhost"）
    /// - `port`: SMTP サーバーのポート番号（例: 1025 for Mailpit）
    /// - `from`: 送信元の表示名とアドレス
    pub fn new(host: &str, port: u16, from: MailSender) -> Self {
        // builder_dangerous: TLS なしで接続（Mailpit 等のローカル SMTP 向け）
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self { transport, from }
    }
}

/// 表示名付きの Mailbox を組み立てる（表示名が空なら省略）
fn mailbox(name: Option<&str>, address: &str) -> Result<Mailbox, NotificationError> {
    let address = address
        .parse()
        .map_err(|e| NotificationError::SendFailed(format!("メールアドレス不正: {e}")))?;
    let name = name.filter(|n| !n.is_empty()).map(str::to_string);

    Ok(Mailbox::new(name, address))
}

/// EmailMessage から lettre の Message を組み立てる
fn build_message(from: &MailSender, email: &EmailMessage) -> Result<Message, NotificationError> {
    Message::builder()
        .from(mailbox(Some(&from.name), &from.address)?)
        .to(mailbox(email.to_name.as_deref(), &email.to)?)
        .subject(&email.subject)
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(email.text_body.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(email.html_body.clone()),
                ),
        )
        .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let message = build_message(&self.from, email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> MailSender {
        MailSender {
            name:    "plann.er team".to_string(),
            address: "support@planner.com".to_string(),
        }
    }

    fn email(to: &str, to_name: Option<&str>) -> EmailMessage {
        EmailMessage {
            to:        to.to_string(),
            to_name:   to_name.map(str::to_string),
            subject:   "Florianópolis trip at October 18, 2026 to October 22, 2026".to_string(),
            html_body: "<p>Your new trip has been booked</p>".to_string(),
            text_body: "Your new trip has been booked".to_string(),
        }
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SmtpNotificationSender>();
    }

    #[test]
    fn 送信元と宛先に表示名が付く() {
        let message = build_message(&sender(), &email("a@x.com", Some("Ana"))).unwrap();
        let headers = message.headers().to_string();

        assert!(headers.contains("plann.er team"), "{headers}");
        assert!(headers.contains("support@planner.com"), "{headers}");
        assert!(headers.contains("Ana"), "{headers}");
    }

    #[test]
    fn 表示名のない宛先にも送信できる() {
        assert!(build_message(&sender(), &email("b@x.com", None)).is_ok());
    }

    #[test]
    fn 不正な宛先はsend_failedになる() {
        let result = build_message(&sender(), &email("broken", None));

        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
    }
}
