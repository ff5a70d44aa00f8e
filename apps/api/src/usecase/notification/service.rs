//! # 通知サービス
//!
//! テンプレートレンダリング → メール送信 → イベントログ出力を統合するサービス。
//!
//! ## 設計方針
//!
//! - **エラーを返す**: 送信失敗は呼び出し元のリクエストを失敗させる
//! - **一斉送信**: [`NotificationService::notify_all`] は同時送信数を
//!   セマフォで制限し、最初の失敗で残りの送信を中断する
//! - **依存性注入**: `NotificationSender` は trait で抽象化

use std::sync::Arc;

use planner_domain::notification::{NotificationError, TripNotification};
use planner_infra::notification::NotificationSender;
use planner_shared::{event_log::event, log_business_event};
use tokio::{sync::Semaphore, task::JoinSet};

use super::TemplateRenderer;

/// 通知サービス
pub struct NotificationService {
    sender:            Arc<dyn NotificationSender>,
    template_renderer: TemplateRenderer,
    api_base_url:      String,
    max_concurrency:   usize,
}

impl NotificationService {
    /// `max_concurrency` が 0 の場合は 1 として扱う
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        template_renderer: TemplateRenderer,
        api_base_url: String,
        max_concurrency: usize,
    ) -> Self {
        Self {
            sender,
            template_renderer,
            api_base_url,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// 通知を 1 件送信する
    pub async fn notify(&self, notification: TripNotification) -> Result<(), NotificationError> {
        let event_type: &str = notification.event_type().into();

        let email = self
            .template_renderer
            .render(&notification, &self.api_base_url)
            .inspect_err(|e| {
                tracing::error!(
                    error = %e,
                    event_type,
                    "通知テンプレートのレンダリングに失敗"
                );
            })?;

        match self.sender.send_email(&email).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.result = event::result::SUCCESS,
                    notification.event_type = event_type,
                    notification.recipient = %email.to,
                    "通知メール送信成功"
                );
                Ok(())
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.result = event::result::FAILURE,
                    notification.event_type = event_type,
                    notification.recipient = %email.to,
                    error = %e,
                    "通知メール送信失敗"
                );
                Err(e)
            }
        }
    }

    /// 複数の通知を並行送信する
    ///
    /// 同時送信数は `max_concurrency` 件まで。いずれかが失敗した時点で
    /// 未完了の送信を中断し、そのエラーを返す。
    pub async fn notify_all(
        self: &Arc<Self>,
        notifications: Vec<TripNotification>,
    ) -> Result<(), NotificationError> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        for notification in notifications {
            let service = Arc::clone(self);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| NotificationError::SendFailed(e.to_string()))?;
                service.notify(notification).await
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let result = joined.map_err(|e| {
                NotificationError::SendFailed(format!("送信タスクが異常終了: {e}"))
            });

            if let Err(e) = result.and_then(|sent| sent) {
                tasks.abort_all();
                return Err(e);
            }
        }

        Ok(())
    }
}
