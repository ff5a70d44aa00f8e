//! # 構造化ログのフィールド規約
//!
//! 旅行・参加者・リンクの状態変化と、メール送信の成否はビジネスイベントとして
//! [`log_business_event!`] で出す。JSON 出力では
//! `jq 'select(.["event.kind"] == "business_event")'` で抜き出せる。
//!
//! 500 を返すエラーは `tracing::error!` に `error.category` / `error.kind` を付けて出す。
//! フィールド値は [`event`] / [`error`] の定数を使う。

/// ビジネスイベントを info レベルで出す
///
/// `event.kind = "business_event"` は自動で付く。呼び出し側は
/// `event.category` / `event.action` / `event.result` を必ず、
/// 対象があれば `event.entity_type` / `event.entity_id` も渡す。
///
/// ```rust,ignore
/// log_business_event!(
///     event.category = event::category::TRIP,
///     event.action = event::action::TRIP_CONFIRMED,
///     event.entity_type = event::entity_type::TRIP,
///     event.entity_id = %trip_id,
///     event.result = event::result::SUCCESS,
///     invitee_count = 2,
///     "旅行確認"
/// );
/// ```
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// `event.*` の値
pub mod event {
    pub mod category {
        pub const TRIP: &str = "trip";
        pub const PARTICIPANT: &str = "participant";
        pub const LINK: &str = "link";
        pub const NOTIFICATION: &str = "notification";
    }

    /// `<対象>.<過去分詞>`
    pub mod action {
        // 旅行
        pub const TRIP_CREATED: &str = "trip.created";
        pub const TRIP_CONFIRMED: &str = "trip.confirmed";

        // 参加者
        pub const PARTICIPANT_INVITED: &str = "participant.invited";
        pub const PARTICIPANT_CONFIRMED: &str = "participant.confirmed";

        // リンク
        pub const LINK_CREATED: &str = "link.created";

        // 通知
        pub const NOTIFICATION_SENT: &str = "notification.sent";
        pub const NOTIFICATION_FAILED: &str = "notification.failed";
    }

    pub mod entity_type {
        pub const TRIP: &str = "trip";
        pub const PARTICIPANT: &str = "participant";
        pub const LINK: &str = "link";
    }

    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// `error.category` / `error.kind` の値
pub mod error {
    pub mod category {
        /// インフラストラクチャ（DB）
        pub const INFRASTRUCTURE: &str = "infrastructure";
        /// 外部サービス呼び出し（SMTP）
        pub const EXTERNAL_SERVICE: &str = "external_service";
    }

    pub mod kind {
        pub const DATABASE: &str = "database";
        pub const MAIL: &str = "mail";
    }
}
