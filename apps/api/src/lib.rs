//! # plann.er API サーバー
//!
//! 旅行計画バックエンドの HTTP API。
//!
//! ## 構成
//!
//! ```text
//! handler（axum）→ usecase → infra（PostgreSQL / SMTP）
//!                      ↓
//!                    domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`usecase`] - ビジネスロジック
//!
//! ## 使用例
//!
//! ```rust,ignore
//! let app = planner_api::build_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;

#[cfg(test)]
pub(crate) mod test_utils;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use handler::{
    LinkState,
    ParticipantState,
    TripState,
    confirm_participant,
    confirm_trip,
    create_invite,
    create_link,
    create_trip,
    get_participant,
    get_trip,
    health_check,
    list_links,
    list_participants,
    list_trips,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// ルーターに渡す各 API の共有状態
#[derive(Clone)]
pub struct AppState {
    pub trip:        Arc<TripState>,
    pub participant: Arc<ParticipantState>,
    pub link:        Arc<LinkState>,
}

/// 全エンドポイントを登録したルーターを構築する
///
/// CORS は全オリジン・全メソッド・全ヘッダーを許可する。
pub fn build_router(state: AppState) -> Router {
    let trip_routes = Router::new()
        .route("/trips", post(create_trip))
        .route("/trips/{trip_id}", get(get_trip))
        .route("/trips/{trip_id}/confirm", get(confirm_trip))
        .route("/list", get(list_trips))
        .with_state(state.trip);

    let participant_routes = Router::new()
        .route("/trips/{trip_id}/invites", post(create_invite))
        .route("/trips/{trip_id}/participants", get(list_participants))
        .route("/participants/{participant_id}", get(get_participant))
        .route(
            "/participants/{participant_id}/confirm",
            get(confirm_participant),
        )
        .with_state(state.participant);

    let link_routes = Router::new()
        .route("/trips/{trip_id}/links", post(create_link).get(list_links))
        .with_state(state.link);

    Router::new()
        .route("/health", get(health_check))
        .merge(trip_routes)
        .merge(participant_routes)
        .merge(link_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
