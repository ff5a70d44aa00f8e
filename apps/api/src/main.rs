//! # plann.er API サーバー
//!
//! 旅行の作成・招待・参加確認と確認メール送信を行う HTTP サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `3333`） |
//! | `API_BASE_URL` | **Yes** | メール内リンクのベース URL |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `MAIL_BACKEND` | No | `smtp` または `noop`（デフォルト: `noop`） |
//! | `SMTP_HOST` / `SMTP_PORT` | No | SMTP サーバー（デフォルト: `localhost:1025`） |
//! | `MAIL_FROM_NAME` / `MAIL_FROM_ADDRESS` | No | 送信元 |
//! | `MAIL_MAX_CONCURRENCY` | No | 一斉送信の同時実行数（デフォルト: `8`） |
//! | `LOG_FORMAT` | No | `json` または `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! API_BASE_URL=http://localhost:3333 DATABASE_URL=postgres://... cargo run -p planner-api
//! ```

use std::sync::Arc;

use anyhow::Context;
use planner_api::{
    AppState,
    build_router,
    config::{ApiConfig, MailBackend},
    handler::{LinkState, ParticipantState, TripState},
    usecase::{
        LinkUseCaseImpl,
        ParticipantUseCaseImpl,
        TripUseCaseImpl,
        notification::{NotificationService, TemplateRenderer},
    },
};
use planner_domain::clock::SystemClock;
use planner_infra::{
    db::{self, PgTransactionManager},
    notification::{NoopNotificationSender, NotificationSender, SmtpNotificationSender},
    repository::{PostgresLinkRepository, PostgresParticipantRepository, PostgresTripRepository},
};
use planner_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("planner-api"))?;

    let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションに失敗しました")?;

    // 依存コンポーネントを初期化
    let trip_repo = Arc::new(PostgresTripRepository::new(pool.clone()));
    let participant_repo = Arc::new(PostgresParticipantRepository::new(pool.clone()));
    let link_repo = Arc::new(PostgresLinkRepository::new(pool.clone()));
    let tx_manager = Arc::new(PgTransactionManager::new(pool));
    let clock = Arc::new(SystemClock);

    let sender: Arc<dyn NotificationSender> = match config.mail.backend {
        MailBackend::Smtp => Arc::new(SmtpNotificationSender::new(
            &config.mail.smtp_host,
            config.mail.smtp_port,
            config.mail.from.clone(),
        )),
        MailBackend::Noop => Arc::new(NoopNotificationSender),
    };
    tracing::info!(backend = ?config.mail.backend, "メール送信を初期化しました");

    let notification_service = Arc::new(NotificationService::new(
        sender,
        TemplateRenderer::new().context("メールテンプレートの読み込みに失敗しました")?,
        config.api_base_url.clone(),
        config.mail.max_concurrency,
    ));

    let trip_usecase = TripUseCaseImpl::new(
        trip_repo.clone(),
        participant_repo.clone(),
        tx_manager.clone(),
        notification_service.clone(),
        clock.clone(),
    );
    let participant_usecase = ParticipantUseCaseImpl::new(
        trip_repo.clone(),
        participant_repo,
        tx_manager.clone(),
        notification_service,
        clock.clone(),
    );
    let link_usecase = LinkUseCaseImpl::new(trip_repo, link_repo, tx_manager, clock);

    let app = build_router(AppState {
        trip:        Arc::new(TripState {
            usecase: trip_usecase,
        }),
        participant: Arc::new(ParticipantState {
            usecase: participant_usecase,
        }),
        link:        Arc::new(LinkState {
            usecase: link_usecase,
        }),
    });

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .context("ポートのバインドに失敗しました")?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
