//! # トレーシング初期化
//!
//! `tracing-subscriber` のレイヤー構成をまとめる。
//!
//! | 環境変数 | 既定値 | 内容 |
//! |----------|--------|------|
//! | `LOG_FORMAT` | `pretty` | `json`（本番）/ `pretty`（開発） |
//! | `RUST_LOG` | [`DEFAULT_FILTER`] | EnvFilter の指定 |

/// `RUST_LOG` 未設定時のフィルタ
///
/// `tower_http` はアクセスログ（`TraceLayer`）の出力元。
pub const DEFAULT_FILTER: &str = "info,planner=debug,tower_http=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する
    ///
    /// 未設定・空・未知の値は `Pretty`。未知の値は起動を止めず stderr に警告する。
    pub fn from_setting(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("pretty") => Self::Pretty,
            Some("json") => Self::Json,
            Some(other) => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub service_name:   String,
    pub log_format:     LogFormat,
    /// `RUST_LOG` 未設定時に使うフィルタ
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }

    /// `LOG_FORMAT` を読んで設定を作る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let log_format = LogFormat::from_setting(std::env::var("LOG_FORMAT").ok().as_deref());
        Self::new(service_name, log_format)
    }
}

/// グローバルサブスクライバを登録する
///
/// EnvFilter、fmt レイヤー（JSON / pretty）、`tracing_error::ErrorLayer` の 3 層。
/// `ErrorLayer` があることで `InfraError` の `SpanTrace` にスパンが記録される。
///
/// 既に登録済みの場合はエラーを返す。
#[cfg(feature = "observability")]
pub fn init_tracing(
    config: TracingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .try_init()?;

    tracing::info!(
        service = %config.service_name,
        log_format = ?config.log_format,
        "トレーシングを初期化しました"
    );
    Ok(())
}
