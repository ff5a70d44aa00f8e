//! # アプリケーション設定
//!
//! 環境変数から API サーバーの設定を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `API_BASE_URL` | **Yes** | - | メール内リンクのベース URL（末尾の `/` は除去） |
//! | `DATABASE_URL` | **Yes** | - | PostgreSQL 接続 URL |
//! | `HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `PORT` | No | `3333` | ポート番号 |
//! | `MAIL_BACKEND` | No | `noop` | `smtp` または `noop` |
//! | `SMTP_HOST` | No | `localhost` | SMTP ホスト |
//! | `SMTP_PORT` | No | `1025` | SMTP ポート |
//! | `MAIL_FROM_NAME` | No | `plann.er team` | 送信元の表示名 |
//! | `MAIL_FROM_ADDRESS` | No | `support@planner.com` | 送信元アドレス |
//! | `MAIL_MAX_CONCURRENCY` | No | `8` | 旅行確認時のメール同時送信数（1 以上） |
//!
//! 値の取得元は [`ApiConfig::from_lookup`] で差し替えられる（テスト用）。

use std::{fmt::Display, str::FromStr};

use planner_infra::notification::MailSender;
use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3333;
const DEFAULT_SMTP_HOST: &str = "localhost";
const DEFAULT_SMTP_PORT: u16 = 1025;
const DEFAULT_MAIL_FROM_NAME: &str = "plann.er team";
const DEFAULT_MAIL_FROM_ADDRESS: &str = "support@planner.com";
const DEFAULT_MAIL_MAX_CONCURRENCY: usize = 8;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("環境変数 {0} が設定されていません")]
    Missing(&'static str),

    /// 環境変数の値が不正
    #[error("環境変数 {name} の値が不正です（{value:?}）: {reason}")]
    Invalid {
        name:   &'static str,
        value:  String,
        reason: String,
    },
}

/// メール送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MailBackend {
    /// SMTP サーバー経由で送信
    Smtp,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// メール通知の設定
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub backend:         MailBackend,
    pub smtp_host:       String,
    pub smtp_port:       u16,
    pub from:            MailSender,
    /// 旅行確認時のメール同時送信数の上限
    pub max_concurrency: usize,
}

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// メール内リンクのベース URL（末尾の `/` なし）
    pub api_base_url: String,
    /// データベース接続 URL
    pub database_url: String,
    /// メール通知設定
    pub mail:         MailConfig,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の取得関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Lookup(lookup);

        let api_base_url = env.required("API_BASE_URL")?;
        parse_url("API_BASE_URL", &api_base_url)?;
        let database_url = env.required("DATABASE_URL")?;
        parse_url("DATABASE_URL", &database_url)?;

        let max_concurrency =
            env.parse_or("MAIL_MAX_CONCURRENCY", DEFAULT_MAIL_MAX_CONCURRENCY)?;
        if max_concurrency == 0 {
            return Err(ConfigError::Invalid {
                name:   "MAIL_MAX_CONCURRENCY",
                value:  "0".to_string(),
                reason: "1 以上である必要があります".to_string(),
            });
        }

        Ok(Self {
            host: env.get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env.parse_or("PORT", DEFAULT_PORT)?,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            database_url,
            mail: MailConfig {
                backend: env.parse_or("MAIL_BACKEND", MailBackend::Noop)?,
                smtp_host: env
                    .get("SMTP_HOST")
                    .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                smtp_port: env.parse_or("SMTP_PORT", DEFAULT_SMTP_PORT)?,
                from: MailSender {
                    name:    env
                        .get("MAIL_FROM_NAME")
                        .unwrap_or_else(|| DEFAULT_MAIL_FROM_NAME.to_string()),
                    address: env
                        .get("MAIL_FROM_ADDRESS")
                        .unwrap_or_else(|| DEFAULT_MAIL_FROM_ADDRESS.to_string()),
                },
                max_concurrency,
            },
        })
    }
}

struct Lookup<F>(F);

impl<F: Fn(&str) -> Option<String>> Lookup<F> {
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.get(name).ok_or(ConfigError::Missing(name))
    }

    fn parse_or<T>(&self, name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let Some(value) = self.get(name) else {
            return Ok(default);
        };

        value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
            value,
        })
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
