//! # インフラ層エラー
//!
//! [`InfraError`] は種別 [`InfraErrorKind`] と、生成時点の [`SpanTrace`] を持つ。
//! `?` で `sqlx::Error` から変換した瞬間のスパン（どのリポジトリのどのクエリか）
//! が残るので、API 層の 500 ログからそのまま発生箇所を辿れる。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// クエリ実行・接続・制約違反
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    #[error("マイグレーションエラー: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),

    /// 保存済みの行がドメインの制約を満たさない（目的地が 3 文字など）
    #[error("{table} の行が不正です: {reason}")]
    CorruptedRow {
        table:  &'static str,
        reason: String,
    },

    /// Postgres のコネクションを持たないトランザクションで書き込もうとした
    #[error("トランザクションにコネクションがありません")]
    TransactionUnavailable,
}

impl InfraError {
    fn capture(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    pub fn corrupted_row(table: &'static str, reason: impl fmt::Display) -> Self {
        Self::capture(InfraErrorKind::CorruptedRow {
            table,
            reason: reason.to_string(),
        })
    }

    pub fn transaction_unavailable() -> Self {
        Self::capture(InfraErrorKind::TransactionUnavailable)
    }

    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self::capture(InfraErrorKind::Database(source))
    }
}

impl From<sqlx::migrate::MigrateError> for InfraError {
    fn from(source: sqlx::migrate::MigrateError) -> Self {
        Self::capture(InfraErrorKind::Migration(source))
    }
}
