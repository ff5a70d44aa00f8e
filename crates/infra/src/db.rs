//! # PostgreSQL 接続とトランザクション
//!
//! 書き込み系リポジトリメソッドは `&mut TxContext` を必須引数に取る。
//! 旅行作成では旅行・オーナー・招待者の INSERT を 1 つの [`TxContext`] にまとめ、
//! `commit()` 前に失敗すれば（ドロップで）全件ロールバックされる。
//!
//! ```rust,ignore
//! let pool = db::create_pool(&config.database_url).await?;
//! db::run_migrations(&pool).await?;
//!
//! let mut tx = PgTransactionManager::new(pool).begin().await?;
//! trip_repo.insert(&mut tx, &trip).await?;
//! tx.commit().await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction, postgres::PgPoolOptions};

use crate::error::InfraError;

/// プールの最大接続数
pub const MAX_CONNECTIONS: u32 = 10;

/// 接続取得を待つ上限。超えるとリクエストは 500 になる
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// リポジトリのマイグレーション（`migrations/`）を適用する
pub async fn run_migrations(pool: &PgPool) -> Result<(), InfraError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    tracing::info!("マイグレーションを適用しました");
    Ok(())
}

/// 接続プールを作成する（起動時に 1 回）
pub async fn create_pool(database_url: &str) -> Result<PgPool, InfraError> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// 書き込み用トランザクション
///
/// `tx` が `None` のものはモックリポジトリ用で、Postgres には書き込めない。
pub struct TxContext {
    tx: Option<Transaction<'static, Postgres>>,
}

impl TxContext {
    /// コネクションを持たない TxContext（モックリポジトリ用）
    #[cfg(any(test, feature = "test-utils"))]
    pub fn mock() -> Self {
        Self { tx: None }
    }

    /// コミットする。呼ばずにドロップした場合はロールバック。
    pub async fn commit(self) -> Result<(), InfraError> {
        if let Some(tx) = self.tx {
            tx.commit().await?;
        }
        Ok(())
    }

    pub(crate) fn conn(&mut self) -> Result<&mut PgConnection, InfraError> {
        match self.tx.as_mut() {
            Some(tx) => Ok(&mut **tx),
            None => Err(InfraError::transaction_unavailable()),
        }
    }
}

/// トランザクションの開始口
///
/// ユースケースは `PgPool` ではなくこの trait に依存する。
#[async_trait]
pub trait TransactionManager: Send + Sync {
    async fn begin(&self) -> Result<TxContext, InfraError>;
}

pub struct PgTransactionManager {
    pool: PgPool,
}

impl PgTransactionManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionManager for PgTransactionManager {
    async fn begin(&self) -> Result<TxContext, InfraError> {
        let tx = self.pool.begin().await?;
        Ok(TxContext { tx: Some(tx) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InfraErrorKind;

    #[test]
    fn test_tx_contextはタスク間で送れる() {
        fn assert_send<T: Send>() {}
        assert_send::<TxContext>();
        assert_send::<Box<dyn TransactionManager>>();
    }

    #[tokio::test]
    async fn test_mockのtx_contextはコミットできるが書き込みには使えない() {
        let mut tx = TxContext::mock();

        let err = tx.conn().unwrap_err();
        assert!(matches!(err.kind(), InfraErrorKind::TransactionUnavailable));
        assert!(tx.commit().await.is_ok());
    }
}
