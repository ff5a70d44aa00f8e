//! # リポジトリ実装
//!
//! 旅行・参加者・リンクの永続化を担当するリポジトリを提供する。
//!
//! ## 設計方針
//!
//! - **トレイト経由の利用**: ユースケース層は `Arc<dyn XxxRepository>` に依存する
//! - **書き込みは TxContext 必須**: 読み取りはプール、書き込みはトランザクション
//! - **実行時クエリ**: `sqlx::query_as` + `FromRow` で行をマッピングする

pub mod link_repository;
pub mod participant_repository;
pub mod trip_repository;

pub use link_repository::{LinkRepository, PostgresLinkRepository};
pub use participant_repository::{ParticipantRepository, PostgresParticipantRepository};
pub use trip_repository::{PostgresTripRepository, TripRepository};
