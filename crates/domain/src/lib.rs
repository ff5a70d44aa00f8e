//! # plann.er ドメイン層
//!
//! 旅行計画の中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（Trip, Participant, Link）
//! - **値オブジェクト**: 生成時にバリデーションされる不変オブジェクト
//!   （Destination, Email, LinkUrl など）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、メール送信）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`trip`] - 旅行エンティティと日程の検証
//! - [`participant`] - 参加者エンティティ（オーナー / 招待者）
//! - [`link`] - 旅行に添付するリンク
//! - [`notification`] - メール通知のドメインモデル
//! - [`clock`] - 現在時刻の抽象化
//! - [`error`] - ドメインエラー
//!
//! ## 使用例
//!
//! ```rust
//! use planner_domain::{DomainError, trip::TripId};
//!
//! let trip_id = TripId::new();
//!
//! let error = DomainError::NotFound {
//!     entity_type: "Trip",
//!     id:          trip_id.to_string(),
//! };
//! assert_eq!(error.to_string(), "Trip not found!");
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod link;
pub mod notification;
pub mod participant;
pub mod trip;
pub mod value_objects;

pub use error::DomainError;
