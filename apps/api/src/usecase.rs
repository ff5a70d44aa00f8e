//! # ユースケース層
//!
//! plann.er API のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリ・時刻・通知サービスを `Arc` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//! - **検証してから書き込む**: ドメインの検証はすべて永続化より前に行う
//!
//! ## モジュール構成
//!
//! - [`trip`]: 旅行の作成・確認・一覧
//! - [`participant`]: 招待と参加確認
//! - [`link`]: リンクの添付
//! - [`notification`]: メール通知

pub mod link;
pub mod notification;
pub mod participant;
pub mod trip;

pub use link::{CreateLinkInput, LinkUseCaseImpl};
pub use participant::{ParticipantConfirmation, ParticipantUseCaseImpl};
use planner_domain::{
    DomainError,
    trip::{Trip, TripId},
};
use planner_infra::repository::TripRepository;
pub use trip::{CreateTripInput, TripConfirmation, TripUseCaseImpl};

use crate::error::ApiError;

/// 旅行を取得し、存在しなければ NotFound を返す
pub(crate) async fn require_trip(
    trip_repo: &dyn TripRepository,
    trip_id: &TripId,
) -> Result<Trip, ApiError> {
    trip_repo
        .find_by_id(trip_id)
        .await?
        .ok_or_else(|| {
            DomainError::NotFound {
                entity_type: "Trip",
                id:          trip_id.to_string(),
            }
            .into()
        })
}
