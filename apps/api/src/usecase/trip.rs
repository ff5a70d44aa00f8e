//! # 旅行ユースケース
//!
//! 旅行の作成・取得・一覧・確認を扱う。
//!
//! ## 旅行作成の流れ
//!
//! 1. 目的地・日程・メールアドレスをドメインの値に変換（ここで検証が完了する）
//! 2. 旅行・オーナー・招待者を 1 トランザクションで保存
//! 3. オーナーに旅行確認依頼メールを送信
//!
//! 日程の検証は保存より前に行うため、不正な日程の旅行は保存されない。
//!
//! ## 旅行確認の流れ
//!
//! 確認済みなら何もしない。未確認なら確認済みにした後、
//! オーナー以外の参加者全員に参加確認依頼を並行送信する。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use planner_domain::{
    clock::Clock,
    notification::{TripNotification, TripSummary},
    participant::{Participant, ParticipantId, ParticipantName},
    trip::{Destination, NewTrip, Trip, TripId},
    value_objects::Email,
};
use planner_infra::{
    db::TransactionManager,
    repository::{ParticipantRepository, TripRepository},
};
use planner_shared::{event_log::event, log_business_event};

use super::{notification::NotificationService, require_trip};
use crate::error::ApiError;

/// 旅行作成の入力
pub struct CreateTripInput {
    pub destination:      String,
    pub starts_at:        DateTime<Utc>,
    pub ends_at:          DateTime<Utc>,
    pub owner_name:       String,
    pub owner_email:      String,
    pub emails_to_invite: Vec<String>,
}

/// 旅行確認の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripConfirmation {
    /// 既に確認済みだった（副作用なし）
    AlreadyConfirmed,
    /// 今回確認済みにした
    Confirmed,
}

/// 旅行ユースケース
pub struct TripUseCaseImpl {
    trip_repo:            Arc<dyn TripRepository>,
    participant_repo:     Arc<dyn ParticipantRepository>,
    tx_manager:           Arc<dyn TransactionManager>,
    notification_service: Arc<NotificationService>,
    clock:                Arc<dyn Clock>,
}

impl TripUseCaseImpl {
    pub fn new(
        trip_repo: Arc<dyn TripRepository>,
        participant_repo: Arc<dyn ParticipantRepository>,
        tx_manager: Arc<dyn TransactionManager>,
        notification_service: Arc<NotificationService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            trip_repo,
            participant_repo,
            tx_manager,
            notification_service,
            clock,
        }
    }

    /// 旅行を作成し、オーナーに確認依頼メールを送る
    ///
    /// メール送信の失敗はエラーとして返すが、旅行は保存済みのまま残る。
    pub async fn create_trip(&self, input: CreateTripInput) -> Result<Trip, ApiError> {
        let now = self.clock.now();

        let trip = Trip::new(NewTrip {
            id: TripId::new(),
            destination: Destination::new(input.destination)?,
            starts_at: input.starts_at,
            ends_at: input.ends_at,
            now,
        })?;

        let owner = Participant::new_owner(
            ParticipantId::new(),
            trip.id().clone(),
            ParticipantName::new(input.owner_name),
            Email::new(input.owner_email)?,
            now,
        );

        let invitees = input
            .emails_to_invite
            .into_iter()
            .map(|email| {
                Email::new(email).map(|email| {
                    Participant::new_invitee(ParticipantId::new(), trip.id().clone(), email, now)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self.tx_manager.begin().await?;
        self.trip_repo.insert(&mut tx, &trip).await?;
        self.participant_repo.insert(&mut tx, &owner).await?;
        for invitee in &invitees {
            self.participant_repo.insert(&mut tx, invitee).await?;
        }
        tx.commit().await?;

        log_business_event!(
            event.category = event::category::TRIP,
            event.action = event::action::TRIP_CREATED,
            event.entity_type = event::entity_type::TRIP,
            event.entity_id = %trip.id(),
            event.result = event::result::SUCCESS,
            invitee_count = invitees.len(),
            "旅行作成"
        );

        let owner_name = owner
            .name()
            .map(|name| name.as_str().to_string())
            .unwrap_or_default();

        self.notification_service
            .notify(TripNotification::TripConfirmationRequest {
                trip_id: trip.id().clone(),
                trip: TripSummary::of(&trip),
                owner_name,
                owner_email: owner.email().as_str().to_string(),
            })
            .await?;

        Ok(trip)
    }

    /// 旅行を取得する
    pub async fn get_trip(&self, trip_id: &TripId) -> Result<Trip, ApiError> {
        require_trip(self.trip_repo.as_ref(), trip_id).await
    }

    /// 全旅行を作成日時順で取得する
    pub async fn list_trips(&self) -> Result<Vec<Trip>, ApiError> {
        Ok(self.trip_repo.find_all().await?)
    }

    /// 旅行を確認済みにし、招待者に参加確認依頼を送る
    ///
    /// 既に確認済みの場合は何もせず [`TripConfirmation::AlreadyConfirmed`] を返す。
    pub async fn confirm_trip(&self, trip_id: &TripId) -> Result<TripConfirmation, ApiError> {
        let trip = require_trip(self.trip_repo.as_ref(), trip_id).await?;

        if trip.is_confirmed() {
            return Ok(TripConfirmation::AlreadyConfirmed);
        }

        // 読み取り後に別リクエストが確認済みにした場合は更新 0 件になる
        let mut tx = self.tx_manager.begin().await?;
        let updated = self.trip_repo.mark_confirmed(&mut tx, trip_id).await?;
        tx.commit().await?;
        if !updated {
            return Ok(TripConfirmation::AlreadyConfirmed);
        }

        let invitees = self.participant_repo.find_invitees_by_trip(trip_id).await?;

        log_business_event!(
            event.category = event::category::TRIP,
            event.action = event::action::TRIP_CONFIRMED,
            event.entity_type = event::entity_type::TRIP,
            event.entity_id = %trip_id,
            event.result = event::result::SUCCESS,
            invitee_count = invitees.len(),
            "旅行確認"
        );

        let summary = TripSummary::of(&trip);
        let notifications = invitees
            .into_iter()
            .map(|participant| TripNotification::ParticipantConfirmationRequest {
                participant_id:    participant.id().clone(),
                trip:              summary.clone(),
                participant_name:  participant.name().map(|name| name.as_str().to_string()),
                participant_email: participant.email().as_str().to_string(),
            })
            .collect();

        self.notification_service.notify_all(notifications).await?;

        Ok(TripConfirmation::Confirmed)
    }
}
