//! # 参加者ユースケース
//!
//! 招待（参加者の追加）と参加確認、参加者の参照を扱う。

use std::sync::Arc;

use planner_domain::{
    DomainError,
    clock::Clock,
    notification::{TripNotification, TripSummary},
    participant::{Participant, ParticipantId},
    trip::TripId,
    value_objects::Email,
};
use planner_infra::{
    db::TransactionManager,
    repository::{ParticipantRepository, TripRepository},
};
use planner_shared::{event_log::event, log_business_event};

use super::{notification::NotificationService, require_trip};
use crate::error::ApiError;

/// 参加確認の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantConfirmation {
    /// 既に確認済みだった（副作用なし）
    AlreadyConfirmed,
    /// 今回確認済みにした
    Confirmed,
}

/// 参加者ユースケース
pub struct ParticipantUseCaseImpl {
    trip_repo:            Arc<dyn TripRepository>,
    participant_repo:     Arc<dyn ParticipantRepository>,
    tx_manager:           Arc<dyn TransactionManager>,
    notification_service: Arc<NotificationService>,
    clock:                Arc<dyn Clock>,
}

impl ParticipantUseCaseImpl {
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

    /// 旅行に参加者を招待し、参加確認依頼メールを送る
    ///
    /// 旅行が存在しない場合は参加者を作成しない。
    pub async fn create_invite(
        &self,
        trip_id: &TripId,
        email: String,
    ) -> Result<Participant, ApiError> {
        let email = Email::new(email)?;
        let trip = require_trip(self.trip_repo.as_ref(), trip_id).await?;

        let participant = Participant::new_invitee(
            ParticipantId::new(),
            trip.id().clone(),
            email,
            self.clock.now(),
        );

        let mut tx = self.tx_manager.begin().await?;
        self.participant_repo.insert(&mut tx, &participant).await?;
        tx.commit().await?;

        log_business_event!(
            event.category = event::category::PARTICIPANT,
            event.action = event::action::PARTICIPANT_INVITED,
            event.entity_type = event::entity_type::PARTICIPANT,
            event.entity_id = %participant.id(),
            event.result = event::result::SUCCESS,
            trip_id = %trip_id,
            "参加者招待"
        );

        self.notification_service
            .notify(TripNotification::ParticipantConfirmationRequest {
                participant_id:    participant.id().clone(),
                trip:              TripSummary::of(&trip),
                participant_name:  None,
                participant_email: participant.email().as_str().to_string(),
            })
            .await?;

        Ok(participant)
    }

    /// 参加者を確認済みにする
    ///
    /// 既に確認済みの場合は何もせず [`ParticipantConfirmation::AlreadyConfirmed`] を返す。
    pub async fn confirm_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<ParticipantConfirmation, ApiError> {
        let participant = self.get_participant(participant_id).await?;

        if participant.is_confirmed() {
            return Ok(ParticipantConfirmation::AlreadyConfirmed);
        }

        let mut tx = self.tx_manager.begin().await?;
        let updated = self
            .participant_repo
            .mark_confirmed(&mut tx, participant_id)
            .await?;
        tx.commit().await?;
        if !updated {
            return Ok(ParticipantConfirmation::AlreadyConfirmed);
        }

        log_business_event!(
            event.category = event::category::PARTICIPANT,
            event.action = event::action::PARTICIPANT_CONFIRMED,
            event.entity_type = event::entity_type::PARTICIPANT,
            event.entity_id = %participant_id,
            event.result = event::result::SUCCESS,
            "参加確認"
        );

        Ok(ParticipantConfirmation::Confirmed)
    }

    /// 参加者を取得する
    pub async fn get_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Participant, ApiError> {
        self.participant_repo
            .find_by_id(participant_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound {
                    entity_type: "Participant",
                    id:          participant_id.to_string(),
                }
                .into()
            })
    }

    /// 旅行の参加者一覧を取得する（オーナーを含む）
    pub async fn list_participants(&self, trip_id: &TripId) -> Result<Vec<Participant>, ApiError> {
        require_trip(self.trip_repo.as_ref(), trip_id).await?;
        Ok(self.participant_repo.find_by_trip(trip_id).await?)
    }
}
