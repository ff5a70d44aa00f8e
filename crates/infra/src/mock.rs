//! # テスト用モック
//!
//! ユースケース・ハンドラーのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! planner-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use planner_domain::{
    link::Link,
    notification::{EmailMessage, NotificationError},
    participant::{Participant, ParticipantId},
    trip::{Trip, TripId},
};

use uuid::Uuid;

use crate::{
    db::{TransactionManager, TxContext},
    error::InfraError,
    notification::NotificationSender,
    repository::{LinkRepository, ParticipantRepository, TripRepository},
};

// ===== MockTripRepository =====

#[derive(Clone, Default)]
pub struct MockTripRepository {
    trips:               Arc<Mutex<Vec<Trip>>>,
    confirmed_elsewhere: Arc<Mutex<HashSet<Uuid>>>,
}

impl MockTripRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_trip(&self, trip: Trip) {
        self.trips.lock().unwrap().push(trip);
    }

    /// 保存されている旅行のスナップショット
    pub fn trips(&self) -> Vec<Trip> {
        self.trips.lock().unwrap().clone()
    }

    /// 読み取り後に別リクエストが先に確認済みにした状態を再現する
    ///
    /// `find_by_id` は未確認のまま返し、`mark_confirmed` は `false` を返す。
    pub fn confirm_elsewhere(&self, id: &TripId) {
        self.confirmed_elsewhere.lock().unwrap().insert(*id.as_uuid());
    }
}

#[async_trait]
impl TripRepository for MockTripRepository {
    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, InfraError> {
        Ok(self
            .trips
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id() == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Trip>, InfraError> {
        let mut trips = self.trips();
        trips.sort_by_key(|t| (t.created_at(), *t.id().as_uuid()));
        Ok(trips)
    }

    async fn insert(&self, _tx: &mut TxContext, trip: &Trip) -> Result<(), InfraError> {
        self.trips.lock().unwrap().push(trip.clone());
        Ok(())
    }

    async fn mark_confirmed(&self, _tx: &mut TxContext, id: &TripId) -> Result<bool, InfraError> {
        if self.confirmed_elsewhere.lock().unwrap().contains(id.as_uuid()) {
            return Ok(false);
        }

        let mut trips = self.trips.lock().unwrap();
        match trips.iter().position(|t| t.id() == id && !t.is_confirmed()) {
            Some(pos) => {
                let confirmed = trips[pos].clone().confirmed();
                trips[pos] = confirmed;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ===== MockParticipantRepository =====

#[derive(Clone, Default)]
pub struct MockParticipantRepository {
    participants:        Arc<Mutex<Vec<Participant>>>,
    confirmed_elsewhere: Arc<Mutex<HashSet<Uuid>>>,
}

impl MockParticipantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_participant(&self, participant: Participant) {
        self.participants.lock().unwrap().push(participant);
    }

    /// 保存されている参加者のスナップショット
    pub fn participants(&self) -> Vec<Participant> {
        self.participants.lock().unwrap().clone()
    }

    /// 読み取り後に別リクエストが先に確認済みにした状態を再現する
    pub fn confirm_elsewhere(&self, id: &ParticipantId) {
        self.confirmed_elsewhere.lock().unwrap().insert(*id.as_uuid());
    }

    fn sorted(&self, filter: impl Fn(&Participant) -> bool) -> Vec<Participant> {
        let mut participants: Vec<Participant> = self
            .participants
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter(p))
            .cloned()
            .collect();
        participants.sort_by_key(|p| (p.created_at(), *p.id().as_uuid()));
        participants
    }
}

#[async_trait]
impl ParticipantRepository for MockParticipantRepository {
    async fn find_by_id(&self, id: &ParticipantId) -> Result<Option<Participant>, InfraError> {
        Ok(self
            .participants
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id() == id)
            .cloned())
    }

    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Vec<Participant>, InfraError> {
        Ok(self.sorted(|p| p.trip_id() == trip_id))
    }

    async fn find_invitees_by_trip(
        &self,
        trip_id: &TripId,
    ) -> Result<Vec<Participant>, InfraError> {
        Ok(self.sorted(|p| p.trip_id() == trip_id && !p.is_owner()))
    }

    async fn insert(
        &self,
        _tx: &mut TxContext,
        participant: &Participant,
    ) -> Result<(), InfraError> {
        self.participants.lock().unwrap().push(participant.clone());
        Ok(())
    }

    async fn mark_confirmed(
        &self,
        _tx: &mut TxContext,
        id: &ParticipantId,
    ) -> Result<bool, InfraError> {
        if self.confirmed_elsewhere.lock().unwrap().contains(id.as_uuid()) {
            return Ok(false);
        }

        let mut participants = self.participants.lock().unwrap();
        match participants
            .iter()
            .position(|p| p.id() == id && !p.is_confirmed())
        {
            Some(pos) => {
                let confirmed = participants[pos].clone().confirmed();
                participants[pos] = confirmed;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ===== MockLinkRepository =====

#[derive(Clone, Default)]
pub struct MockLinkRepository {
    links: Arc<Mutex<Vec<Link>>>,
}

impl MockLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されているリンクのスナップショット
    pub fn links(&self) -> Vec<Link> {
        self.links.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkRepository for MockLinkRepository {
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Vec<Link>, InfraError> {
        let mut links: Vec<Link> = self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.trip_id() == trip_id)
            .cloned()
            .collect();
        links.sort_by_key(|l| (l.created_at(), *l.id().as_uuid()));
        Ok(links)
    }

    async fn insert(&self, _tx: &mut TxContext, link: &Link) -> Result<(), InfraError> {
        self.links.lock().unwrap().push(link.clone());
        Ok(())
    }
}

// ===== MockTransactionManager =====

/// モック TransactionManager
///
/// `TxContext::mock()` を返す。Mock リポジトリはトランザクションを無視する。
#[derive(Clone, Default)]
pub struct MockTransactionManager;

#[async_trait]
impl TransactionManager for MockTransactionManager {
    async fn begin(&self) -> Result<TxContext, InfraError> {
        Ok(TxContext::mock())
    }
}

// ===== MockNotificationSender =====

/// 送信したメールを記録するモック NotificationSender
///
/// `failing_for` で指定した宛先への送信は `SendFailed` を返す。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:        Arc<Mutex<Vec<EmailMessage>>>,
    failing_for: Option<String>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定した宛先への送信だけ失敗するモックを作成する
    pub fn failing_for(address: impl Into<String>) -> Self {
        Self {
            sent:        Arc::default(),
            failing_for: Some(address.into()),
        }
    }

    /// 送信に成功したメールのスナップショット
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        if self.failing_for.as_deref() == Some(email.to.as_str()) {
            return Err(NotificationError::SendFailed(format!(
                "モック送信失敗: {}",
                email.to
            )));
        }

        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
