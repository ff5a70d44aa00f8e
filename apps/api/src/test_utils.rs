//! テスト用セットアップ
//!
//! モックリポジトリ・送信モック・固定時刻でユースケースとルーターを組み立てる。
//! モックは内部で状態を共有するため、SUT 実行後にスナップショットで検証できる。

use std::sync::Arc;

use axum::{Router, body::Body, http::Response};
use chrono::{DateTime, TimeZone, Utc};
use planner_domain::{
    clock::FixedClock,
    participant::{Participant, ParticipantId, ParticipantName},
    trip::{Destination, NewTrip, Trip, TripId, TripRecord},
    value_objects::Email,
};
use planner_infra::mock::{
    MockLinkRepository,
    MockNotificationSender,
    MockParticipantRepository,
    MockTransactionManager,
    MockTripRepository,
};

use crate::{
    AppState,
    build_router,
    handler::{LinkState, ParticipantState, TripState},
    usecase::{
        LinkUseCaseImpl,
        ParticipantUseCaseImpl,
        TripUseCaseImpl,
        notification::{NotificationService, TemplateRenderer},
    },
};

pub const API_BASE_URL: &str = "http://localhost:3333";

pub struct PlannerTestSetup {
    pub now:              DateTime<Utc>,
    pub trip_repo:        MockTripRepository,
    pub participant_repo: MockParticipantRepository,
    pub link_repo:        MockLinkRepository,
    pub sender:           MockNotificationSender,
}

impl PlannerTestSetup {
    pub fn new() -> Self {
        Self::with_sender(MockNotificationSender::new())
    }

    pub fn with_sender(sender: MockNotificationSender) -> Self {
        Self {
            now: Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap(),
            trip_repo: MockTripRepository::new(),
            participant_repo: MockParticipantRepository::new(),
            link_repo: MockLinkRepository::new(),
            sender,
        }
    }

    fn notification_service(&self) -> Arc<NotificationService> {
        Arc::new(NotificationService::new(
            Arc::new(self.sender.clone()),
            TemplateRenderer::new().unwrap(),
            API_BASE_URL.to_string(),
            4,
        ))
    }

    pub fn trip_usecase(&self) -> TripUseCaseImpl {
        TripUseCaseImpl::new(
            Arc::new(self.trip_repo.clone()),
            Arc::new(self.participant_repo.clone()),
            Arc::new(MockTransactionManager),
            self.notification_service(),
            Arc::new(FixedClock::new(self.now)),
        )
    }

    pub fn participant_usecase(&self) -> ParticipantUseCaseImpl {
        ParticipantUseCaseImpl::new(
            Arc::new(self.trip_repo.clone()),
            Arc::new(self.participant_repo.clone()),
            Arc::new(MockTransactionManager),
            self.notification_service(),
            Arc::new(FixedClock::new(self.now)),
        )
    }

    pub fn link_usecase(&self) -> LinkUseCaseImpl {
        LinkUseCaseImpl::new(
            Arc::new(self.trip_repo.clone()),
            Arc::new(self.link_repo.clone()),
            Arc::new(MockTransactionManager),
            Arc::new(FixedClock::new(self.now)),
        )
    }

    /// 本番と同じルーティングのルーター
    pub fn router(&self) -> Router {
        build_router(AppState {
            trip:        Arc::new(TripState {
                usecase: self.trip_usecase(),
            }),
            participant: Arc::new(ParticipantState {
                usecase: self.participant_usecase(),
            }),
            link:        Arc::new(LinkState {
                usecase: self.link_usecase(),
            }),
        })
    }

    /// 翌日から 4 日間の未確認の旅行を登録する
    pub fn seed_trip(&self, destination: &str) -> Trip {
        let trip = Trip::new(NewTrip {
            id:          TripId::new(),
            destination: Destination::new(destination).unwrap(),
            starts_at:   self.now + chrono::Duration::days(1),
            ends_at:     self.now + chrono::Duration::days(5),
            now:         self.now,
        })
        .unwrap();
        self.trip_repo.add_trip(trip.clone());
        trip
    }

    /// 作成日時を指定して旅行を登録する
    pub fn seed_trip_created_at(&self, destination: &str, created_at: DateTime<Utc>) -> Trip {
        let trip = Trip::from_db(TripRecord {
            id: TripId::new(),
            destination: Destination::new(destination).unwrap(),
            starts_at: self.now + chrono::Duration::days(1),
            ends_at: self.now + chrono::Duration::days(5),
            is_confirmed: false,
            created_at,
        });
        self.trip_repo.add_trip(trip.clone());
        trip
    }

    pub fn seed_owner(&self, trip: &Trip, email: &str) -> Participant {
        let owner = Participant::new_owner(
            ParticipantId::new(),
            trip.id().clone(),
            ParticipantName::new("Ana"),
            Email::new(email).unwrap(),
            self.now,
        );
        self.participant_repo.add_participant(owner.clone());
        owner
    }

    pub fn seed_invitee(&self, trip: &Trip, email: &str) -> Participant {
        let invitee = Participant::new_invitee(
            ParticipantId::new(),
            trip.id().clone(),
            Email::new(email).unwrap(),
            self.now,
        );
        self.participant_repo.add_participant(invitee.clone());
        invitee
    }
}

pub async fn response_body<T: serde::de::DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn response_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
