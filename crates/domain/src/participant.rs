//! # 参加者
//!
//! 旅行の参加者（オーナー / 招待者）を表現するドメインモデル。
//!
//! ## 参加者の種類
//!
//! | 種類 | 作成タイミング | `is_owner` | 作成時の `is_confirmed` |
//! |------|--------------|-----------|----------------------|
//! | オーナー | 旅行作成時 | true | true |
//! | 招待者 | 旅行作成時 / 招待 API | false | false |
//!
//! 招待者はメールで届く確認リンクから参加を確定する。

use chrono::{DateTime, Utc};

use crate::{trip::TripId, value_objects::Email};

define_uuid_id! {
    /// 参加者の一意識別子
    pub struct ParticipantId;
}

define_validated_string! {
    /// 参加者名（値オブジェクト）
    ///
    /// PII のため Debug 出力はマスクされる。空文字も受け付ける。
    pub struct ParticipantName {
        redact_debug
    }
}

/// DB から復元する際の行データ
pub struct ParticipantRecord {
    pub id:           ParticipantId,
    pub trip_id:      TripId,
    pub name:         Option<ParticipantName>,
    pub email:        Email,
    pub is_owner:     bool,
    pub is_confirmed: bool,
    pub created_at:   DateTime<Utc>,
}

/// 参加者エンティティ
///
/// # 不変条件
///
/// - オーナーは作成時点で確認済み
/// - 招待者は未確認で作成される
/// - `is_confirmed` は一度 true になったら false に戻らない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    id:           ParticipantId,
    trip_id:      TripId,
    name:         Option<ParticipantName>,
    email:        Email,
    is_owner:     bool,
    is_confirmed: bool,
    created_at:   DateTime<Utc>,
}

impl Participant {
    /// 旅行のオーナーを作成する（確認済み）
    pub fn new_owner(
        id: ParticipantId,
        trip_id: TripId,
        name: ParticipantName,
        email: Email,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            trip_id,
            name: Some(name),
            email,
            is_owner: true,
            is_confirmed: true,
            created_at: now,
        }
    }

    /// 招待者を作成する（未確認、名前なし）
    pub fn new_invitee(
        id: ParticipantId,
        trip_id: TripId,
        email: Email,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            trip_id,
            name: None,
            email,
            is_owner: false,
            is_confirmed: false,
            created_at: now,
        }
    }

    /// データベースから参加者を復元する
    pub fn from_db(record: ParticipantRecord) -> Self {
        Self {
            id:           record.id,
            trip_id:      record.trip_id,
            name:         record.name,
            email:        record.email,
            is_owner:     record.is_owner,
            is_confirmed: record.is_confirmed,
            created_at:   record.created_at,
        }
    }

    /// 確認済みの参加者を返す（冪等）
    pub fn confirmed(self) -> Self {
        Self {
            is_confirmed: true,
            ..self
        }
    }

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    pub fn name(&self) -> Option<&ParticipantName> {
        self.name.as_ref()
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn is_owner(&self) -> bool {
        self.is_owner
    }

    pub fn is_confirmed(&self) -> bool {
        self.is_confirmed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
