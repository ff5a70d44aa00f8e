//! # リンク
//!
//! 旅行に添付される外部リンク（予約サイト、宿泊先など）。
//! 作成後は変更されない。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{DomainError, trip::TripId};

define_uuid_id! {
    /// リンクの一意識別子
    pub struct LinkId;
}

define_validated_string! {
    /// リンクタイトル（値オブジェクト）。空文字も受け付ける
    pub struct LinkTitle {}
}

/// リンク URL（値オブジェクト）
///
/// 絶対 URL としてパースできる文字列のみを受け付ける。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkUrl(String);

impl LinkUrl {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        Url::parse(&value)
            .map_err(|e| DomainError::Validation(format!("URL の形式が不正です: {e}")))?;

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// リンクエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    id:         LinkId,
    trip_id:    TripId,
    title:      LinkTitle,
    url:        LinkUrl,
    created_at: DateTime<Utc>,
}

impl Link {
    /// 新しいリンクを作成する
    pub fn new(
        id: LinkId,
        trip_id: TripId,
        title: LinkTitle,
        url: LinkUrl,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            trip_id,
            title,
            url,
            created_at: now,
        }
    }

    pub fn id(&self) -> &LinkId {
        &self.id
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    pub fn title(&self) -> &LinkTitle {
        &self.title
    }

    pub fn url(&self) -> &LinkUrl {
        &self.url
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://www.airbnb.com/rooms/104700011")]
    #[case("http://localhost:3000/trips")]
    fn test_絶対urlを受け付ける(#[case] input: &str) {
        assert_eq!(LinkUrl::new(input).unwrap().as_str(), input);
    }

    #[rstest]
    #[case("")]
    #[case("not a url")]
    #[case("/relative/path")]
    fn test_不正なurlを拒否する(#[case] input: &str) {
        assert!(matches!(LinkUrl::new(input), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_タイトルは空文字でも作成できる() {
        assert_eq!(LinkTitle::new("").as_str(), "");
    }

    #[test]
    fn test_新しいリンクは渡した値を保持する() {
        let trip_id = TripId::new();
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let link = Link::new(
            LinkId::new(),
            trip_id.clone(),
            LinkTitle::new("Reserva do AirBnB"),
            LinkUrl::new("https://www.airbnb.com/rooms/1").unwrap(),
            now,
        );

        assert_eq!(link.trip_id(), &trip_id);
        assert_eq!(link.title().as_str(), "Reserva do AirBnB");
        assert_eq!(link.created_at(), now);
    }
}
