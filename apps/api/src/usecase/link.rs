//! リンクユースケース

use std::sync::Arc;

use planner_domain::{
    clock::Clock,
    link::{Link, LinkId, LinkTitle, LinkUrl},
    trip::TripId,
};
use planner_infra::{
    db::TransactionManager,
    repository::{LinkRepository, TripRepository},
};
use planner_shared::{event_log::event, log_business_event};

use super::require_trip;
use crate::error::ApiError;

/// リンク作成の入力
pub struct CreateLinkInput {
    pub title: String,
    pub url:   String,
}

/// リンクユースケース
pub struct LinkUseCaseImpl {
    trip_repo:  Arc<dyn TripRepository>,
    link_repo:  Arc<dyn LinkRepository>,
    tx_manager: Arc<dyn TransactionManager>,
    clock:      Arc<dyn Clock>,
}

impl LinkUseCaseImpl {
    pub fn new(
        trip_repo: Arc<dyn TripRepository>,
        link_repo: Arc<dyn LinkRepository>,
        tx_manager: Arc<dyn TransactionManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            trip_repo,
            link_repo,
            tx_manager,
            clock,
        }
    }

    /// 旅行にリンクを添付する
    pub async fn create_link(
        &self,
        trip_id: &TripId,
        input: CreateLinkInput,
    ) -> Result<Link, ApiError> {
        let title = LinkTitle::new(input.title);
        let url = LinkUrl::new(input.url)?;
        let trip = require_trip(self.trip_repo.as_ref(), trip_id).await?;

        let link = Link::new(LinkId::new(), trip.id().clone(), title, url, self.clock.now());

        let mut tx = self.tx_manager.begin().await?;
        self.link_repo.insert(&mut tx, &link).await?;
        tx.commit().await?;

        log_business_event!(
            event.category = event::category::LINK,
            event.action = event::action::LINK_CREATED,
            event.entity_type = event::entity_type::LINK,
            event.entity_id = %link.id(),
            event.result = event::result::SUCCESS,
            trip_id = %trip_id,
            "リンク作成"
        );

        Ok(link)
    }

    /// 旅行のリンク一覧を取得する
    pub async fn list_links(&self, trip_id: &TripId) -> Result<Vec<Link>, ApiError> {
        require_trip(self.trip_repo.as_ref(), trip_id).await?;
        Ok(self.link_repo.find_by_trip(trip_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_utils::PlannerTestSetup;

    fn input(url: &str) -> CreateLinkInput {
        CreateLinkInput {
            title: "Reserva do AirBnB".to_string(),
            url:   url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_linkは旅行にリンクを保存する() {
        let setup = PlannerTestSetup::new();
        let trip = setup.seed_trip("Florianópolis");
        let sut = setup.link_usecase();

        let link = sut
            .create_link(trip.id(), input("https://www.airbnb.com.br/rooms/104700011"))
            .await
            .unwrap();

        assert_eq!(link.trip_id(), trip.id());
        assert_eq!(link.title().as_str(), "Reserva do AirBnB");
        assert_eq!(setup.link_repo.links(), vec![link]);
        assert!(setup.sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn test_create_linkは不正なurlを拒否する() {
        let setup = PlannerTestSetup::new();
        let trip = setup.seed_trip("Florianópolis");
        let sut = setup.link_usecase();

        let result = sut.create_link(trip.id(), input("not a url")).await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
        assert!(setup.link_repo.links().is_empty());
    }

    #[tokio::test]
    async fn test_create_linkは存在しない旅行でnot_found() {
        let setup = PlannerTestSetup::new();
        let sut = setup.link_usecase();

        let result = sut
            .create_link(&TripId::new(), input("https://example.com"))
            .await;

        assert!(matches!(result, Err(ApiError::NotFound(msg)) if msg == "Trip not found!"));
        assert!(setup.link_repo.links().is_empty());
    }

    #[tokio::test]
    async fn test_list_linksは旅行のリンクだけを返す() {
        let setup = PlannerTestSetup::new();
        let trip = setup.seed_trip("Florianópolis");
        let other = setup.seed_trip("Lisboa");
        let sut = setup.link_usecase();
        let link = sut
            .create_link(trip.id(), input("https://example.com/a"))
            .await
            .unwrap();
        sut.create_link(other.id(), input("https://example.com/b"))
            .await
            .unwrap();

        let links = sut.list_links(trip.id()).await.unwrap();

        assert_eq!(links, vec![link]);
    }
}
