//! # リンクハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /trips/{trip_id}/links` - リンク作成
//! - `GET /trips/{trip_id}/links` - 旅行のリンク一覧

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use planner_domain::{link::Link, trip::TripId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{CreatedResponse, UuidPath, ValidatedJson};
use crate::{
    error::ApiError,
    usecase::{CreateLinkInput, LinkUseCaseImpl},
};

/// リンク API の共有状態
pub struct LinkState {
    pub usecase: LinkUseCaseImpl,
}

/// リンク作成リクエスト
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    pub title: String,
    #[validate(url)]
    pub url:   String,
}

/// リンク DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LinkDto {
    pub id:      Uuid,
    pub trip_id: Uuid,
    pub title:   String,
    pub url:     String,
}

impl From<&Link> for LinkDto {
    fn from(link: &Link) -> Self {
        Self {
            id:      *link.id().as_uuid(),
            trip_id: *link.trip_id().as_uuid(),
            title:   link.title().as_str().to_string(),
            url:     link.url().as_str().to_string(),
        }
    }
}

/// POST /trips/{trip_id}/links
///
/// ## レスポンス
///
/// - `201 Created`: `{"id": ...}`
/// - `400 Bad Request`: タイトルが空、URL が不正
/// - `404 Not Found`: 旅行が存在しない
#[tracing::instrument(skip_all)]
pub async fn create_link(
    State(state): State<Arc<LinkState>>,
    UuidPath(trip_id): UuidPath,
    ValidatedJson(req): ValidatedJson<CreateLinkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateLinkInput {
        title: req.title,
        url:   req.url,
    };

    let link = state
        .usecase
        .create_link(&TripId::from_uuid(trip_id), input)
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(*link.id().as_uuid()))))
}

/// GET /trips/{trip_id}/links
#[tracing::instrument(skip_all)]
pub async fn list_links(
    State(state): State<Arc<LinkState>>,
    UuidPath(trip_id): UuidPath,
) -> Result<impl IntoResponse, ApiError> {
    let links = state.usecase.list_links(&TripId::from_uuid(trip_id)).await?;

    let items: Vec<LinkDto> = links.iter().map(LinkDto::from).collect();
    Ok((StatusCode::OK, Json(items)))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;
    use crate::test_utils::{PlannerTestSetup, response_body};

    fn link_request(trip_id: impl std::fmt::Display, title: &str, url: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(format!("/trips/{trip_id}/links"))
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "title": title, "url": url }).to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn test_post_links_201で作成したリンクが一覧に現れる() {
        // Given
        let setup = PlannerTestSetup::new();
        let trip = setup.seed_trip("Florianópolis");

        // When
        let response = setup
            .router()
            .oneshot(link_request(
                trip.id(),
                "Reserva do AirBnB",
                "https://www.airbnb.com.br/rooms/104700011",
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: CreatedResponse = response_body(response).await;

        let request = Request::builder()
            .uri(format!("/trips/{}/links", trip.id()))
            .body(Body::empty())
            .unwrap();
        let response = setup.router().oneshot(request).await.unwrap();
        let listed: Vec<LinkDto> = response_body(response).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].url, "https://www.airbnb.com.br/rooms/104700011");
    }

    #[tokio::test]
    async fn test_post_links_タイトルが空でも201() {
        let setup = PlannerTestSetup::new();
        let trip = setup.seed_trip("Florianópolis");

        let response = setup
            .router()
            .oneshot(link_request(trip.id(), "", "https://x.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let links = setup.link_repo.links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title().as_str(), "");
    }

    #[tokio::test]
    async fn test_post_links_urlが不正なら400() {
        let setup = PlannerTestSetup::new();
        let trip = setup.seed_trip("Florianópolis");

        let response = setup
            .router()
            .oneshot(link_request(trip.id(), "Reserva", "airbnb"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(setup.link_repo.links().is_empty());
    }

    #[tokio::test]
    async fn test_post_links_旅行が存在しなければ404() {
        let setup = PlannerTestSetup::new();

        let response = setup
            .router()
            .oneshot(link_request(Uuid::new_v4(), "Reserva", "https://example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
