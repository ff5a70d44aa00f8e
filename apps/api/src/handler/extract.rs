//! # リクエスト抽出器
//!
//! axum 標準の `Json` / `Path` をラップし、リジェクションを [`ApiError`] に揃える。
//! ハンドラに届いた時点で入力はスキーマ検証済みになる。

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;

/// `validator` で検証済みの JSON ボディ
///
/// JSON として読めない場合と `validate()` が失敗した場合は
/// [`ApiError::Validation`]（400）になる。
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::Validation(errors.to_string()))?;

        Ok(Self(value))
    }
}

/// UUID 形式のパスパラメータ（1 つだけのルート用）
///
/// UUID として解釈できない場合は [`ApiError::Validation`]（400）になる。
#[derive(Debug, Clone, Copy)]
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        Ok(Self(id))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::StatusCode,
        routing::{get, post},
    };
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(email)]
        email: String,
    }

    async fn echo_email(ValidatedJson(probe): ValidatedJson<Probe>) -> String {
        probe.email
    }

    async fn echo_id(UuidPath(id): UuidPath) -> String {
        id.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/probe", post(echo_email))
            .route("/probe/{id}", get(echo_id))
    }

    fn post_json(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/probe")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_検証を通過したボディはハンドラに届く() {
        let response = app()
            .oneshot(post_json(r#"{"email":"a@x.com"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_検証エラーは400になる() {
        let response = app()
            .oneshot(post_json(r#"{"email":"not-an-email"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_壊れたjsonは400になる() {
        let response = app().oneshot(post_json("{")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_uuidでないパスは400になる() {
        let request = Request::builder()
            .uri("/probe/not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
