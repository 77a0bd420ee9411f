/// HTTP 핸들러
/// 요청 흐름: 파라미터 추출 -> 검증 -> 저장소 작업 한 번 -> (상품만) 알림 -> 응답
// region:    --- Imports
use crate::error::{ApiError, ApiResult};
use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequestParts, Path, Query};
use axum::http::header::{HeaderName, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::convert::Infallible;

pub mod bid;
pub mod product;
pub mod user;
// endregion: --- Imports

// region:    --- Parameter Names
pub const ID: &str = "Id";
pub const PRODUCT_ID: &str = "ProductId";
pub const USER_NAME: &str = "UserName";
pub const PASSWORD: &str = "Password";
// endregion: --- Parameter Names

// region:    --- Request Params
/// 경로 파라미터와 쿼리 파라미터. 같은 이름이면 경로 파라미터가 우선한다.
#[derive(Debug, Default, Clone)]
pub struct RequestParams {
    path: Option<HashMap<String, String>>,
    query: Option<HashMap<String, String>>,
}

impl RequestParams {
    pub fn new(
        path: Option<HashMap<String, String>>,
        query: Option<HashMap<String, String>>,
    ) -> Self {
        Self { path, query }
    }

    /// 경로 -> 쿼리 순으로 조회. 키가 경로에 있으면 값이 비어 있어도 경로 값을 쓴다.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.path
            .as_ref()
            .and_then(|p| p.get(name))
            .or_else(|| self.query.as_ref().and_then(|q| q.get(name)))
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// 비어 있지 않은 값이 필요할 때
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// 필수 파라미터. 없거나 비어 있으면 400
    pub fn require(&self, name: &'static str) -> ApiResult<&str> {
        self.non_empty(name).ok_or(ApiError::MissingParameter(name))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|Path(p)| p);
        let query = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|Query(q)| q);
        Ok(Self::new(path, query))
    }
}
// endregion: --- Request Params

// region:    --- Responses
/// 모든 응답에 붙는 고정 헤더
pub fn fixed_headers() -> [(HeaderName, &'static str); 2] {
    [
        (CONTENT_TYPE, "application/json"),
        (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    ]
}

/// 200 + JSON 본문
pub fn ok_json<T: Serialize>(body: T) -> Response {
    (StatusCode::OK, fixed_headers(), Json(body)).into_response()
}

/// 200 + 빈 본문
pub fn ok_empty() -> Response {
    (StatusCode::OK, fixed_headers()).into_response()
}

/// 요청 본문 역직렬화. 실패하면 400
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

/// 상태 확인
pub async fn handle_health() -> Response {
    ok_json(serde_json::json!({"status": "ok"}))
}
// endregion: --- Responses

// endregion: --- Tests
