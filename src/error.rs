// region:    --- Imports
use crate::handlers::fixed_headers;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;
// endregion: --- Imports

// region:    --- Config Error
/// 시작 시 설정 오류
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {0}: {1}")]
    Invalid(&'static str, String),
}
// endregion: --- Config Error

// region:    --- Store Error
/// 문서 저장소 오류
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid collection name '{0}'")]
    InvalidCollection(String),
}
// endregion: --- Store Error

// region:    --- Api Error
/// 핸들러 오류. 응답으로 변환될 때 상태 코드가 결정된다.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required parameter {0}")]
    MissingParameter(&'static str),

    #[error("Missing required parameters {0} & {1}")]
    MissingParameters(&'static str, &'static str),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_)
            | ApiError::MissingParameters(..)
            | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::NotFound => (status, fixed_headers()).into_response(),
            ApiError::Store(_) | ApiError::PasswordHash(_) => {
                error!("{:<12} --> 요청 처리 실패: {}", "Api", self);
                (
                    status,
                    fixed_headers(),
                    Json(serde_json::json!({"error": "Internal server error"})),
                )
                    .into_response()
            }
            _ => (
                status,
                fixed_headers(),
                Json(serde_json::json!({"error": self.to_string()})),
            )
                .into_response(),
        }
    }
}
// endregion: --- Api Error
