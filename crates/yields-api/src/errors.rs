use crate::dto::ApiResponse;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const POOLS_FETCH_FAILED: &str = "Failed to fetch pools data";
pub const APY_FETCH_FAILED: &str = "Failed to fetch APY data";
pub const POOL_ID_REQUIRED: &str = "Pool ID is required";

#[derive(Error, Debug, Serialize, Deserialize)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl ApiError {
    pub fn pools_unavailable() -> Self {
        Self::Upstream(POOLS_FETCH_FAILED.to_string())
    }

    pub fn apy_unavailable() -> Self {
        Self::Upstream(APY_FETCH_FAILED.to_string())
    }

    pub fn missing_pool_id() -> Self {
        Self::BadRequest(POOL_ID_REQUIRED.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, msg) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let response: ApiResponse<()> = ApiResponse::error(msg);
        (status, Json(response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_fixed_messages() {
        let (status, body) = render(ApiError::pools_unavailable()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": POOLS_FETCH_FAILED }));

        let (status, body) = render(ApiError::missing_pool_id()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], POOL_ID_REQUIRED);
    }
}
