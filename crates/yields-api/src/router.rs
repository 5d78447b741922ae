use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use utoipa::OpenApi as OpenApiT;
use utoipa_swagger_ui::SwaggerUi;

use crate::{AppState, errors::ApiError, handlers};

pub fn api_router<T: OpenApiT>() -> Router<AppState> {
    let open_api = T::openapi();

    Router::new()
        .route("/health", get(health))
        .route("/api/pools", get(handlers::list_pools))
        .route("/api/apy", get(handlers::missing_pool_id))
        .route("/api/apy/", get(handlers::missing_pool_id))
        .route("/api/apy/{pool_id}", get(handlers::get_pool_apy))
        .route(
            "/api/apy/{pool_id}/monthly",
            get(handlers::get_pool_apy_monthly),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", open_api))
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> ApiError {
    ApiError::NotFound("The requested resource was not found".to_string())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::Request,
    };
    use chrono::{Datelike, Duration, TimeZone, Utc};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        docs::ApiDoc,
        test_utils::{FakeSource, app_state, point, pool},
    };

    async fn get_json(state: AppState, uri: &str) -> (StatusCode, Value) {
        let app = api_router::<ApiDoc>().with_state(state);
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_list_pools() {
        let now = Utc::now();
        let source =
            FakeSource::with_pools(vec![pool("a", "aave-v3", 4.0), pool("x", "lido", 3.0)])
                .chart("a", vec![point(now - Duration::days(1), 2.0)]);

        let (status, body) = get_json(app_state(source, &["a"]), "/api/pools").await;

        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["pool"], "a");
        assert_eq!(data[0]["category"], "Lending");
        assert_eq!(data[0]["tvlUsd"], 1_000_000.0);
        assert_eq!(data[0]["apyMean30d"], 2.0);
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_list_pools_filtered_by_category() {
        let source =
            FakeSource::with_pools(vec![pool("a", "aave-v3", 4.0), pool("b", "lido", 3.0)]);

        let (status, body) = get_json(
            app_state(source, &["a", "b"]),
            "/api/pools?category=Liquid%20Staking",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["pool"], "b");
        assert_eq!(data[0]["apyMean30d"], Value::Null);
    }

    #[tokio::test]
    async fn test_list_pools_upstream_failure() {
        let (status, body) =
            get_json(app_state(FakeSource::default(), &["a"]), "/api/pools").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch pools data");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_pool_apy_history() {
        let now = Utc::now();
        let source = FakeSource::default().chart(
            "a",
            vec![
                point(now - Duration::days(1), 5.0),
                point(now - Duration::days(2), 4.0),
            ],
        );

        let (status, body) = get_json(app_state(source, &[]), "/api/apy/a").await;

        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["apy"], 4.0);
        assert_eq!(data[1]["apy"], 5.0);
    }

    #[tokio::test]
    async fn test_pool_apy_missing_identifier() {
        for uri in ["/api/apy", "/api/apy/", "/api/apy/%20"] {
            let (status, body) = get_json(app_state(FakeSource::default(), &[]), uri).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], "Pool ID is required");
        }
    }

    #[tokio::test]
    async fn test_pool_apy_upstream_failure() {
        let (status, body) =
            get_json(app_state(FakeSource::default(), &[]), "/api/apy/unknown").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch APY data");
    }

    #[tokio::test]
    async fn test_pool_apy_monthly() {
        let now = Utc::now();
        let first_of_month = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .unwrap();
        let source = FakeSource::default().chart("a", vec![point(first_of_month, 3.0)]);

        let (status, body) = get_json(app_state(source, &[]), "/api/apy/a/monthly").await;

        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["month"], first_of_month.format("%b %Y").to_string());
        assert_eq!(data[0]["apy"], 3.0);
    }

    #[tokio::test]
    async fn test_health_and_fallback() {
        let (status, _) = get_json(app_state(FakeSource::default(), &[]), "/health").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = get_json(app_state(FakeSource::default(), &[]), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }
}
