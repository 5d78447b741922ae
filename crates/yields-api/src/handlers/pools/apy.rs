use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use yields_kpi::resample_monthly;
use yields_types::{MonthlySample, YieldSample};

use crate::{AppState, dto::ApiResponse, errors::ApiError};

async fn fetch_samples(state: &AppState, pool_id: &str) -> Result<Vec<YieldSample>, ApiError> {
    let pool_id = pool_id.trim();
    if pool_id.is_empty() {
        return Err(ApiError::missing_pool_id());
    }

    state.source.get_pool_samples(pool_id).await.map_err(|err| {
        tracing::error!(pool_id, error = %err, "Failed to fetch pool history");
        ApiError::apy_unavailable()
    })
}

#[utoipa::path(
    get,
    path = "/api/apy/{pool_id}",
    tag = "Pools",
    params(
        ("pool_id" = String, Path, description = "Upstream pool identifier")
    ),
    responses(
        (status = 200, description = "Historical APY, oldest first", body = [YieldSample]),
        (status = 400, description = "Missing pool identifier"),
        (status = 500, description = "Upstream history unavailable")
    )
)]
pub async fn get_pool_apy(
    State(state): State<AppState>,
    Path(pool_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let samples = fetch_samples(&state, &pool_id).await?;

    Ok(Json(ApiResponse::ok(samples)))
}

#[utoipa::path(
    get,
    path = "/api/apy/{pool_id}/monthly",
    tag = "Pools",
    params(
        ("pool_id" = String, Path, description = "Upstream pool identifier")
    ),
    responses(
        (status = 200, description = "APY sampled on the 1st of each of the last 12 months", body = [MonthlySample]),
        (status = 400, description = "Missing pool identifier"),
        (status = 500, description = "Upstream history unavailable")
    )
)]
pub async fn get_pool_apy_monthly(
    State(state): State<AppState>,
    Path(pool_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let samples = fetch_samples(&state, &pool_id).await?;
    let monthly = resample_monthly(&samples, Utc::now());

    Ok(Json(ApiResponse::ok(monthly)))
}

/// `/api/apy` without an identifier.
pub async fn missing_pool_id() -> ApiError {
    ApiError::missing_pool_id()
}
