use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    AppState,
    dto::{ApiResponse, PoolSummary, PoolsQuery},
    errors::ApiError,
    pools::collect_pool_summaries,
};

#[utoipa::path(
    get,
    path = "/api/pools",
    tag = "Pools",
    params(PoolsQuery),
    responses(
        (status = 200, description = "Allow-listed pools with their 30d mean APY", body = [PoolSummary]),
        (status = 400, description = "Invalid parameters"),
        (status = 500, description = "Upstream pool list unavailable")
    )
)]
pub async fn list_pools(
    State(state): State<AppState>,
    Query(params): Query<PoolsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let pools = collect_pool_summaries(
        state.source.as_ref(),
        &state.allow_list,
        params.category,
        &state.metrics.upstream,
        Utc::now(),
    )
    .await
    .map_err(|err| {
        tracing::error!(error = %err, "Failed to fetch upstream pool list");
        ApiError::pools_unavailable()
    })?;

    Ok(Json(ApiResponse::ok(pools)))
}
