use chrono::{DateTime, Utc};
use futures::future::join_all;
use yields_kpi::calculate_trailing_average;
use yields_metrics::UpstreamMetrics;
use yields_source::{SourceError, YieldsSource};
use yields_types::PoolCategory;

use crate::{allow_list::AllowList, dto::PoolSummary};

/// Fetches the upstream pool list, keeps the allow-listed pools (optionally of
/// a single category) and joins each of them with its 30-day mean APY.
///
/// Only a failure of the pool list itself is an error. A pool whose history
/// cannot be fetched is still returned, with no mean APY.
pub async fn collect_pool_summaries(
    source: &dyn YieldsSource,
    allow_list: &AllowList,
    category: Option<PoolCategory>,
    metrics: &UpstreamMetrics,
    now: DateTime<Utc>,
) -> Result<Vec<PoolSummary>, SourceError> {
    let pools = source.get_pools().await?;
    let listed = pools.len();

    let selected: Vec<_> = pools
        .into_iter()
        .filter(|record| allow_list.contains(&record.pool))
        .map(|record| {
            let pool_category = PoolCategory::from_project(&record.project);
            (record, pool_category)
        })
        .filter(|(_, pool_category)| category.is_none_or(|wanted| wanted == *pool_category))
        .collect();

    tracing::debug!(listed, selected = selected.len(), "Filtered upstream pools");

    let fetch_futures = selected.into_iter().map(|(record, pool_category)| async move {
        let apy_mean30d = match source.get_pool_samples(&record.pool).await {
            Ok(samples) => calculate_trailing_average(&samples, now),
            Err(err) => {
                tracing::warn!(
                    pool_id = %record.pool,
                    error = %err,
                    "Failed to fetch pool history, 30d mean left empty"
                );
                metrics.record_history_failure(&record.pool);
                None
            }
        };

        PoolSummary::new(record, pool_category, apy_mean30d)
    });

    Ok(join_all(fetch_futures).await)
}
