use yields_types::YieldSample;

use crate::{
    dto::{ChartPoint, PoolRecord},
    error::SourceError,
};

#[async_trait::async_trait]
pub trait YieldsSource: Send + Sync {
    async fn get_pools(&self) -> Result<Vec<PoolRecord>, SourceError>;

    async fn get_pool_chart(&self, pool_id: &str) -> Result<Vec<ChartPoint>, SourceError>;

    /// Fetches the pool list from upstream even when a cached copy is still
    /// live, replacing that copy on success.
    async fn refresh_pools(&self) -> Result<Vec<PoolRecord>, SourceError> {
        self.get_pools().await
    }

    /// Historical APY of a pool, malformed points dropped, oldest first.
    async fn get_pool_samples(&self, pool_id: &str) -> Result<Vec<YieldSample>, SourceError> {
        let points = self.get_pool_chart(pool_id).await?;
        let mut samples: Vec<YieldSample> =
            points.iter().filter_map(ChartPoint::to_sample).collect();
        samples.sort_by_key(|s| s.timestamp);
        Ok(samples)
    }
}
