use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::Barrier;
use yields_metrics::MetricsRegistry;
use yields_source::{ChartPoint, PoolRecord, SourceError, YieldsSource, dto::RawTimestamp};

use crate::{AppState, allow_list::AllowList};

/// In-memory source. Pools missing from `charts` fail their history fetch.
#[derive(Default)]
pub(crate) struct FakeSource {
    pub(crate) pools: Option<Vec<PoolRecord>>,
    pub(crate) charts: HashMap<String, Vec<ChartPoint>>,
    /// When set, every chart request waits until this many are in flight.
    pub(crate) chart_barrier: Option<Arc<Barrier>>,
}

impl FakeSource {
    pub(crate) fn with_pools(pools: Vec<PoolRecord>) -> Self {
        Self {
            pools: Some(pools),
            ..Self::default()
        }
    }

    pub(crate) fn charts_in_lockstep(mut self, in_flight: usize) -> Self {
        self.chart_barrier = Some(Arc::new(Barrier::new(in_flight)));
        self
    }

    pub(crate) fn chart(mut self, pool_id: &str, points: Vec<ChartPoint>) -> Self {
        self.charts.insert(pool_id.to_string(), points);
        self
    }
}

#[async_trait::async_trait]
impl YieldsSource for FakeSource {
    async fn get_pools(&self) -> Result<Vec<PoolRecord>, SourceError> {
        self.pools.clone().ok_or(SourceError::UnexpectedStatus {
            endpoint: "pools",
            status: 502,
        })
    }

    async fn get_pool_chart(&self, pool_id: &str) -> Result<Vec<ChartPoint>, SourceError> {
        if let Some(barrier) = &self.chart_barrier {
            barrier.wait().await;
        }
        self.charts
            .get(pool_id)
            .cloned()
            .ok_or(SourceError::UnexpectedStatus {
                endpoint: "chart",
                status: 500,
            })
    }
}

pub(crate) fn pool(id: &str, project: &str, apy: f64) -> PoolRecord {
    PoolRecord {
        pool: id.to_string(),
        chain: "Ethereum".to_string(),
        project: project.to_string(),
        symbol: "USDC".to_string(),
        tvl_usd: Some(1_000_000.0),
        apy: Some(apy),
    }
}

pub(crate) fn point(at: DateTime<Utc>, apy: f64) -> ChartPoint {
    ChartPoint {
        timestamp: Some(RawTimestamp::Text(at.to_rfc3339())),
        apy: Some(apy),
        tvl_usd: None,
    }
}

pub(crate) fn app_state(source: FakeSource, allow_list: &[&str]) -> AppState {
    AppState {
        source: Arc::new(source),
        allow_list: Arc::new(AllowList::new(allow_list.iter().copied())),
        metrics: MetricsRegistry::new(),
    }
}
