use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use yields_source::PoolRecord;
use yields_types::PoolCategory;

/// A pool of the dashboard: the upstream listing joined with its derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoolSummary {
    /// Upstream pool identifier
    pub pool: String,
    pub chain: String,
    pub project: String,
    pub symbol: String,
    /// Total value locked, in USD
    pub tvl_usd: Option<f64>,
    /// Current APY, in percent
    pub apy: Option<f64>,
    /// Mean APY over the last 30 days, in percent. `null` when unknown.
    pub apy_mean30d: Option<f64>,
    pub category: PoolCategory,
}

impl PoolSummary {
    pub fn new(record: PoolRecord, category: PoolCategory, apy_mean30d: Option<f64>) -> Self {
        Self {
            pool: record.pool,
            chain: record.chain,
            project: record.project,
            symbol: record.symbol,
            tvl_usd: record.tvl_usd,
            apy: record.apy,
            apy_mean30d,
            category,
        }
    }
}
