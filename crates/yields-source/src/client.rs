use std::{sync::Arc, time::Duration};

use moka::future::Cache;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use yields_metrics::{MetricsRegistry, RequestOutcome, UpstreamEndpoint};

use crate::{
    dto::{ChartPoint, Envelope, PoolRecord},
    error::SourceError,
    traits::YieldsSource,
};

pub const DEFAULT_BASE_URL: &str = "https://yields.llama.fi";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// HTTP client of the yields API. Responses are cached for `cache_ttl`.
pub struct YieldsApiClient {
    http_client: Client,
    base_url: String,
    pools_cache: Cache<String, Vec<PoolRecord>>,
    chart_cache: Cache<String, Vec<ChartPoint>>,
    metrics: Arc<MetricsRegistry>,
}

impl YieldsApiClient {
    pub fn new(config: ClientConfig, metrics: Arc<MetricsRegistry>) -> Result<Self, SourceError> {
        let http_client = http_client(config.request_timeout)?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            pools_cache: Cache::builder().time_to_live(config.cache_ttl).build(),
            chart_cache: Cache::builder()
                .time_to_live(config.cache_ttl)
                .max_capacity(1_000)
                .build(),
            metrics,
        })
    }

    /// `{base}/{segments...}`, each segment percent-encoded.
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            tracing::error!(base_url = %self.base_url, error = %e, "Invalid yields API url");
            SourceError::InternalServerError
        })?;
        url.path_segments_mut()
            .map_err(|()| SourceError::InternalServerError)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: UpstreamEndpoint,
        url: Url,
    ) -> Result<Vec<T>, SourceError> {
        let result = self.fetch_envelope(endpoint, url.clone()).await;
        self.metrics
            .upstream
            .record_request(endpoint, RequestOutcome::from_result(&result));

        if let Err(err) = &result {
            tracing::debug!(url = %url, error = %err, "Upstream request failed");
        }
        result
    }

    async fn fetch_envelope<T: DeserializeOwned>(
        &self,
        endpoint: UpstreamEndpoint,
        url: Url,
    ) -> Result<Vec<T>, SourceError> {
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                endpoint: endpoint.as_str(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let envelope = serde_json::from_slice::<Envelope<T>>(&bytes)?;
        Ok(envelope.data)
    }
}

#[async_trait::async_trait]
impl YieldsSource for YieldsApiClient {
    async fn get_pools(&self) -> Result<Vec<PoolRecord>, SourceError> {
        if let Some(cached) = self.pools_cache.get(&self.base_url).await {
            return Ok(cached);
        }

        self.refresh_pools().await
    }

    async fn refresh_pools(&self) -> Result<Vec<PoolRecord>, SourceError> {
        let pools: Vec<PoolRecord> = self
            .fetch(UpstreamEndpoint::Pools, self.endpoint_url(&["pools"])?)
            .await?;
        self.pools_cache
            .insert(self.base_url.clone(), pools.clone())
            .await;
        Ok(pools)
    }

    async fn get_pool_chart(&self, pool_id: &str) -> Result<Vec<ChartPoint>, SourceError> {
        let cache_key = format!("{}::{}", self.base_url, pool_id);
        if let Some(cached) = self.chart_cache.get(&cache_key).await {
            return Ok(cached);
        }

        let points: Vec<ChartPoint> = self
            .fetch(
                UpstreamEndpoint::Chart,
                self.endpoint_url(&["chart", pool_id])?,
            )
            .await?;
        self.chart_cache.insert(cache_key, points.clone()).await;
        Ok(points)
    }
}

pub fn http_client(timeout: Duration) -> Result<Client, SourceError> {
    Client::builder().timeout(timeout).build().map_err(|e| {
        tracing::error!("Failed to build HTTP client: {}", e);
        SourceError::InternalServerError
    })
}
