mod cli;

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use pragma_common::{
    services::{Service, ServiceGroup},
    telemetry::init_telemetry,
};
use url::Url;

use crate::cli::YieldsCli;
use yields_api::{AllowList, ApiService, AppState};
use yields_metrics::MetricsRegistry;
use yields_source::{ClientConfig, RefreshTask, YieldsApiClient, YieldsSource};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let YieldsCli {
        otel_collector_endpoint,
        api_host,
        api_port,
        yields_api_url,
        pool_allow_list,
        upstream_cache_ttl_secs,
        upstream_timeout_secs,
        pools_refresh_interval_secs,
    } = YieldsCli::parse();

    let app_name = "yields_api";
    if let Err(e) = init_telemetry(app_name, otel_collector_endpoint) {
        panic!("Could not init telemetry: {e}");
    }

    let base_url = Url::parse(&yields_api_url)
        .with_context(|| format!("Invalid YIELDS_API_URL: {yields_api_url}"))?;

    let metrics = MetricsRegistry::new();
    let client_config = ClientConfig {
        base_url: base_url.to_string(),
        cache_ttl: Duration::from_secs(upstream_cache_ttl_secs),
        request_timeout: Duration::from_secs(upstream_timeout_secs),
    };
    let source: Arc<dyn YieldsSource> =
        Arc::new(YieldsApiClient::new(client_config, metrics.clone())?);

    let allow_list = pool_allow_list
        .as_deref()
        .map_or_else(AllowList::default, AllowList::parse);
    if allow_list.is_empty() {
        tracing::warn!("POOL_ALLOW_LIST is empty, /api/pools will always be empty");
    }

    let app_state = AppState {
        source: source.clone(),
        allow_list: Arc::new(allow_list),
        metrics,
    };

    let api_service = ApiService::new(app_state, &api_host, api_port);

    let refresh_every = Duration::from_secs(pools_refresh_interval_secs.max(1));
    let refresh_service = RefreshTask::new(source, refresh_every);

    ServiceGroup::default()
        .with(api_service)
        .with(refresh_service)
        .start_and_drive_to_end()
        .await?;

    Ok(())
}
