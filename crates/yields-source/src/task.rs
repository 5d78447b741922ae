use std::{sync::Arc, time::Duration};

use pragma_common::services::{Service, ServiceRunner};
use tokio::time;

use crate::traits::YieldsSource;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Periodically re-fetches the pool list so the response cache stays warm.
pub struct RefreshTask {
    source: Arc<dyn YieldsSource>,
    interval: Duration,
}

impl RefreshTask {
    pub fn new(source: Arc<dyn YieldsSource>, interval: Duration) -> Self {
        Self { source, interval }
    }
}

async fn refresh_forever(source: Arc<dyn YieldsSource>, every: Duration) -> anyhow::Result<()> {
    let mut interval = time::interval(every);

    loop {
        interval.tick().await;
        match source.refresh_pools().await {
            Ok(pools) => tracing::debug!(count = pools.len(), "Refreshed upstream pool list"),
            Err(e) => tracing::warn!(error = %e, "Failed to refresh upstream pool list"),
        }
    }
}

#[async_trait::async_trait]
impl Service for RefreshTask {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> anyhow::Result<()> {
        let source = Arc::clone(&self.source);
        let every = self.interval;

        runner.spawn_loop(move |ctx| async move {
            tracing::info!("🧩 Pool refresh task started, every {}s", every.as_secs());

            if let Some(result) = ctx.run_until_cancelled(refresh_forever(source, every)).await {
                result?;
            }

            anyhow::Ok(())
        });

        Ok(())
    }
}
