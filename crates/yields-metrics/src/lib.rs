use std::sync::Arc;

use opentelemetry::{KeyValue, global, metrics::Counter};

#[derive(Debug)]
pub struct MetricsRegistry {
    pub upstream: Arc<UpstreamMetrics>,
}

impl MetricsRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            upstream: UpstreamMetrics::new(),
        })
    }
}

#[derive(Debug)]
pub struct UpstreamMetrics {
    requests: Counter<u64>,
    history_failures: Counter<u64>,
}

impl UpstreamMetrics {
    fn new() -> Arc<Self> {
        let meter = global::meter("yields-api");
        let requests = meter
            .u64_counter("upstream_requests_total")
            .with_description("Number of requests made to the upstream yields API")
            .with_unit("count")
            .init();

        let history_failures = meter
            .u64_counter("pool_history_failures_total")
            .with_description("Number of pool histories that could not be fetched")
            .with_unit("count")
            .init();

        Arc::new(Self {
            requests,
            history_failures,
        })
    }

    pub fn record_request(&self, endpoint: UpstreamEndpoint, outcome: RequestOutcome) {
        self.requests.add(
            1,
            &[
                KeyValue::new("endpoint", endpoint.as_str()),
                KeyValue::new("outcome", outcome.as_str()),
            ],
        );
    }

    pub fn record_history_failure(&self, pool_id: &str) {
        self.history_failures
            .add(1, &[KeyValue::new("pool_id", pool_id.to_string())]);
    }
}

#[derive(Clone, Copy, Debug)]
pub enum UpstreamEndpoint {
    Pools,
    Chart,
}

impl UpstreamEndpoint {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pools => "pools",
            Self::Chart => "chart",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum RequestOutcome {
    Success,
    Failure,
}

impl RequestOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }

    pub const fn from_result<T, E>(result: &Result<T, E>) -> Self {
        if result.is_ok() {
            Self::Success
        } else {
            Self::Failure
        }
    }
}
