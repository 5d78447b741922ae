pub mod allow_list;
pub mod docs;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod pools;
pub mod router;

#[cfg(test)]
mod test_utils;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::{env, time::Duration};

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum_tracing_opentelemetry::middleware::{OtelAxumLayer, OtelInResponseLayer};
use tokio::net::TcpListener;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::SmartIpKeyExtractor;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use pragma_common::services::{Service, ServiceRunner};
use yields_metrics::MetricsRegistry;
use yields_source::YieldsSource;

pub use allow_list::AllowList;
pub use docs::ApiDoc;
use middleware::{QuotaCheck, RateLimitConfig, RateLimitSettings, env_or};
use router::api_router;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn YieldsSource>,
    pub allow_list: Arc<AllowList>,
    pub metrics: Arc<MetricsRegistry>,
}

pub struct ApiService {
    state: AppState,
    host: String,
    port: u16,
}

impl ApiService {
    pub fn new(state: AppState, host: &str, port: u16) -> Self {
        Self {
            state,
            host: host.to_owned(),
            port,
        }
    }
}

fn cors_layer_from_env() -> CorsLayer {
    let Ok(origins) = env::var("CORS_ALLOWED_ORIGINS") else {
        tracing::info!("CORS_ALLOWED_ORIGINS not set; using permissive CORS configuration");
        return CorsLayer::permissive();
    };

    let allowed_origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(
                    origin,
                    error = %err,
                    "Invalid origin in CORS_ALLOWED_ORIGINS, skipping",
                );
                None
            }
        })
        .collect();

    if allowed_origins.is_empty() {
        tracing::warn!(
            "CORS_ALLOWED_ORIGINS was set but no valid origins were parsed; falling back to permissive CORS",
        );
        return CorsLayer::permissive();
    }

    tracing::info!(allowed = %origins, "Configured restricted CORS origins from environment");

    // The dashboard only reads.
    CorsLayer::new()
        .allow_headers(AllowHeaders::mirror_request())
        .allow_methods(AllowMethods::list([Method::GET, Method::OPTIONS]))
        .allow_origin(AllowOrigin::list(allowed_origins))
}

#[async_trait::async_trait]
impl Service for ApiService {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> anyhow::Result<()> {
        ApiDoc::generate_openapi_json("./".into())?;

        let host = self.host.clone();
        let port = self.port;
        let state = self.state.clone();

        runner.spawn_loop(move |ctx| async move {
            let address = format!("{host}:{port}");
            let socket_addr: SocketAddr = address.parse()?;
            let listener = TcpListener::bind(socket_addr).await?;

            let rate_limit = RateLimitSettings::from_env();
            if !rate_limit.whitelist_domains.is_empty() {
                tracing::info!(
                    whitelist = ?rate_limit.whitelist_domains,
                    "Rate limiting whitelist configured"
                );
            }

            let timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS);
            tracing::info!(timeout_secs, "Request timeout configured");

            tracing::info!(
                pools = ?state.allow_list.iter().collect::<Vec<_>>(),
                "Serving pools from the allow-list"
            );

            #[allow(clippy::default_constructed_unit_structs)]
            let app = {
                let base = api_router::<ApiDoc>()
                    .with_state(state)
                    // include trace context as header into the response
                    .layer(OtelInResponseLayer::default())
                    // start OpenTelemetry trace on incoming request
                    .layer(OtelAxumLayer::default());

                let base = if rate_limit.enabled {
                    let governor_conf = GovernorConfigBuilder::default()
                        .per_second(rate_limit.per_second)
                        .burst_size(rate_limit.burst_size)
                        .key_extractor(SmartIpKeyExtractor)
                        .finish()
                        .context("Invalid rate limiting configuration")?;

                    let limiter = governor_conf.limiter().clone();

                    // Periodic cleanup of the limiter's internal storage.
                    let limiter_cleanup = limiter.clone();
                    let cancel_token = ctx.token.clone();
                    let cleanup_every = Duration::from_secs(rate_limit.cleanup_secs);
                    tokio::spawn(async move {
                        let mut ticker = tokio::time::interval(cleanup_every);
                        loop {
                            tokio::select! {
                                _ = ticker.tick() => {
                                    tracing::debug!("rate limiting storage size: {}", limiter_cleanup.len());
                                    limiter_cleanup.retain_recent();
                                }
                                () = cancel_token.cancelled() => {
                                    tracing::debug!("rate limiter cleanup task shutting down");
                                    break;
                                }
                            }
                        }
                    });

                    let has_quota: QuotaCheck =
                        Arc::new(move |key: &IpAddr| limiter.check_key(key).is_ok());
                    let rate_limit_config = RateLimitConfig {
                        has_quota,
                        whitelist_domains: Arc::new(rate_limit.whitelist_domains),
                    };

                    base.layer(axum::middleware::from_fn(move |req, next| {
                        let config = rate_limit_config.clone();
                        middleware::rate_limit_middleware(config, req, next)
                    }))
                } else {
                    tracing::info!("rate limiter disabled via env");
                    base
                };

                base.layer(TimeoutLayer::new(Duration::from_secs(timeout_secs)))
                    .layer(cors_layer_from_env())
            };

            tracing::info!("🧩 API started at http://{}", socket_addr);

            let token = ctx.token.clone();
            let shutdown = async move { token.cancelled().await };

            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(shutdown)
            .await
            .context("😱 API server stopped!")
        });

        Ok(())
    }
}
