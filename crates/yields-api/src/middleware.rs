use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use std::collections::HashSet;
use std::env;
use std::net::IpAddr;
use std::sync::Arc;
use tower_governor::key_extractor::{KeyExtractor, SmartIpKeyExtractor};

/// Rate limiting knobs, read from the environment when the API starts.
#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    pub enabled: bool,
    pub per_second: u64,
    pub burst_size: u32,
    pub cleanup_secs: u64,
    pub whitelist_domains: HashSet<String>,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            per_second: 2,
            burst_size: 10,
            cleanup_secs: 60,
            whitelist_domains: HashSet::new(),
        }
    }
}

impl RateLimitSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_or("RATE_LIMIT_ENABLED", defaults.enabled),
            per_second: env_or("RATE_LIMIT_PER_SECOND", defaults.per_second),
            burst_size: env_or("RATE_LIMIT_BURST_SIZE", defaults.burst_size),
            cleanup_secs: env_or("RATE_LIMIT_CLEANUP_INTERVAL_SECS", defaults.cleanup_secs),
            whitelist_domains: env::var("RATE_LIMIT_WHITELIST_DOMAINS")
                .map(|domains| parse_domains(&domains))
                .unwrap_or_default(),
        }
    }
}

pub fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_domains(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}

/// Returns `true` when the key still has quota.
pub type QuotaCheck = Arc<dyn Fn(&IpAddr) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct RateLimitConfig {
    pub has_quota: QuotaCheck,
    pub whitelist_domains: Arc<HashSet<String>>,
}

/// Extracts the domain from Origin or Referer header
fn extract_domain_from_headers(headers: &HeaderMap) -> Option<String> {
    ["origin", "referer"]
        .iter()
        .filter_map(|name| headers.get(*name))
        .find_map(|value| value.to_str().ok().and_then(extract_domain))
}

/// Extracts domain from a URL string
/// Examples:
/// - "https://example.com/path" -> "example.com"
/// - "http://app.example.com:3000/pools" -> "app.example.com"
fn extract_domain(url: &str) -> Option<String> {
    let without_protocol = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    let domain = without_protocol
        .split(&['/', ':', '?'][..])
        .next()?
        .to_lowercase();

    if domain.is_empty() { None } else { Some(domain) }
}

/// Lets whitelisted front ends through, rate limits everybody else by IP.
pub async fn rate_limit_middleware(
    config: RateLimitConfig,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(domain) = extract_domain_from_headers(request.headers()) {
        if config.whitelist_domains.contains(&domain) {
            tracing::debug!(
                domain = %domain,
                "Request from whitelisted domain, bypassing rate limit"
            );
            return Ok(next.run(request).await);
        }
    }

    let key = match SmartIpKeyExtractor.extract(&request) {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!(error = ?e, "Failed to extract IP for rate limiting");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if (config.has_quota)(&key) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!(key = ?key, "Rate limit exceeded");
        Err(StatusCode::TOO_MANY_REQUESTS)
    }
}
