use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct YieldsCli {
    /// OTEL collector endpoint
    #[arg(long, env = "OTEL_COLLECTOR_ENDPOINT")]
    pub otel_collector_endpoint: Option<String>,

    /// API host
    #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
    pub api_host: String,

    /// API port
    #[arg(long, env = "API_PORT", default_value = "8080")]
    pub api_port: u16,

    /// Base url of the upstream yields API
    #[arg(long, env = "YIELDS_API_URL", default_value = "https://yields.llama.fi")]
    pub yields_api_url: String,

    /// Comma-separated pool identifiers to expose, replaces the built-in list
    #[arg(long, env = "POOL_ALLOW_LIST")]
    pub pool_allow_list: Option<String>,

    /// Lifetime of cached upstream responses, in seconds
    #[arg(long, env = "UPSTREAM_CACHE_TTL_SECS", default_value = "3600")]
    pub upstream_cache_ttl_secs: u64,

    /// Timeout of a single upstream request, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value = "10")]
    pub upstream_timeout_secs: u64,

    /// Interval between two refreshes of the upstream pool list, in seconds
    #[arg(long, env = "POOLS_REFRESH_INTERVAL_SECS", default_value = "900")]
    pub pools_refresh_interval_secs: u64,
}
