use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One point of a pool's historical APY series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct YieldSample {
    pub timestamp: DateTime<Utc>,
    /// Annualized yield, in percent
    pub apy: f64,
}

impl YieldSample {
    pub const fn new(timestamp: DateTime<Utc>, apy: f64) -> Self {
        Self { timestamp, apy }
    }

    /// Builds a sample from an upstream chart point.
    ///
    /// Returns `None` when the timestamp is missing or unparsable, or when the
    /// yield is missing or not finite.
    pub fn from_raw(timestamp: Option<&str>, apy: Option<f64>) -> Option<Self> {
        let apy = apy.filter(|v| v.is_finite())?;
        let timestamp = parse_timestamp(timestamp?)?;
        Some(Self { timestamp, apy })
    }

    pub const fn is_valid(&self) -> bool {
        self.apy.is_finite()
    }
}

/// Chart point re-sampled to a calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlySample {
    /// e.g. "Mar 2026"
    pub month: String,
    pub timestamp: DateTime<Utc>,
    pub apy: f64,
}

// The yields API sends RFC3339 strings, older payloads used unix seconds.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}
