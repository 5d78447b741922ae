use serde::{Deserialize, Deserializer, Serialize};
use yields_types::YieldSample;

/// Envelope wrapping every payload of the yields API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    pub data: Vec<T>,
}

/// A pool as listed by `GET /pools`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRecord {
    pub pool: String,
    #[serde(default)]
    pub chain: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tvl_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub apy: Option<f64>,
}

/// A point of `GET /chart/{pool}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    #[serde(default)]
    pub timestamp: Option<RawTimestamp>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub apy: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tvl_usd: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Text(String),
    Seconds(i64),
}

impl ChartPoint {
    /// `None` for points without a usable timestamp or APY.
    pub fn to_sample(&self) -> Option<YieldSample> {
        let timestamp = match self.timestamp.as_ref()? {
            RawTimestamp::Text(text) => text.clone(),
            RawTimestamp::Seconds(secs) => secs.to_string(),
        };
        YieldSample::from_raw(Some(&timestamp), self.apy)
    }
}

// Numbers occasionally come back as strings, anything unreadable becomes null.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
