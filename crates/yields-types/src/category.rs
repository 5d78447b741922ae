use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Projects listed as money markets by the yields API.
const LENDING_PROJECTS: [&str; 12] = [
    "aave-v2",
    "aave-v3",
    "compound-v2",
    "compound-v3",
    "morpho-blue",
    "morpho-aave",
    "morpho-compound",
    "spark",
    "euler",
    "radiant-v2",
    "venus-core-pool",
    "fluid-lending",
];

const LIQUID_STAKING_PROJECTS: [&str; 10] = [
    "lido",
    "rocket-pool",
    "frax-ether",
    "coinbase-wrapped-staked-eth",
    "stakewise-v2",
    "mantle-staked-eth",
    "binance-staked-eth",
    "jito",
    "marinade-liquid-staking",
    "stader",
];

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
    Hash,
    Eq,
    PartialEq,
    Display,
    AsRefStr,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum PoolCategory {
    Lending,
    #[serde(rename = "Liquid Staking")]
    #[strum(serialize = "Liquid Staking")]
    LiquidStaking,
    #[default]
    #[serde(rename = "Yield Aggregator")]
    #[strum(serialize = "Yield Aggregator")]
    YieldAggregator,
}

impl PoolCategory {
    /// Categorizes a pool from its upstream project identifier.
    ///
    /// Matching is exact but case-insensitive. Anything that is neither a known
    /// lending market nor a known liquid staking protocol is a yield aggregator.
    pub fn from_project(project: &str) -> Self {
        let project = project.trim();
        let is_in = |set: &[&str]| set.iter().any(|p| p.eq_ignore_ascii_case(project));

        if is_in(&LENDING_PROJECTS) {
            Self::Lending
        } else if is_in(&LIQUID_STAKING_PROJECTS) {
            Self::LiquidStaking
        } else {
            Self::YieldAggregator
        }
    }
}
