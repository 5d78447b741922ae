use serde::Deserialize;
use utoipa::IntoParams;
use yields_types::PoolCategory;

/// Query parameters for the pool list endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PoolsQuery {
    /// Only return pools of this category
    #[serde(default)]
    pub category: Option<PoolCategory>,
}
