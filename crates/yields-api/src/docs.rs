#![allow(clippy::needless_for_each)]

use anyhow::Result;
use serde_json::to_string_pretty;
use std::path::PathBuf;
use utoipa::OpenApi;

use crate::{dto::PoolSummary, handlers};
use yields_types::{MonthlySample, PoolCategory, YieldSample};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::pools::list::list_pools,
        handlers::pools::apy::get_pool_apy,
        handlers::pools::apy::get_pool_apy_monthly,
    ),
    components(schemas(PoolSummary, PoolCategory, YieldSample, MonthlySample)),
    tags(
        (name = "yields_bin", description = "DeFi yields dashboard API"),
        (name = "Pools", description = "Yield pool endpoints")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn generate_openapi_json(output_path: PathBuf) -> Result<()> {
        let openapi = Self::openapi();
        let json = to_string_pretty(&openapi)?;

        let file_path = output_path.join("openapi.json");

        tracing::info!("Saving OpenAPI specs to {}...", file_path.display());

        std::fs::write(&file_path, json)?;
        tracing::info!("OpenAPI specs saved!");
        Ok(())
    }
}
