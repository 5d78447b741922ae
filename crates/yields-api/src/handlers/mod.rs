pub mod pools;

pub use pools::{get_pool_apy, get_pool_apy_monthly, list_pools, missing_pool_id};
