pub mod apy;
pub mod list;

pub use apy::{get_pool_apy, get_pool_apy_monthly, missing_pool_id};
pub use list::list_pools;
