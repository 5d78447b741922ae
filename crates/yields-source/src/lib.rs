pub mod client;
pub mod dto;
pub mod error;
pub mod task;
pub mod traits;

pub use client::{ClientConfig, YieldsApiClient};
pub use dto::{ChartPoint, PoolRecord};
pub use error::SourceError;
pub use task::RefreshTask;
pub use traits::YieldsSource;
