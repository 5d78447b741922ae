pub mod category;
pub mod sample;
pub mod wallet;

pub use category::PoolCategory;
pub use sample::{MonthlySample, YieldSample};
pub use wallet::ProviderErrorKind;
