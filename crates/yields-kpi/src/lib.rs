pub mod monthly;
pub mod trailing;

pub use monthly::resample_monthly;
pub use trailing::calculate_trailing_average;
