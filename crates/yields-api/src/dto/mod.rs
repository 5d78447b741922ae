pub mod pool;
pub mod query;
pub mod response;

pub use pool::*;
pub use query::*;
pub use response::*;
