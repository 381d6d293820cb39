pub mod duration;
pub mod models;

pub use duration::parse_iso8601_duration;
pub use models::*;
