pub mod channels;
pub mod connection;
pub mod metrics;
pub mod models;
pub mod setup;
pub mod video_stats;
pub mod videos;

pub use connection::{create_pool, get_connection, DbConn, DbPool};
pub use models::*;
