pub mod ingestion;
pub mod query;
pub mod server;
pub mod snapshot;
