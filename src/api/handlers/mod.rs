use crate::database::DbPool;

pub mod channels;
pub mod videos;

/// Shared by every request; each handler checks out its own connection
pub struct AppState<P> {
    pub pool: DbPool,
    pub platform: P,
}
