use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::api::handlers::{
    AppState,
    channels::{add_channel, delete_channel, get_channel_stats, get_channel_summary},
    videos::{get_popular_videos, get_video_performance},
};
use crate::youtube::VideoPlatform;

pub fn create_router<P: VideoPlatform + 'static>(state: Arc<AppState<P>>) -> Router {
    Router::new()
        .route("/api/channels", post(add_channel::<P>))
        .route("/api/channels/:identifier", delete(delete_channel::<P>))
        .route("/api/channels/:identifier/summary", get(get_channel_summary::<P>))
        .route("/api/channels/:identifier/stats", get(get_channel_stats::<P>))
        .route("/api/videos/popular", get(get_popular_videos::<P>))
        .route("/api/videos/:video_id/performance", get(get_video_performance::<P>))
        .with_state(state)
}
