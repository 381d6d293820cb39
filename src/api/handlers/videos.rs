use axum::{
    extract::{Path, Query, State, rejection::QueryRejection},
    response::Json,
};
use std::sync::Arc;

use super::AppState;
use crate::api::models::{PerformancePoint, PopularParams, PopularVideo};
use crate::errors::AppError;
use crate::services::query::{DEFAULT_MIN_VIEWS, QueryService};
use crate::youtube::VideoPlatform;

pub async fn get_popular_videos<P: VideoPlatform>(
    State(state): State<Arc<AppState<P>>>,
    params: Result<Query<PopularParams>, QueryRejection>,
) -> Result<Json<Vec<PopularVideo>>, AppError> {
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;
    let min_views = params.min_views.unwrap_or(DEFAULT_MIN_VIEWS);

    let rows = QueryService::new(&state.platform, &state.pool).popular_videos(min_views)?;
    Ok(Json(rows.into_iter().map(PopularVideo::from).collect()))
}

pub async fn get_video_performance<P: VideoPlatform>(
    State(state): State<Arc<AppState<P>>>,
    Path(video_id): Path<String>,
) -> Result<Json<Vec<PerformancePoint>>, AppError> {
    let series = QueryService::new(&state.platform, &state.pool).video_performance(&video_id)?;
    Ok(Json(series.into_iter().map(PerformancePoint::from).collect()))
}
