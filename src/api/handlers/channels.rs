use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use super::AppState;
use crate::api::models::{AddChannelRequest, ChannelCreated, ChannelStats, ChannelSummary};
use crate::errors::AppError;
use crate::services::ingestion::IngestionService;
use crate::services::query::QueryService;
use crate::youtube::VideoPlatform;

pub async fn add_channel<P: VideoPlatform>(
    State(state): State<Arc<AppState<P>>>,
    payload: Result<Json<AddChannelRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ChannelCreated>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let channel_name = request
        .channel_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AppError::Validation("channelName is required".to_string()))?;

    let outcome = IngestionService::new(&state.platform, &state.pool)
        .ingest(&channel_name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ChannelCreated {
            name: outcome.channel_name,
        }),
    ))
}

pub async fn get_channel_summary<P: VideoPlatform>(
    State(state): State<Arc<AppState<P>>>,
    Path(identifier): Path<String>,
) -> Result<Json<ChannelSummary>, AppError> {
    let summary = QueryService::new(&state.platform, &state.pool)
        .channel_summary(&identifier)
        .await?;
    Ok(Json(summary.into()))
}

pub async fn get_channel_stats<P: VideoPlatform>(
    State(state): State<Arc<AppState<P>>>,
    Path(identifier): Path<String>,
) -> Result<Json<ChannelStats>, AppError> {
    let snapshot = QueryService::new(&state.platform, &state.pool)
        .latest_metrics(&identifier)
        .await?;
    Ok(Json(snapshot.into()))
}

pub async fn delete_channel<P: VideoPlatform>(
    State(state): State<Arc<AppState<P>>>,
    Path(identifier): Path<String>,
) -> Result<StatusCode, AppError> {
    QueryService::new(&state.platform, &state.pool)
        .delete_channel(&identifier)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
