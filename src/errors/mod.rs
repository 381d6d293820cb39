use anyhow::Context as _;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced at the request boundary
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Cannot reconcile video {video_id}: {reason}")]
    Reconciliation { video_id: String, reason: &'static str },

    #[error("Upstream request failed: {0:#}")]
    Upstream(anyhow::Error),

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn channel_not_found() -> Self {
        AppError::NotFound("Channel not found".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) | AppError::Reconciliation { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            match &self {
                AppError::Upstream(_) => log::error!("Platform request failed ({}): {}", status, self),
                _ => log::error!("Request failed ({}): {}", status, self),
            }
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Add context to fetch errors
pub fn fetch_context(endpoint: &str) -> String {
    format!("Failed to fetch from: {}", endpoint)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Wrap result with fetch context
pub fn with_fetch_context<T, E>(result: Result<T, E>, endpoint: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(fetch_context(endpoint))
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_error_kind() {
        assert_eq!(AppError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::channel_not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Upstream(anyhow::anyhow!("timeout")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Reconciliation { video_id: "abc".into(), reason: "missing" }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_keeps_context_chain() {
        let err: anyhow::Error = anyhow::anyhow!("disk full");
        let err = AppError::from(err.context("Failed to insert video"));
        assert_eq!(err.to_string(), "Failed to insert video: disk full");
    }

    #[test]
    fn test_parse_context_wraps_error() {
        let result: Result<i64, _> = "abc".parse::<i64>();
        let err = with_parse_context(result, "viewCount").unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse viewCount");
    }
}
