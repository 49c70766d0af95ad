//! Mission Error Types
//!
//! This module provides mission-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use kernel::id::MissionId;
use thiserror::Error;

/// Mission-specific result type alias
pub type MissionResult<T> = Result<T, MissionError>;

#[derive(Debug, Error)]
pub enum MissionError {
    /// Title missing or blank
    #[error("Mission title must not be empty")]
    EmptyTitle,

    #[error("Mission {0} not found")]
    NotFound(MissionId),

    /// Read deadline elapsed before the store answered
    #[error("Request timeout")]
    Timeout,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MissionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MissionError::EmptyTitle => StatusCode::BAD_REQUEST,
            MissionError::NotFound(_) => StatusCode::NOT_FOUND,
            MissionError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            MissionError::Database(_) | MissionError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            MissionError::Database(e) => {
                tracing::error!(error = %e, "Mission database error");
            }
            MissionError::Internal(msg) => {
                tracing::error!(message = %msg, "Mission internal error");
            }
            MissionError::Timeout => {
                tracing::warn!("Mission fetch timed out");
            }
            _ => {
                tracing::debug!(error = %self, "Mission request rejected");
            }
        }
    }
}

/// Backend details travel only as the error source, never as client text
impl From<MissionError> for AppError {
    fn from(err: MissionError) -> Self {
        match err {
            MissionError::EmptyTitle => AppError::bad_request(err.to_string()),
            MissionError::NotFound(_) => AppError::not_found(err.to_string()),
            MissionError::Timeout => AppError::gateway_timeout(err.to_string()),
            MissionError::Database(e) => AppError::internal("Internal Server Error").with_source(e),
            MissionError::Internal(_) => AppError::internal("Internal Server Error"),
        }
    }
}

impl IntoResponse for MissionError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
