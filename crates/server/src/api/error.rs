use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::feedback::FeedbackStoreError;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Feedback storage error: {0}")]
    Storage(#[from] FeedbackStoreError),

    #[error("Processing error: {0}")]
    Processing(#[from] anyhow::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Processing(e) => {
                error!("Error during recommendation process: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while processing recommendations".to_string(),
                )
            }
            AppError::Storage(_) | AppError::Internal(_) => {
                error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
