use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown buddy: {0}")]
    UnknownBuddy(String),

    #[error("Unknown screen: {0}")]
    UnknownScreen(String),

    #[error("Unknown walk time: {0}")]
    UnknownWalkTime(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Feedback rejected with status {0}")]
    FeedbackRejected(u16),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::UnknownBuddy(_) | AppError::UnknownScreen(_) | AppError::UnknownWalkTime(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::AssetNotFound(_) => StatusCode::NOT_FOUND,
            AppError::FeedbackRejected(_) | AppError::Http(_) => StatusCode::BAD_GATEWAY,
            AppError::Io(_) | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
