use crate::common::models::ErrorMessage;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use thiserror::Error;

/// Failures a blog handler can answer with. Each one maps to a status and an `ErrorMessage` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid UUID")]
    InvalidId,
    #[error("Blog id {0} not found")]
    NotFound(String),
    #[error("Unable to access database: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database(e) = &self {
            error!("[SERVER] unexpected sql error: {:?}", e);
        }
        (self.status(), Json(ErrorMessage::new(self.to_string()))).into_response()
    }
}
