//! API Error Types

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use storage::StorageError;
use thiserror::Error;
use tracing::error;

use crate::pages;

/// Errors a handler cannot recover from locally
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to save student records: {0}")]
    Storage(#[from] StorageError),
    #[error("Records task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("{}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(pages::error_page(&self.to_string())),
        )
            .into_response()
    }
}
