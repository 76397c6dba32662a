use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by the data-access handlers and the RPC router.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input was malformed or violated a field rule. Storage is never touched.
    #[error("{0}")]
    Validation(String),

    #[error("Todo with ID: {0} not found")]
    NotFound(i64),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Storage(_) => "STORAGE_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Storage(ref e) => {
                tracing::error!(error = ?e, "storage failure");
                "error"
            }
            _ => "fail",
        };

        let body = json!({
            "status": status,
            "code": self.code(),
            "message": self.to_string(),
        });

        (self.status_code(), Json(body)).into_response()
    }
}
