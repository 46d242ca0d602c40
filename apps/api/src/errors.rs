use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::classifier::ClassificationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Completion failures are not listed: prediction and chat recover them into
/// fallback replies before they reach a handler.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Classification error: {0}")]
    Classification(#[from] ClassificationError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Classification(e) => match e {
                ClassificationError::ModelLoading => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CLASSIFIER_UNAVAILABLE",
                    e.to_string(),
                ),
                ClassificationError::ImageConversion => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INVALID_IMAGE",
                    e.to_string(),
                ),
                ClassificationError::Classification(msg) => {
                    tracing::error!("Classification error: {msg}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "CLASSIFICATION_ERROR",
                        "The image could not be classified".to_string(),
                    )
                }
            },
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
