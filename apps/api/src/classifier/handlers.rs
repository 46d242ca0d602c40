use axum::{body::Bytes, extract::State, Json};

use crate::classifier::Classification;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/classify
///
/// Body is the raw image. Returns the top house-style label.
pub async fn handle_classify(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Classification>, AppError> {
    if body.is_empty() {
        return Err(AppError::Validation("image body cannot be empty".to_string()));
    }

    let classification = state.classifier.classify(body).await?;

    Ok(Json(classification))
}
