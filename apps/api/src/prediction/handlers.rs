//! Axum route handlers for the Prediction API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::prediction::predictor::{predict, PredictionReport, PredictionRequest};
use crate::state::AppState;

/// POST /api/v1/predict
///
/// Estimates purchase/rental income requirements and price ranges for
/// 2025, 2030 and 2040. Completion failures come back as a 200 with
/// `outcome: "unavailable"` so the client can show its fallback text.
pub async fn handle_predict(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionReport>, AppError> {
    validate(&request)?;

    let report = predict(&request, &state.incomes, &state.llm).await;

    Ok(Json(report))
}

fn validate(request: &PredictionRequest) -> Result<(), AppError> {
    for (field, value) in [
        ("state", &request.state),
        ("suburb", &request.suburb),
        ("property_type", &request.property_type),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} cannot be empty")));
        }
    }
    if request.bedrooms == 0 || request.bathrooms == 0 {
        return Err(AppError::Validation(
            "bedrooms and bathrooms must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PredictionRequest {
        PredictionRequest {
            state: "VIC".to_string(),
            suburb: "Clayton".to_string(),
            property_type: "Apartment".to_string(),
            bedrooms: 2,
            bathrooms: 1,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn test_blank_suburb_rejected() {
        let mut req = request();
        req.suburb = "   ".to_string();
        assert!(matches!(validate(&req), Err(AppError::Validation(m)) if m.contains("suburb")));
    }

    #[test]
    fn test_zero_rooms_rejected() {
        let mut req = request();
        req.bathrooms = 0;
        assert!(matches!(validate(&req), Err(AppError::Validation(_))));
    }
}
