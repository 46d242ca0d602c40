use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SuburbQuery {
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct StatesResponse {
    pub states: Vec<String>,
}

#[derive(Serialize)]
pub struct SuburbsResponse {
    pub state: String,
    pub suburbs: Vec<String>,
}

#[derive(Serialize)]
pub struct IncomeResponse {
    pub state: String,
    pub suburb: String,
    pub median_income: u32,
}

/// GET /api/v1/states
pub async fn handle_list_states(State(state): State<AppState>) -> Json<StatesResponse> {
    let states = state.incomes.states().into_iter().map(String::from).collect();
    Json(StatesResponse { states })
}

/// GET /api/v1/states/:state/suburbs?q=
pub async fn handle_list_suburbs(
    State(state): State<AppState>,
    Path(state_name): Path<String>,
    Query(params): Query<SuburbQuery>,
) -> Result<Json<SuburbsResponse>, AppError> {
    let suburbs = state
        .incomes
        .suburbs(&state_name, params.q.as_deref())
        .ok_or_else(|| AppError::NotFound(format!("State {state_name} not found")))?
        .into_iter()
        .map(String::from)
        .collect();

    Ok(Json(SuburbsResponse {
        state: state_name,
        suburbs,
    }))
}

/// GET /api/v1/income/:state/:suburb
pub async fn handle_get_income(
    State(state): State<AppState>,
    Path((state_name, suburb)): Path<(String, String)>,
) -> Result<Json<IncomeResponse>, AppError> {
    let median_income = state
        .incomes
        .lookup(&state_name, &suburb)
        .ok_or_else(|| AppError::NotFound(format!("No income data for {suburb}, {state_name}")))?;

    Ok(Json(IncomeResponse {
        state: state_name,
        suburb,
        median_income,
    }))
}
