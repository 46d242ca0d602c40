//! Property prediction: orchestrates lookup, prompt, completion and parsing.
//!
//! Flow: income lookup (0 on miss) → build_prediction_prompt → complete →
//!       parse_prediction_lines → display tuples + markdown summary.
//!
//! Completion failures never surface as errors here. They become an
//! `Unavailable` outcome carrying the fallback text the client displays.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::income::IncomeTable;
use crate::llm_client::CompletionClient;
use crate::prediction::parser::{parse_prediction_lines, render_summary, FieldTuple, PredictionRecord};
use crate::prediction::prompts::build_prediction_prompt;

pub const PREDICTION_FALLBACK: &str = "Error: No response";

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRequest {
    pub state: String,
    pub suburb: String,
    pub property_type: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionOutcome {
    Predicted,
    Unavailable,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionEntry {
    #[serde(flatten)]
    pub record: PredictionRecord,
    pub display: FieldTuple,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub outcome: PredictionOutcome,
    pub base_income: u32,
    pub predictions: Vec<PredictionEntry>,
    pub summary: String,
    pub skipped_lines: usize,
    /// Only meaningful when `outcome` is `Unavailable`.
    pub retryable: bool,
}

/// Runs one prediction. Exactly one completion call is made.
pub async fn predict(
    request: &PredictionRequest,
    incomes: &IncomeTable,
    llm: &CompletionClient,
) -> PredictionReport {
    let base_income = incomes
        .lookup(&request.state, &request.suburb)
        .unwrap_or_else(|| {
            debug!(
                "No income data for {}, {}; using 0 baseline",
                request.suburb, request.state
            );
            0
        });

    let prompt = build_prediction_prompt(
        &request.state,
        &request.suburb,
        &request.property_type,
        request.bedrooms,
        request.bathrooms,
        base_income,
    );

    let reply = match llm.complete(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Prediction failed for {}, {}: {e}", request.suburb, request.state);
            return PredictionReport {
                outcome: PredictionOutcome::Unavailable,
                base_income,
                predictions: vec![],
                summary: PREDICTION_FALLBACK.to_string(),
                skipped_lines: 0,
                retryable: e.is_retryable(),
            };
        }
    };

    let parse = parse_prediction_lines(&reply);
    info!(
        "Prediction for {}, {}: {} records, {} skipped lines",
        request.suburb,
        request.state,
        parse.records.len(),
        parse.skipped.len()
    );

    let summary = render_summary(&parse.records);
    let predictions = parse
        .records
        .into_iter()
        .map(|record| PredictionEntry {
            display: FieldTuple::from_record(&record),
            record,
        })
        .collect();

    PredictionReport {
        outcome: PredictionOutcome::Predicted,
        base_income,
        predictions,
        summary,
        skipped_lines: parse.skipped.len(),
        retryable: false,
    }
}
