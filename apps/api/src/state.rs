use std::sync::Arc;

use crate::classifier::ImageClassifier;
use crate::income::IncomeTable;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub llm: CompletionClient,
    pub incomes: Arc<IncomeTable>,
    /// Pluggable house-style classifier. Default: UnavailableClassifier.
    pub classifier: Arc<dyn ImageClassifier>,
}
