/// LLM Client: the single point of entry for all completion API calls in Hestia.
///
/// ARCHITECTURAL RULE: No other module may call the completion endpoint directly.
/// Prediction and chat both go through `CompletionClient::complete`.
///
/// Model: deepseek-chat (hardcoded: do not make configurable to prevent drift)
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod transport;

pub use transport::{ChatTransport, HttpTransport, RawResponse};

pub const DEEPSEEK_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
/// The model used for all completion calls in Hestia.
pub const MODEL: &str = "deepseek-chat";
const MAX_TOKENS: u32 = 500;
/// Default bound on a single completion exchange.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Completion request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Completion API returned an empty body")]
    EmptyBody,

    #[error("Response did not match the completion schema: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Completion API returned no choices")]
    NoChoices,
}

impl CompletionError {
    /// Whether a user-initiated retry has a reasonable chance of succeeding.
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            CompletionError::Transport(_) | CompletionError::Timeout(_) => true,
            CompletionError::Api { status, .. } => *status == 429 || *status >= 500,
            CompletionError::EmptyBody | CompletionError::Decode(_) | CompletionError::NoChoices => {
                false
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Request body for the chat-completions endpoint. Built fresh per call.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: &'static str,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn user(prompt: &str) -> Self {
        Self {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    #[allow(dead_code)]
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
    #[allow(dead_code)]
    pub index: u32,
    pub finish_reason: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice. Later choices are decoded but unused.
    pub fn text(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created, 0)
    }
}

/// The single completion client used by all services in Hestia.
/// Stateless across calls: each call builds its own request and response values.
#[derive(Clone)]
pub struct CompletionClient {
    transport: Arc<dyn ChatTransport>,
    deadline: Duration,
}

impl CompletionClient {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            deadline: DEFAULT_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Sends `prompt` as a single user message and returns the first choice's text.
    /// Bounded by the client's default deadline.
    pub async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.complete_with_deadline(prompt, self.deadline).await
    }

    /// Same as [`complete`](Self::complete) with an explicit deadline.
    /// Dropping the returned future cancels the in-flight request.
    pub async fn complete_with_deadline(
        &self,
        prompt: &str,
        deadline: Duration,
    ) -> Result<String, CompletionError> {
        let request = CompletionRequest::user(prompt);

        let raw = tokio::time::timeout(deadline, self.transport.send(&request))
            .await
            .map_err(|_| {
                warn!("Completion request timed out after {}s", deadline.as_secs());
                CompletionError::Timeout(deadline)
            })??;

        let response = decode_response(raw)?;
        let text = response.text().ok_or(CompletionError::NoChoices)?;

        debug!(
            "Completion succeeded: id={}, model={}, created={:?}, choices={}, finish_reason={:?}",
            response.id,
            response.model,
            response.created_at(),
            response.choices.len(),
            response.choices[0].finish_reason
        );
        debug!("Raw completion: {text}");

        Ok(text.to_string())
    }
}

/// Validates status and body, then decodes against the completion schema.
fn decode_response(raw: RawResponse) -> Result<CompletionResponse, CompletionError> {
    if !(200..=299).contains(&raw.status) {
        warn!("Completion API returned {}: {}", raw.status, raw.body);
        return Err(CompletionError::Api {
            status: raw.status,
            body: raw.body,
        });
    }

    if raw.body.trim().is_empty() {
        return Err(CompletionError::EmptyBody);
    }

    let response: CompletionResponse = serde_json::from_str(&raw.body).map_err(|e| {
        warn!("Completion decode error: {e}");
        CompletionError::Decode(e)
    })?;

    if response.choices.is_empty() {
        return Err(CompletionError::NoChoices);
    }

    Ok(response)
}
