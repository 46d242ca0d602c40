//! Chat responder: gate, prompt, one completion call, user-facing reply.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::prompts::{build_chat_prompt, CHAT_FALLBACK, OFF_TOPIC_REPLY};
use crate::chat::relevance::is_in_domain;
use crate::llm_client::CompletionClient;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatOutcome {
    /// Completion text returned verbatim.
    Answered,
    /// Relevance gate rejected the message; no API call was made.
    OffTopic,
    /// The completion call failed; `content` is the fallback text.
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub id: Uuid,
    pub content: String,
    pub outcome: ChatOutcome,
    pub retryable: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatReply {
    fn new(content: String, outcome: ChatOutcome, retryable: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            outcome,
            retryable,
            created_at: Utc::now(),
        }
    }
}

/// Answers a single chat message. Never fails: every error path is a reply.
pub async fn respond(message: &str, llm: &CompletionClient) -> ChatReply {
    if !is_in_domain(message) {
        info!("Chat message rejected by relevance gate");
        return ChatReply::new(OFF_TOPIC_REPLY.to_string(), ChatOutcome::OffTopic, false);
    }

    let prompt = build_chat_prompt(message);

    match llm.complete(&prompt).await {
        Ok(text) => ChatReply::new(text, ChatOutcome::Answered, false),
        Err(e) => {
            warn!("Chat completion failed: {e}");
            ChatReply::new(CHAT_FALLBACK.to_string(), ChatOutcome::Fallback, e.is_retryable())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::prompts::CHAT_PERSONA_PREAMBLE;
    use crate::llm_client::tests::{ScriptedTransport, StalledTransport};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_in_domain_message_is_answered_verbatim() {
        let transport = Arc::new(ScriptedTransport::reply("**Rent** is about $550/week."));
        let llm = CompletionClient::new(transport.clone());

        let reply = respond("How much is the rent in Melbourne City?", &llm).await;

        assert_eq!(reply.outcome, ChatOutcome::Answered);
        assert_eq!(reply.content, "**Rent** is about $550/week.");
        let seen = transport.seen.lock().unwrap();
        assert!(seen[0].messages[0].content.starts_with(CHAT_PERSONA_PREAMBLE));
        assert!(seen[0].messages[0]
            .content
            .ends_with("How much is the rent in Melbourne City?"));
    }

    #[tokio::test]
    async fn test_off_topic_message_skips_api_call() {
        let transport = Arc::new(ScriptedTransport::reply("unused"));
        let llm = CompletionClient::new(transport.clone());

        let reply = respond("What's the weather today?", &llm).await;

        assert_eq!(reply.outcome, ChatOutcome::OffTopic);
        assert_eq!(reply.content, OFF_TOPIC_REPLY);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_api_error_becomes_fallback() {
        let llm = CompletionClient::new(Arc::new(ScriptedTransport::ok(500, "boom")));

        let reply = respond("Is Perth affordable?", &llm).await;

        assert_eq!(reply.outcome, ChatOutcome::Fallback);
        assert_eq!(reply.content, CHAT_FALLBACK);
        assert!(reply.retryable);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_becomes_retryable_fallback() {
        let llm = CompletionClient::new(Arc::new(StalledTransport))
            .with_deadline(Duration::from_secs(20));

        let reply = respond("Best suburb in Sydney?", &llm).await;

        assert_eq!(reply.outcome, ChatOutcome::Fallback);
        assert!(reply.retryable);
    }

    #[tokio::test]
    async fn test_each_reply_gets_fresh_id() {
        let llm = CompletionClient::new(Arc::new(ScriptedTransport::reply("ok")));
        let a = respond("rent?", &llm).await;
        let b = respond("rent?", &llm).await;
        assert_ne!(a.id, b.id);
    }
}
