//! Transport seam for the completion client.
//!
//! `CompletionClient` owns the deadline and the response contract; a
//! `ChatTransport` only moves one request over the wire and hands back the
//! status and body. Tests swap in doubles that stall or return canned bodies.

use async_trait::async_trait;
use reqwest::Client;

use super::{CompletionError, CompletionRequest};

/// Status code and undecoded body of a completion exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Issues exactly one request. Must not retry.
    async fn send(&self, request: &CompletionRequest) -> Result<RawResponse, CompletionError>;
}

/// HTTPS transport backed by `reqwest`, authenticated with a bearer token.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(url: String, api_key: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().build()?,
            url,
            api_key,
        })
    }

    fn build_request(&self, request: &CompletionRequest) -> Result<reqwest::Request, reqwest::Error> {
        self.client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .build()
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &CompletionRequest) -> Result<RawResponse, CompletionError> {
        let http_request = self
            .build_request(request)
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let response = self
            .client
            .execute(http_request)
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> HttpTransport {
        HttpTransport::new(
            "https://api.deepseek.com/v1/chat/completions".to_string(),
            "sk-test".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_request_carries_bearer_and_content_type() {
        let request = transport()
            .build_request(&CompletionRequest::user("hi"))
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://api.deepseek.com/v1/chat/completions"
        );
        assert_eq!(request.headers()["authorization"], "Bearer sk-test");
        assert_eq!(request.headers()["content-type"], "application/json");
    }

    #[test]
    fn test_request_body_is_completion_json() {
        let request = transport()
            .build_request(&CompletionRequest::user("hi"))
            .unwrap();
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(bytes).unwrap();

        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
    }
}
