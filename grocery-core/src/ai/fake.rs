//! Fake AI client for testing.
//!
//! Returns canned responses selected by substring match against the request
//! transcript, so flows can be exercised without network access or API costs.

use async_trait::async_trait;
use std::sync::Mutex;

use super::{AiClient, AiError, ChatRequest, ChatResponse, Usage};

/// A fake AI client for testing.
///
/// Patterns are checked in insertion order; the first one contained in the
/// request (case-insensitive) wins. Every call is recorded.
#[derive(Debug, Default)]
pub struct FakeAiClient {
    responses: Vec<(String, String)>,
    default_response: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeAiClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client that answers prompts containing `pattern` with `response`.
    pub fn with_response(pattern: &str, response: &str) -> Self {
        Self::new().and_response(pattern, response)
    }

    /// Add a response for prompts containing a specific substring.
    pub fn and_response(mut self, pattern: &str, response: &str) -> Self {
        self.responses
            .push((pattern.to_lowercase(), response.to_string()));
        self
    }

    /// Set the response used when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Prompt names of every call made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(prompt_name.to_string());
        }

        let transcript = request.transcript().to_lowercase();
        let content = self
            .responses
            .iter()
            .find(|(pattern, _)| transcript.contains(pattern))
            .map(|(_, response)| response.clone())
            .or_else(|| self.default_response.clone())
            .ok_or_else(|| {
                AiError::Api(format!(
                    "FakeAiClient: no response configured for prompt {}",
                    prompt_name
                ))
            })?;

        Ok(ChatResponse {
            content,
            usage: Usage::default(),
            cached: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> ChatRequest {
        ChatRequest::json("system", text, 16, 0.0)
    }

    #[tokio::test]
    async fn test_fake_client_matching() {
        let client = FakeAiClient::with_response("rice", r#"{"price": 2}"#);
        let response = client
            .complete("price_lookup", request("Item: Basmati Rice"))
            .await
            .unwrap();
        assert_eq!(response.content, r#"{"price": 2}"#);
        assert_eq!(client.calls(), vec!["price_lookup".to_string()]);
    }

    #[tokio::test]
    async fn test_first_pattern_wins() {
        let client = FakeAiClient::with_response("milk", "first").and_response("whole", "second");
        let response = client.complete("p", request("Whole Milk")).await.unwrap();
        assert_eq!(response.content, "first");
    }

    #[tokio::test]
    async fn test_fake_client_no_match() {
        let client = FakeAiClient::new();
        let result = client.complete("p", request("anything")).await;
        assert!(matches!(result, Err(AiError::Api(_))));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fake_client_default_response() {
        let client = FakeAiClient::new().with_default_response("{}");
        let response = client.complete("p", request("anything")).await.unwrap();
        assert_eq!(response.content, "{}");
    }
}
