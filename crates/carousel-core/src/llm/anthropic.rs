//! Anthropic text provider using the Messages API.

use super::provider::{TextProvider, TextRequest, TextResponse};
use crate::error::{checked_body, RemoteError, RemoteResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const SERVICE: &str = "anthropic";

/// Anthropic provider using the Messages API.
pub struct AnthropicProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl AnthropicProvider {
    /// `base_url` is the API root, e.g. `https://api.anthropic.com/v1`.
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout: Duration) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
            endpoint: format!("{}/messages", base_url.trim_end_matches('/')),
            timeout,
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

// --- Response types ---

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseContent>,
    model: String,
    usage: Usage,
}

#[derive(Deserialize)]
struct ResponseContent {
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

fn parse_response(body: &str, latency_ms: u64) -> RemoteResult<TextResponse> {
    let messages_resp: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| RemoteError::request(SERVICE, format!("Failed to parse response: {e}")))?;

    let text = messages_resp
        .content
        .into_iter()
        .filter_map(|c| c.text)
        .collect::<Vec<_>>()
        .join("");

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(RemoteError::request(SERVICE, "Returned no text content"));
    }

    Ok(TextResponse {
        text,
        model: messages_resp.model,
        tokens_used: Some(messages_resp.usage.input_tokens + messages_resp.usage.output_tokens),
        latency_ms,
    })
}

#[async_trait]
impl TextProvider for AnthropicProvider {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn generate(&self, request: &TextRequest) -> RemoteResult<TextResponse> {
        let start = Instant::now();

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            temperature: Some(request.temperature),
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| RemoteError::request(SERVICE, format!("Request failed: {e}")))?;

        let status = resp.status().as_u16();
        let text = checked_body(SERVICE, status, resp.text().await)?;

        parse_response(&text, start.elapsed().as_millis() as u64)
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_joins_text_blocks() {
        let body = r#"{
            "model": "claude-sonnet-4-20250514",
            "content": [{"type": "text", "text": "Slide 1:"}, {"type": "text", "text": " Hook"}],
            "usage": {"input_tokens": 30, "output_tokens": 12}
        }"#;
        let response = parse_response(body, 7).unwrap();
        assert_eq!(response.text, "Slide 1: Hook");
        assert_eq!(response.tokens_used, Some(42));
        assert_eq!(response.latency_ms, 7);
    }

    #[test]
    fn test_parse_response_rejects_blank_content() {
        let body = r#"{
            "model": "claude",
            "content": [{"type": "text", "text": "   "}],
            "usage": {"input_tokens": 1, "output_tokens": 0}
        }"#;
        assert!(parse_response(body, 0).is_err());
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let provider = AnthropicProvider::new(
            "https://api.anthropic.com/v1",
            "ak",
            "claude",
            Duration::from_secs(1),
        );
        assert_eq!(provider.endpoint, "https://api.anthropic.com/v1/messages");
    }
}
