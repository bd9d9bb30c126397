//! OpenAI text provider using the Chat Completions API.

use super::provider::{TextProvider, TextRequest, TextResponse};
use crate::error::{checked_body, RemoteError, RemoteResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const SERVICE: &str = "openai";

/// OpenAI provider using Chat Completions API.
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl OpenAiProvider {
    /// `base_url` is the API root, e.g. `https://api.openai.com/v1`.
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout: Duration) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            timeout,
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    model: String,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

fn parse_response(body: &str, latency_ms: u64) -> RemoteResult<TextResponse> {
    let chat_resp: ChatResponse = serde_json::from_str(body)
        .map_err(|e| RemoteError::request(SERVICE, format!("Failed to parse response: {e}")))?;

    let text = chat_resp
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| RemoteError::request(SERVICE, "Returned no content"))?;

    Ok(TextResponse {
        text,
        model: chat_resp.model,
        tokens_used: chat_resp.usage.map(|u| u.total_tokens),
        latency_ms,
    })
}

#[async_trait]
impl TextProvider for OpenAiProvider {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn generate(&self, request: &TextRequest) -> RemoteResult<TextResponse> {
        let start = Instant::now();

        let body = ChatRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| RemoteError::request(SERVICE, format!("Request failed: {e}")))?;

        let status = resp.status().as_u16();
        let text = checked_body(SERVICE, status, resp.text().await)?;

        let response = parse_response(&text, start.elapsed().as_millis() as u64)?;
        tracing::debug!(
            "OpenAI returned {} chars from {} in {}ms",
            response.text.len(),
            response.model,
            response.latency_ms
        );
        Ok(response)
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
