//! Image generation for carousel slides.
//!
//! One request per slide, no retry policy. The OpenAI Images API returns a
//! hosted URL which is passed straight through to the UI.

use crate::config::ImageConfig;
use crate::error::{checked_body, RemoteError, RemoteResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Generates one image for a text description.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the URL of the generated image.
    async fn generate(&self, prompt: &str) -> RemoteResult<String>;
}

const SERVICE: &str = "openai-images";

/// OpenAI Images API provider.
pub struct OpenAiImageProvider {
    api_key: String,
    model: String,
    size: String,
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl OpenAiImageProvider {
    pub fn new(config: &ImageConfig, api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: config.model.clone(),
            size: config.size.clone(),
            client: reqwest::Client::new(),
            endpoint: format!(
                "{}/images/generations",
                config.endpoint.trim_end_matches('/')
            ),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    n: u32,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
}

fn parse_response(body: &str) -> RemoteResult<String> {
    let resp: ImageResponse = serde_json::from_str(body)
        .map_err(|e| RemoteError::request(SERVICE, format!("Failed to parse response: {e}")))?;
    resp.data
        .into_iter()
        .find_map(|d| d.url)
        .ok_or_else(|| RemoteError::request(SERVICE, "Returned no image URL"))
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn generate(&self, prompt: &str) -> RemoteResult<String> {
        let body = ImageRequest {
            model: &self.model,
            prompt,
            size: &self.size,
            n: 1,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| RemoteError::request(SERVICE, format!("Request failed: {e}")))?;

        let status = resp.status().as_u16();
        let text = checked_body(SERVICE, status, resp.text().await)?;

        parse_response(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_fixed_size() {
        let body = ImageRequest {
            model: "dall-e-3",
            prompt: "turmeric root",
            size: "1024x1024",
            n: 1,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["size"], "1024x1024");
        assert_eq!(json["n"], 1);
    }

    #[test]
    fn test_parse_response_returns_first_url() {
        let body = r#"{"created": 1, "data": [{"url": "https://img.example/a.png", "revised_prompt": "x"}]}"#;
        assert_eq!(parse_response(body).unwrap(), "https://img.example/a.png");
    }

    #[test]
    fn test_parse_response_without_url_is_error() {
        let body = r#"{"data": [{"b64_json": "AAAA"}]}"#;
        assert!(parse_response(body).is_err());
    }

    #[test]
    fn test_endpoint_from_config() {
        let provider = OpenAiImageProvider::new(&ImageConfig::default(), "sk");
        assert_eq!(
            provider.endpoint,
            "https://api.openai.com/v1/images/generations"
        );
        assert_eq!(provider.size, "1024x1024");
    }
}
