//! Research summaries from a hosted search API.
//!
//! Search never fails a generation: any problem is reported as
//! [`SearchOutcome::Unavailable`] and the caller writes without research notes.

use crate::config::SearchConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of a search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Summary text to feed into the prompt
    Summary(String),
    /// Why no summary is available
    Unavailable(String),
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn search(&self, query: &str) -> SearchOutcome;
}

/// Tavily search API provider.
pub struct TavilyProvider {
    api_key: String,
    endpoint: String,
    max_results: u32,
    client: reqwest::Client,
    timeout: Duration,
}

impl TavilyProvider {
    pub fn new(config: &SearchConfig, api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            endpoint: config.endpoint.clone(),
            max_results: config.max_results,
            client: reqwest::Client::new(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    search_depth: &'a str,
    include_answer: bool,
    max_results: u32,
}

#[derive(Deserialize)]
struct SearchResponse {
    answer: Option<String>,
}

fn parse_response(body: &str) -> SearchOutcome {
    match serde_json::from_str::<SearchResponse>(body) {
        Ok(SearchResponse {
            answer: Some(answer),
        }) if !answer.trim().is_empty() => SearchOutcome::Summary(answer.trim().to_string()),
        Ok(_) => SearchOutcome::Unavailable("response had no summary".to_string()),
        Err(e) => SearchOutcome::Unavailable(format!("failed to parse response: {e}")),
    }
}

#[async_trait]
impl SearchProvider for TavilyProvider {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(&self, query: &str) -> SearchOutcome {
        let body = SearchRequest {
            query,
            search_depth: "advanced",
            include_answer: true,
            max_results: self.max_results,
        };

        let resp = match self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => return SearchOutcome::Unavailable(format!("request failed: {e}")),
        };

        let status = resp.status();
        if !status.is_success() {
            return SearchOutcome::Unavailable(format!("HTTP {status}"));
        }

        match resp.text().await {
            Ok(text) => parse_response(&text),
            Err(e) => SearchOutcome::Unavailable(format!("failed to read response: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_with_answer() {
        let body = r#"{"query": "turmeric", "answer": " Curcumin reduces inflammation. ", "results": []}"#;
        assert_eq!(
            parse_response(body),
            SearchOutcome::Summary("Curcumin reduces inflammation.".into())
        );
    }

    #[test]
    fn test_parse_response_without_answer_is_unavailable() {
        assert!(matches!(
            parse_response(r#"{"results": []}"#),
            SearchOutcome::Unavailable(_)
        ));
        assert!(matches!(
            parse_response(r#"{"answer": ""}"#),
            SearchOutcome::Unavailable(_)
        ));
    }

    #[test]
    fn test_parse_response_garbage_is_unavailable() {
        assert!(matches!(
            parse_response("<html>"),
            SearchOutcome::Unavailable(ref reason) if reason.contains("parse")
        ));
    }

    #[test]
    fn test_request_asks_for_answer() {
        let body = SearchRequest {
            query: "turmeric",
            search_depth: "advanced",
            include_answer: true,
            max_results: 5,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["include_answer"], true);
        assert_eq!(json["max_results"], 5);
    }
}
