//! Gemini `generateContent` provider

use super::prompt::response_schema;
use super::InsightProvider;
use anyhow::{anyhow, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Connection settings for the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Without a key every request fails before touching the network
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub const DEFAULT_MODEL: &'static str = "gemini-3-flash-preview";
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Loads config from env vars:
    /// - `GEMINI_API_KEY`      (no default)
    /// - `GEMINI_MODEL`        (default: `gemini-3-flash-preview`)
    /// - `GEMINI_BASE_URL`     (default: `https://generativelanguage.googleapis.com`)
    /// - `GEMINI_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        let timeout_secs = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECS);

        Self {
            api_key,
            model,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: Self::DEFAULT_MODEL.to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Insight provider backed by Gemini's JSON-mode generation
#[derive(Debug, Clone)]
pub struct GeminiInsightProvider {
    http: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl GeminiInsightProvider {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        // Without a trailing slash `join` would drop the last path segment
        let base_url = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };
        let base = Url::parse(&base_url)
            .with_context(|| format!("Invalid GEMINI_BASE_URL: {}", config.base_url))?;
        let endpoint = base
            .join(&format!("v1beta/models/{}:generateContent", config.model))
            .context("Failed to build Gemini generateContent URL")?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl InsightProvider for GeminiInsightProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("GEMINI_API_KEY is not set"))?;

        let response: GenerateContentResponse = self
            .http
            .post(self.endpoint.clone())
            .header("x-goog-api-key", api_key)
            .json(&request_body(prompt))
            .send()
            .await
            .with_context(|| format!("POST {} failed", self.endpoint))?
            .error_for_status()
            .with_context(|| format!("POST {} returned non-success status", self.endpoint))?
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", self.endpoint))?;

        response_text(response)
    }
}

fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [
            { "role": "user", "parts": [ { "text": prompt } ] }
        ],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}

fn response_text(response: GenerateContentResponse) -> Result<String> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .ok_or_else(|| anyhow!("Gemini response had no candidate content"))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(anyhow!("Gemini response text was empty"));
    }
    Ok(text.to_string())
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let provider = GeminiInsightProvider::new(GeminiConfig::default()).unwrap();
        assert_eq!(
            provider.endpoint().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_base_url_path_is_kept() {
        for base_url in ["https://proxy.internal/gemini", "https://proxy.internal/gemini/"] {
            let config = GeminiConfig {
                base_url: base_url.to_string(),
                model: "test-model".to_string(),
                ..GeminiConfig::default()
            };
            let provider = GeminiInsightProvider::new(config).unwrap();
            assert_eq!(
                provider.endpoint().as_str(),
                "https://proxy.internal/gemini/v1beta/models/test-model:generateContent"
            );
        }
    }

    #[test]
    fn test_invalid_base_url() {
        let config = GeminiConfig {
            base_url: "not a url".to_string(),
            ..GeminiConfig::default()
        };
        assert!(GeminiInsightProvider::new(config).is_err());
    }

    #[test]
    fn test_request_body() {
        let body = request_body("hello");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_response_text() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":" {\"analysis\":\"a\","},{"text":"\"proTip\":\"b\",\"warning\":\"c\"} "}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            response_text(response).unwrap(),
            r#"{"analysis":"a","proTip":"b","warning":"c"}"#
        );

        let empty: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(response_text(empty).is_err());
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let provider = GeminiInsightProvider::new(GeminiConfig::default()).unwrap();
        let err = provider.generate("prompt").await.unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
