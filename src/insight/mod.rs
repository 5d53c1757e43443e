//! Optional narrative insights about a projection
//!
//! Insights come from an external text model behind [`InsightProvider`]. The
//! engine never depends on them: every provider failure collapses into
//! [`InsightUnavailable`] at [`request_insight`].

mod prompt;
mod gemini;

pub use prompt::{build_prompt, response_schema};
pub use gemini::{GeminiConfig, GeminiInsightProvider};

use crate::investment::InvestmentInput;
use crate::projection::ProjectionResult;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

/// Structured commentary on a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub analysis: String,
    pub pro_tip: String,
    pub warning: String,
}

/// Raised whenever an insight could not be produced, whatever the cause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unable to connect to AI advisor. Please try again.")]
pub struct InsightUnavailable;

/// A text model that answers an insight prompt with JSON text
pub trait InsightProvider {
    fn generate(&self, prompt: &str) -> impl Future<Output = anyhow::Result<String>> + Send;
}

/// Parse the model's answer into an [`Insight`]
///
/// Accepts surrounding whitespace and a Markdown code fence around the JSON.
pub fn parse_insight(text: &str) -> anyhow::Result<Insight> {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        body = rest.strip_suffix("```").unwrap_or(rest).trim();
    }
    if body.is_empty() {
        anyhow::bail!("insight response was empty");
    }
    Ok(serde_json::from_str(body)?)
}

/// Ask `provider` for an insight on this projection
pub async fn request_insight<P: InsightProvider>(
    provider: &P,
    input: &InvestmentInput,
    result: &ProjectionResult,
) -> Result<Insight, InsightUnavailable> {
    let prompt = build_prompt(input, result);

    let text = provider.generate(&prompt).await.map_err(|e| {
        log::warn!("insight provider failed: {:#}", e);
        InsightUnavailable
    })?;

    parse_insight(&text).map_err(|e| {
        log::warn!("insight response was malformed: {:#}", e);
        InsightUnavailable
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;
    use std::sync::Mutex;

    struct CannedProvider {
        reply: anyhow::Result<String>,
        seen: Mutex<Vec<String>>,
    }

    impl CannedProvider {
        fn ok(text: &str) -> Self {
            Self { reply: Ok(text.to_string()), seen: Mutex::new(Vec::new()) }
        }

        fn failing(message: &str) -> Self {
            Self { reply: Err(anyhow::anyhow!(message.to_string())), seen: Mutex::new(Vec::new()) }
        }
    }

    impl InsightProvider for CannedProvider {
        async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
            self.seen.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(anyhow::anyhow!(e.to_string())),
            }
        }
    }

    const REPLY: &str =
        r#"{"analysis":"Steady compounding.","proTip":"Step up yearly.","warning":"Returns are not guaranteed."}"#;

    #[tokio::test]
    async fn test_request_insight() {
        let input = InvestmentInput::default();
        let result = project(&input);
        let provider = CannedProvider::ok(REPLY);

        let insight = request_insight(&provider, &input, &result).await.unwrap();
        assert_eq!(insight.pro_tip, "Step up yearly.");
        assert_eq!(insight.warning, "Returns are not guaranteed.");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("Monthly SIP"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_unavailable() {
        let input = InvestmentInput::default();
        let result = project(&input);
        let provider = CannedProvider::failing("connection refused");

        let err = request_insight(&provider, &input, &result).await.unwrap_err();
        assert_eq!(err, InsightUnavailable);
        assert_eq!(err.to_string(), "Unable to connect to AI advisor. Please try again.");
    }

    #[tokio::test]
    async fn test_malformed_reply_is_unavailable() {
        let input = InvestmentInput::default();
        let result = project(&input);

        for reply in ["", "not json", r#"{"analysis":"only one field"}"#] {
            let provider = CannedProvider::ok(reply);
            assert_eq!(
                request_insight(&provider, &input, &result).await,
                Err(InsightUnavailable)
            );
        }
    }

    #[tokio::test]
    async fn test_failure_leaves_projection_untouched() {
        let input = InvestmentInput::default();
        let result = project(&input);
        let before = result.clone();

        let _ = request_insight(&CannedProvider::failing("timeout"), &input, &result).await;
        assert_eq!(result, before);
        assert_eq!(project(&input), before);
    }

    #[test]
    fn test_parse_fenced_insight() {
        let fenced = format!("```json\n{}\n```", REPLY);
        let insight = parse_insight(&fenced).unwrap();
        assert_eq!(insight.analysis, "Steady compounding.");

        let padded = format!("  \n{}\n", REPLY);
        assert!(parse_insight(&padded).is_ok());
    }
}
