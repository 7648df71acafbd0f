//! Structured generation: prompt + schema in, typed record out.
//!
//! Every agent call in the pipeline goes through [`generate_object`]: the
//! JSON Schema for the output type is embedded in the system prompt, the
//! reply is stripped down to its JSON payload, and the payload is
//! deserialized into the target type. Anything that does not parse is a
//! [`LLMError::SchemaMismatch`] and aborts the stage.

use regex::Regex;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::{
    error::LLMError,
    traits::{LLMAdapter, LLMMessage},
};

/// Generate a typed object from a prompt.
///
/// `system` describes the agent persona; `prompt` carries the stage input.
/// The output schema is derived from `T`.
///
/// # Errors
///
/// Returns the adapter's error on API failure, [`LLMError::EmptyResponse`]
/// for a blank reply, and [`LLMError::SchemaMismatch`] when the reply does
/// not deserialize into `T`.
#[instrument(skip(adapter, system, prompt), fields(provider = adapter.provider(), model = adapter.model()))]
pub async fn generate_object<T>(
    adapter: &dyn LLMAdapter,
    system: &str,
    prompt: &str,
) -> Result<T, LLMError>
where
    T: DeserializeOwned + JsonSchema,
{
    let schema = schemars::schema_for!(T);
    let schema_json = serde_json::to_string_pretty(&schema)
        .map_err(|e| LLMError::ConfigError(format!("failed to render output schema: {e}")))?;

    let system = format!(
        "{system}\n\n\
         Respond with a single JSON document and nothing else: no prose, no\n\
         explanations. The document must conform to this JSON Schema:\n\n\
         {schema_json}"
    );

    let messages = vec![LLMMessage::system(system), LLMMessage::user(prompt)];

    let response = adapter.generate(&messages).await?;

    if response.content.trim().is_empty() {
        return Err(LLMError::EmptyResponse);
    }

    let payload = extract_json(&response.content);
    debug!(bytes = payload.len(), "Extracted JSON payload");

    serde_json::from_str(payload).map_err(|e| {
        LLMError::SchemaMismatch(format!(
            "reply from {}/{} did not match the requested schema: {e}",
            adapter.provider(),
            adapter.model()
        ))
    })
}

/// Pull the JSON payload out of a model reply.
///
/// Prefers a fenced ```json block; otherwise trims to the outermost
/// object or array delimiters. Returns the input unchanged when no JSON
/// shape is found, leaving the parse error to the caller.
#[must_use]
pub fn extract_json(content: &str) -> &str {
    // Fenced block first.
    if let Ok(re) = Regex::new(r"```(?:json)?\s*\n([\s\S]*?)```") {
        if let Some(captures) = re.captures(content) {
            if let Some(payload) = captures.get(1) {
                return payload.as_str().trim();
            }
        }
    }

    // Bare payload: outermost braces or brackets.
    let open = content.find(['{', '[']);
    let close = content.rfind(['}', ']']);
    if let (Some(start), Some(end)) = (open, close) {
        if start < end {
            return content[start..=end].trim();
        }
    }

    content.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde::Deserialize;

    use crate::traits::{FinishReason, LLMResponse, TokenUsage};

    struct CannedAdapter {
        reply: String,
    }

    #[async_trait]
    impl LLMAdapter for CannedAdapter {
        fn provider(&self) -> &str {
            "canned"
        }

        fn model(&self) -> &str {
            "canned-1"
        }

        async fn generate(&self, _messages: &[LLMMessage]) -> Result<LLMResponse, LLMError> {
            Ok(LLMResponse {
                content: self.reply.clone(),
                tokens_used: TokenUsage::default(),
                finish_reason: FinishReason::Stop,
                model: "canned-1".to_string(),
            })
        }
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    struct Idea {
        title: String,
        relevance_score: f64,
    }

    #[test]
    fn test_extract_json_fenced() {
        let content = "Sure, here you go:\n```json\n{\"title\": \"Hooks\"}\n```\nDone.";
        assert_eq!(extract_json(content), "{\"title\": \"Hooks\"}");
    }

    #[test]
    fn test_extract_json_unfenced_with_prose() {
        let content = "The plan is: [{\"title\": \"a\"}] as requested.";
        assert_eq!(extract_json(content), "[{\"title\": \"a\"}]");
    }

    #[test]
    fn test_extract_json_plain() {
        let content = "{\"title\": \"a\"}";
        assert_eq!(extract_json(content), content);
    }

    #[test]
    fn test_extract_json_no_payload() {
        assert_eq!(extract_json("no json here"), "no json here");
    }

    #[tokio::test]
    async fn test_generate_object_parses_reply() {
        let adapter = CannedAdapter {
            reply: "```json\n{\"title\": \"Why Rust\", \"relevance_score\": 0.9}\n```".into(),
        };

        let idea: Idea = generate_object(&adapter, "You are a researcher.", "One idea.")
            .await
            .unwrap();

        assert_eq!(idea.title, "Why Rust");
        assert!((idea.relevance_score - 0.9).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_generate_object_schema_mismatch() {
        let adapter = CannedAdapter {
            reply: "{\"unexpected\": true}".into(),
        };

        let result: Result<Idea, _> =
            generate_object(&adapter, "You are a researcher.", "One idea.").await;

        assert!(matches!(result, Err(LLMError::SchemaMismatch(_))));
    }

    #[tokio::test]
    async fn test_generate_object_empty_reply() {
        let adapter = CannedAdapter { reply: "   ".into() };

        let result: Result<Idea, _> =
            generate_object(&adapter, "You are a researcher.", "One idea.").await;

        assert!(matches!(result, Err(LLMError::EmptyResponse)));
    }
}
