//! Shared test doubles.

use async_trait::async_trait;
use std::sync::Mutex;

use cadence_llm::{FinishReason, LLMAdapter, LLMError, LLMMessage, LLMResponse, TokenUsage};

/// Adapter that replays a canned reply and records the prompts it saw.
pub(crate) struct StubAdapter {
    reply: String,
    pub(crate) seen: Mutex<Vec<String>>,
}

impl StubAdapter {
    pub(crate) fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// The user prompt of the most recent call.
    pub(crate) fn last_prompt(&self) -> String {
        self.seen.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl LLMAdapter for StubAdapter {
    fn provider(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-1"
    }

    async fn generate(&self, messages: &[LLMMessage]) -> Result<LLMResponse, LLMError> {
        if let Some(last) = messages.last() {
            self.seen.lock().unwrap().push(last.content.clone());
        }
        Ok(LLMResponse {
            content: self.reply.clone(),
            tokens_used: TokenUsage::default(),
            finish_reason: FinishReason::Stop,
            model: "stub-1".to_string(),
        })
    }
}

/// Adapter whose every call fails.
pub(crate) struct FailingAdapter;

#[async_trait]
impl LLMAdapter for FailingAdapter {
    fn provider(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-down"
    }

    async fn generate(&self, _messages: &[LLMMessage]) -> Result<LLMResponse, LLMError> {
        Err(LLMError::ConnectionError("stub is down".to_string()))
    }
}
