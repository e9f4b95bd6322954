//! Scripted collaborators shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use guesswho_core::error::ProviderError;
use guesswho_core::types::{LlmResponse, Message, ToolCall, ToolDefinition};
use guesswho_providers::traits::{LlmProvider, LlmRequestConfig};

/// A mock LLM provider that replays canned responses in order.
///
/// Once the script runs out it keeps returning `fallback`.
pub(crate) struct ScriptedProvider {
    script: Mutex<VecDeque<Result<LlmResponse, ProviderError>>>,
    fallback: LlmResponse,
    delay: Option<Duration>,
    /// Every message list the provider was called with.
    pub calls: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<LlmResponse, ProviderError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: reply("Is it a real person?"),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call answers with the same response.
    pub fn always(response: LlmResponse) -> Self {
        Self {
            fallback: response,
            ..Self::new(Vec::new())
        }
    }

    /// Plain questions, one per call.
    pub fn questions(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(reply(*t))).collect())
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The system prompt of the n-th call.
    pub fn system_prompt(&self, n: usize) -> String {
        self.calls.lock().unwrap()[n][0]
            .text()
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn chat(
        &self,
        messages: &[Message],
        _tools: Option<&[ToolDefinition]>,
        _model: &str,
        _config: &LlmRequestConfig,
    ) -> Result<LlmResponse, ProviderError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }

    fn display_name(&self) -> &str {
        "ScriptedProvider"
    }
}

/// A response requesting one `make_final_guess` call.
pub(crate) fn guess_call(id: &str, name: &str) -> LlmResponse {
    tool_reply(vec![ToolCall::new(
        id,
        "make_final_guess",
        serde_json::json!({"character_name": name, "confidence": "high"}).to_string(),
    )])
}

/// A response requesting one `web_search` call.
pub(crate) fn search_call(id: &str, query: &str) -> LlmResponse {
    tool_reply(vec![ToolCall::new(
        id,
        "web_search",
        serde_json::json!({ "query": query }).to_string(),
    )])
}

/// A plain text agent reply.
pub(crate) fn reply(text: &str) -> LlmResponse {
    LlmResponse {
        content: Some(text.to_string()),
        ..Default::default()
    }
}

/// An agent reply that only requests tool calls.
pub(crate) fn tool_reply(calls: Vec<ToolCall>) -> LlmResponse {
    LlmResponse {
        tool_calls: calls,
        ..Default::default()
    }
}
