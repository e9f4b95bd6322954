//! LLM Provider trait: the seam between the agent and a hosted model.
//!
//! The `HttpProvider` in `http_provider.rs` covers every OpenAI-compatible API;
//! tests plug in scripted providers.

use async_trait::async_trait;
use guesswho_core::error::ProviderError;
use guesswho_core::types::{LlmResponse, Message, ToolDefinition};

/// Configuration passed to each LLM call.
#[derive(Clone, Debug)]
pub struct LlmRequestConfig {
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
}

impl Default for LlmRequestConfig {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

/// Trait that all LLM providers implement.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a chat completion request.
    ///
    /// # Arguments
    /// * `messages`: System prompt followed by the conversation history.
    /// * `tools`   : Optional list of tool definitions the LLM can call.
    /// * `model`   : Model identifier (e.g. `"gemini-2.5-flash"`).
    /// * `config`  : Temperature, max_tokens, etc.
    ///
    /// # Errors
    /// Transport failures, non-success statuses, and unparseable bodies are
    /// all returned as `ProviderError`; the caller aborts the turn.
    async fn chat(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
        model: &str,
        config: &LlmRequestConfig,
    ) -> Result<LlmResponse, ProviderError>;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
