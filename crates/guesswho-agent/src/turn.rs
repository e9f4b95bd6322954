//! Turn controller: the agent ⇄ tools state machine.
//!
//! One turn starts in `Agent`: the model sees the strategy prompt plus the
//! whole history and either answers in text (`Done`) or asks for tool calls
//! (`Tools`). Tool results are appended to the history and control goes
//! back to `Agent`. The turn ends at the first text answer.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use guesswho_core::config::schema::AgentConfig;
use guesswho_core::error::{GameError, ProviderError};
use guesswho_core::types::{LlmResponse, Message, ToolCall, ToolDefinition};
use guesswho_providers::traits::{LlmProvider, LlmRequestConfig};

use crate::strategy::Strategy;
use crate::tools::guess::{contains_sentinel, FINAL_GUESS_TOOL};
use crate::tools::registry::ToolRegistry;

// ─────────────────────────────────────────────
// Turn types
// ─────────────────────────────────────────────

/// States of one turn.
#[derive(Debug)]
pub enum TurnState {
    Agent,
    Tools(Vec<ToolCall>),
    Done(String),
}

/// One agent decision.
#[derive(Clone, Debug, PartialEq)]
pub enum AgentOutput {
    /// A question or guess announcement for the user.
    Text(String),
    /// Tool calls to run before the agent speaks again.
    ToolCalls {
        content: Option<String>,
        calls: Vec<ToolCall>,
    },
}

impl From<LlmResponse> for AgentOutput {
    fn from(resp: LlmResponse) -> Self {
        if resp.has_tool_calls() {
            AgentOutput::ToolCalls {
                content: resp.content,
                calls: resp.tool_calls,
            }
        } else {
            AgentOutput::Text(resp.content.unwrap_or_default())
        }
    }
}

/// What a completed turn produced.
#[derive(Clone, Debug)]
pub struct TurnOutcome {
    /// The agent's final text for the user.
    pub text: String,
    /// Every tool call requested during the turn, in order.
    pub tool_calls_made: Vec<ToolCall>,
    /// Agent/tool round-trips taken.
    pub rounds: usize,
}

impl TurnOutcome {
    /// A turn is a guess if the agent called `make_final_guess` at any point,
    /// or its final text carries the `FINAL_GUESS:` sentinel.
    pub fn is_guess(&self) -> bool {
        self.tool_calls_made
            .iter()
            .any(|c| c.name() == FINAL_GUESS_TOOL)
            || contains_sentinel(&self.text)
    }
}

/// Limits and model settings for a turn.
#[derive(Clone, Debug)]
pub struct TurnConfig {
    pub model: String,
    pub max_tool_rounds: usize,
    pub agent_timeout: Duration,
    pub request: LlmRequestConfig,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self::from_agent_config(&AgentConfig::default())
    }
}

impl TurnConfig {
    pub fn from_agent_config(agent: &AgentConfig) -> Self {
        Self {
            model: agent.model.clone(),
            max_tool_rounds: agent.max_tool_rounds as usize,
            agent_timeout: Duration::from_secs(agent.agent_timeout_secs),
            request: LlmRequestConfig {
                max_tokens: agent.max_tokens,
                temperature: agent.temperature,
            },
        }
    }
}

// ─────────────────────────────────────────────
// TurnController
// ─────────────────────────────────────────────

/// Runs turns against one provider and one tool registry.
pub struct TurnController {
    provider: Arc<dyn LlmProvider>,
    tools: ToolRegistry,
    strategy: Strategy,
    config: TurnConfig,
}

impl TurnController {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: ToolRegistry,
        strategy: Strategy,
        config: TurnConfig,
    ) -> Self {
        info!(
            provider = provider.display_name(),
            model = %config.model,
            tools = tools.get_definitions().len(),
            max_tool_rounds = config.max_tool_rounds,
            "turn controller initialized"
        );
        Self {
            provider,
            tools,
            strategy,
            config,
        }
    }

    /// Run one turn, appending every agent and tool entry to `history`.
    ///
    /// On error `history` may hold a partial turn; callers pass a working
    /// copy and keep it only on success.
    pub async fn run(
        &self,
        history: &mut Vec<Message>,
        questions_asked: u32,
    ) -> Result<TurnOutcome, GameError> {
        let tool_defs = self.tools.get_definitions();
        let mut state = TurnState::Agent;
        let mut rounds = 0usize;
        let mut tool_calls_made = Vec::new();

        loop {
            state = match state {
                TurnState::Agent => {
                    match self.invoke_agent(history, questions_asked, &tool_defs).await? {
                        AgentOutput::ToolCalls { content, calls } => {
                            if rounds >= self.config.max_tool_rounds {
                                warn!(rounds = rounds, "turn hit the tool round limit");
                                return Err(GameError::TurnLimitExceeded { rounds });
                            }
                            history.push(Message::assistant_tool_calls(content, calls.clone()));
                            TurnState::Tools(calls)
                        }
                        AgentOutput::Text(text) => {
                            history.push(Message::assistant(text.clone()));
                            TurnState::Done(text)
                        }
                    }
                }
                TurnState::Tools(calls) => {
                    rounds += 1;
                    self.dispatch(history, &calls, rounds).await;
                    tool_calls_made.extend(calls);
                    TurnState::Agent
                }
                TurnState::Done(text) => {
                    debug!(rounds = rounds, tool_calls = tool_calls_made.len(), "turn complete");
                    return Ok(TurnOutcome {
                        text,
                        tool_calls_made,
                        rounds,
                    });
                }
            };
        }
    }

    /// One bounded call to the model.
    async fn invoke_agent(
        &self,
        history: &[Message],
        questions_asked: u32,
        tool_defs: &[ToolDefinition],
    ) -> Result<AgentOutput, GameError> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(Message::system(self.strategy.render(questions_asked)));
        messages.extend_from_slice(history);

        debug!(
            questions_asked = questions_asked,
            messages = messages.len(),
            "invoking agent"
        );

        let call = self.provider.chat(
            &messages,
            Some(tool_defs),
            &self.config.model,
            &self.config.request,
        );
        let response = tokio::time::timeout(self.config.agent_timeout, call)
            .await
            .map_err(|_| ProviderError::Timeout(self.config.agent_timeout))??;

        Ok(response.into())
    }

    /// Execute tool calls sequentially, appending each result.
    async fn dispatch(&self, history: &mut Vec<Message>, calls: &[ToolCall], round: usize) {
        for tc in calls {
            info!(tool = tc.name(), round = round, "executing tool call");
            let result = self.tools.execute(tc).await;
            history.push(Message::tool_result(&tc.id, result));
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
