//! Tool Registry: tools keyed by name, dispatched for LLM tool calls.

use std::collections::HashMap;
use std::sync::Arc;

use guesswho_core::types::{ToolCall, ToolDefinition};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::base::Tool;

// ─────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────

/// The tools offered to the agent, keyed by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A later tool with the same name replaces the earlier one.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        info!(tool = tool.name(), "registered tool");
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Definitions for every registered tool, ordered by name.
    pub fn get_definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self.tools.values().map(|t| t.to_definition()).collect();
        defs.sort_by(|a, b| a.function.name.cmp(&b.function.name));
        defs
    }

    /// Run one tool call from the agent and return the text fed back to it.
    ///
    /// Unknown tools and tool errors come back as text so the turn carries
    /// on. Arguments that are not a JSON object are treated as empty.
    pub async fn execute(&self, call: &ToolCall) -> String {
        let name = call.name();
        let Some(tool) = self.tools.get(name) else {
            warn!(tool = name, "tool not found");
            return format!("Error: Tool '{name}' not found");
        };

        let params = parse_arguments(call);
        match tool.execute(params).await {
            Ok(result) => {
                debug!(tool = name, result_len = result.len(), "tool result");
                result
            }
            Err(e) => {
                warn!(tool = name, error = %e, "tool execution failed");
                format!("Error executing {name}: {e}")
            }
        }
    }
}

fn parse_arguments(call: &ToolCall) -> HashMap<String, Value> {
    match serde_json::from_str(&call.function.arguments) {
        Ok(params) => params,
        Err(e) => {
            warn!(tool = call.name(), error = %e, "malformed tool arguments");
            HashMap::new()
        }
    }
}
