//! Configuration schema.
//!
//! Hierarchy: `Config` → `AgentConfig`, `ProvidersConfig`, `SearchConfig`,
//! `GameConfig`, `ServerConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration: loaded from `~/.guesswho/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub agent: AgentConfig,
    pub providers: ProvidersConfig,
    pub search: SearchConfig,
    pub game: GameConfig,
    pub server: ServerConfig,
}

// ─────────────────────────────────────────────
// Agent
// ─────────────────────────────────────────────

/// Settings for the agent decision step.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentConfig {
    /// LLM model identifier.
    pub model: String,
    /// Maximum tokens to generate per response.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
    /// Agent/tool round-trips allowed per turn before the turn fails.
    pub max_tool_rounds: u32,
    /// Upper bound on a single agent invocation, in seconds.
    pub agent_timeout_secs: u64,
    /// Replacement strategy prompt. `{questions_asked}` is substituted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
            max_tool_rounds: 10,
            agent_timeout_secs: 30,
            system_prompt: None,
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Configuration for a single LLM provider (API key, base URL, headers).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Custom API base URL (overrides provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Extra HTTP headers to send with each request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_headers: Option<HashMap<String, String>>,
}

impl ProviderConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// All provider configurations, one per supported backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    pub gemini: ProviderConfig,
    pub openai: ProviderConfig,
    pub openrouter: ProviderConfig,
    pub deepseek: ProviderConfig,
    pub groq: ProviderConfig,
    pub vllm: ProviderConfig,
}

impl ProvidersConfig {
    /// Named entries, in registry priority order.
    pub fn entries(&self) -> [(&'static str, &ProviderConfig); 6] {
        [
            ("openrouter", &self.openrouter),
            ("gemini", &self.gemini),
            ("openai", &self.openai),
            ("deepseek", &self.deepseek),
            ("groq", &self.groq),
            ("vllm", &self.vllm),
        ]
    }

    /// Get a provider config by name (e.g. `"gemini"`).
    pub fn get_by_name(&self, name: &str) -> Option<&ProviderConfig> {
        self.entries()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| c)
    }

    /// Convert to a map for use with the provider registry.
    pub fn to_map(&self) -> HashMap<String, ProviderConfig> {
        self.entries()
            .into_iter()
            .map(|(name, config)| (name.to_string(), config.clone()))
            .collect()
    }
}

// ─────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────

/// Web search (Tavily) settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub api_key: String,
    pub api_base: String,
    pub max_results: u32,
    /// `"basic"` or `"advanced"`.
    pub search_depth: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: "https://api.tavily.com".to_string(),
            max_results: 3,
            search_depth: "basic".to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Game
// ─────────────────────────────────────────────

/// Game rules and session housekeeping.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    /// Guess ceiling; reaching it ends the game.
    pub max_guesses: u32,
    /// Idle sessions older than this are swept. `0` disables the sweep.
    pub session_ttl_secs: u64,
    pub sweep_interval_secs: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_guesses: 20,
            session_ttl_secs: 3600,
            sweep_interval_secs: 60,
        }
    }
}

// ─────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allow any origin (the browser frontend runs on a different port).
    pub cors_allow_all: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_allow_all: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.agent.model, "gemini-2.5-flash");
        assert_eq!(config.agent.max_tool_rounds, 10);
        assert_eq!(config.agent.agent_timeout_secs, 30);
        assert_eq!(config.search.max_results, 3);
        assert_eq!(config.search.search_depth, "basic");
        assert_eq!(config.game.max_guesses, 20);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_camel_case_keys() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert!(json["agent"].get("maxToolRounds").is_some());
        assert!(json["game"].get("sessionTtlSecs").is_some());
        assert!(json["server"].get("corsAllowAll").is_some());
        assert!(json["agent"].get("systemPrompt").is_none());
    }

    #[test]
    fn test_providers_lookup() {
        let mut providers = ProvidersConfig::default();
        providers.gemini.api_key = "g-key".into();

        assert!(providers.get_by_name("gemini").unwrap().is_configured());
        assert!(!providers.get_by_name("openai").unwrap().is_configured());
        assert!(providers.get_by_name("nope").is_none());

        let map = providers.to_map();
        assert_eq!(map.len(), 6);
        assert_eq!(map["gemini"].api_key, "g-key");
    }
}
