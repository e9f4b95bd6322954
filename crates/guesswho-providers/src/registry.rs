//! Provider registry: static specs for the supported LLM backends.
//!
//! Every backend here speaks the OpenAI `/chat/completions` dialect with
//! function calling, including Gemini through Google's compatibility
//! endpoint. A `ProviderSpec` says where to send requests and which model
//! names belong to it.

use std::collections::HashMap;

pub use guesswho_core::config::schema::ProviderConfig;

// ─────────────────────────────────────────────
// ProviderSpec: static metadata for one provider
// ─────────────────────────────────────────────

/// Static specification describing one LLM provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// Internal name, also the config key (e.g. `"gemini"`).
    pub name: &'static str,
    /// Keywords to match in model names (lowercase).
    pub keywords: &'static [&'static str],
    /// Conventional environment variable for the API key (shown by `status`).
    pub env_key: &'static str,
    /// Human-readable name for logs.
    pub display_name: &'static str,
    /// Whether this is a gateway/aggregator routing to many vendors.
    /// Gateways are used as fallback when no direct match is configured.
    pub is_gateway: bool,
    /// Whether this is a self-hosted provider.
    pub is_local: bool,
    /// API base URL used when the config does not set one.
    pub default_api_base: &'static str,
}

/// Supported providers, in matching priority order.
pub static PROVIDERS: &[ProviderSpec] = &[
    // Gateway first so an explicit "openrouter/..." model routes there.
    ProviderSpec {
        name: "openrouter",
        keywords: &["openrouter"],
        env_key: "OPENROUTER_API_KEY",
        display_name: "OpenRouter",
        is_gateway: true,
        is_local: false,
        default_api_base: "https://openrouter.ai/api/v1",
    },
    ProviderSpec {
        name: "gemini",
        keywords: &["gemini", "google"],
        env_key: "GOOGLE_API_KEY",
        display_name: "Gemini",
        is_gateway: false,
        is_local: false,
        default_api_base: "https://generativelanguage.googleapis.com/v1beta/openai",
    },
    ProviderSpec {
        name: "openai",
        keywords: &["openai", "gpt"],
        env_key: "OPENAI_API_KEY",
        display_name: "OpenAI",
        is_gateway: false,
        is_local: false,
        default_api_base: "https://api.openai.com/v1",
    },
    ProviderSpec {
        name: "deepseek",
        keywords: &["deepseek"],
        env_key: "DEEPSEEK_API_KEY",
        display_name: "DeepSeek",
        is_gateway: false,
        is_local: false,
        default_api_base: "https://api.deepseek.com/v1",
    },
    ProviderSpec {
        name: "groq",
        keywords: &["groq"],
        env_key: "GROQ_API_KEY",
        display_name: "Groq",
        is_gateway: false,
        is_local: false,
        default_api_base: "https://api.groq.com/openai/v1",
    },
    ProviderSpec {
        name: "vllm",
        keywords: &["vllm"],
        env_key: "VLLM_API_KEY",
        display_name: "vLLM",
        is_gateway: false,
        is_local: true,
        default_api_base: "http://localhost:8000/v1",
    },
];

// ─────────────────────────────────────────────
// Matching functions
// ─────────────────────────────────────────────

/// Find a provider spec by matching keywords against a model name.
///
/// Skips gateways and local providers: those are fallback only.
pub fn find_by_model(model: &str) -> Option<&'static ProviderSpec> {
    let model_lower = model.to_lowercase();
    PROVIDERS.iter().find(|spec| {
        !spec.is_gateway
            && !spec.is_local
            && spec.keywords.iter().any(|kw| model_lower.contains(kw))
    })
}

/// Find a provider spec by exact name.
#[cfg(test)]
pub(crate) fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|spec| spec.name == name)
}

/// Resolve the model name sent on the wire.
///
/// Only a leading `"<provider>/"` prefix naming this provider is stripped
/// (`"gemini/gemini-2.5-flash"` → `"gemini-2.5-flash"`,
/// `"openrouter/google/gemini-2.5-flash"` → `"google/gemini-2.5-flash"`).
/// Any other vendor namespace is passed through as is.
pub fn resolve_model_name(model: &str, spec: &ProviderSpec) -> String {
    model
        .strip_prefix(spec.name)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(model)
        .to_string()
}

/// Match a model name to a configured provider.
///
/// 1. Find by keyword match, only if that provider has an API key.
/// 2. Fall back to the first configured gateway, then a configured local server.
pub fn match_provider<'a>(
    model: &str,
    providers: &'a HashMap<String, ProviderConfig>,
) -> Option<(&'a ProviderConfig, &'static ProviderSpec)> {
    if let Some(spec) = find_by_model(model) {
        if let Some(config) = providers.get(spec.name) {
            if config.is_configured() {
                return Some((config, spec));
            }
        }
    }

    PROVIDERS
        .iter()
        .filter(|s| s.is_gateway)
        .chain(PROVIDERS.iter().filter(|s| s.is_local))
        .find_map(|spec| {
            providers
                .get(spec.name)
                .filter(|c| c.is_configured())
                .map(|c| (c, spec))
        })
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
