//! Config loader: reads `~/.guesswho/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.guesswho/config.json`
//! 3. Environment variables `GUESSWHO_<SECTION>__<FIELD>` (override JSON)
//! 4. Conventional vendor keys (`GOOGLE_API_KEY`, `TAVILY_API_KEY`) fill
//!    credentials still empty after the steps above

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, ProviderConfig};

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the given path (or the default one) + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

fn load_config_from_path(path: &Path) -> Config {
    apply_env_overrides(read_config_file(path))
}

fn read_config_file(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Supported overrides:
/// - `GUESSWHO_AGENT__MODEL`, `GUESSWHO_AGENT__TEMPERATURE`,
///   `GUESSWHO_AGENT__MAX_TOKENS`, `GUESSWHO_AGENT__MAX_TOOL_ROUNDS`,
///   `GUESSWHO_AGENT__TIMEOUT_SECS`, `GUESSWHO_AGENT__SYSTEM_PROMPT`
/// - `GUESSWHO_PROVIDERS__<NAME>__API_KEY` / `__API_BASE`
/// - `GUESSWHO_SEARCH__API_KEY`, `GUESSWHO_SEARCH__API_BASE`
/// - `GUESSWHO_GAME__MAX_GUESSES`, `GUESSWHO_GAME__SESSION_TTL_SECS`
/// - `GUESSWHO_SERVER__HOST`, `GUESSWHO_SERVER__PORT`
fn apply_env_overrides(mut config: Config) -> Config {
    // Agent
    if let Ok(val) = std::env::var("GUESSWHO_AGENT__MODEL") {
        config.agent.model = val;
    }
    if let Some(t) = env_parse::<f64>("GUESSWHO_AGENT__TEMPERATURE") {
        config.agent.temperature = t;
    }
    if let Some(n) = env_parse::<u32>("GUESSWHO_AGENT__MAX_TOKENS") {
        config.agent.max_tokens = n;
    }
    if let Some(n) = env_parse::<u32>("GUESSWHO_AGENT__MAX_TOOL_ROUNDS") {
        config.agent.max_tool_rounds = n;
    }
    if let Some(n) = env_parse::<u64>("GUESSWHO_AGENT__TIMEOUT_SECS") {
        config.agent.agent_timeout_secs = n;
    }
    if let Ok(val) = std::env::var("GUESSWHO_AGENT__SYSTEM_PROMPT") {
        config.agent.system_prompt = Some(val);
    }

    // Providers
    apply_provider_env(&mut config.providers.gemini, "GEMINI");
    apply_provider_env(&mut config.providers.openai, "OPENAI");
    apply_provider_env(&mut config.providers.openrouter, "OPENROUTER");
    apply_provider_env(&mut config.providers.deepseek, "DEEPSEEK");
    apply_provider_env(&mut config.providers.groq, "GROQ");
    apply_provider_env(&mut config.providers.vllm, "VLLM");
    fill_if_empty(&mut config.providers.gemini.api_key, "GOOGLE_API_KEY");

    // Search
    if let Ok(val) = std::env::var("GUESSWHO_SEARCH__API_KEY") {
        config.search.api_key = val;
    }
    if let Ok(val) = std::env::var("GUESSWHO_SEARCH__API_BASE") {
        config.search.api_base = val;
    }
    fill_if_empty(&mut config.search.api_key, "TAVILY_API_KEY");

    // Game
    if let Some(n) = env_parse::<u32>("GUESSWHO_GAME__MAX_GUESSES") {
        config.game.max_guesses = n;
    }
    if let Some(n) = env_parse::<u64>("GUESSWHO_GAME__SESSION_TTL_SECS") {
        config.game.session_ttl_secs = n;
    }

    // Server
    if let Ok(val) = std::env::var("GUESSWHO_SERVER__HOST") {
        config.server.host = val;
    }
    if let Some(p) = env_parse::<u16>("GUESSWHO_SERVER__PORT") {
        config.server.port = p;
    }

    config
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key = key, value = %raw, "ignoring unparseable env override");
            None
        }
    }
}

fn fill_if_empty(slot: &mut String, key: &str) {
    if slot.is_empty() {
        if let Ok(val) = std::env::var(key) {
            *slot = val;
        }
    }
}

/// Apply env var overrides for a single provider.
fn apply_provider_env(provider: &mut ProviderConfig, name: &str) {
    if let Ok(val) = std::env::var(format!("GUESSWHO_PROVIDERS__{name}__API_KEY")) {
        provider.api_key = val;
    }
    if let Ok(val) = std::env::var(format!("GUESSWHO_PROVIDERS__{name}__API_BASE")) {
        provider.api_base = Some(val);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_missing_file() {
        let config = read_config_file(Path::new("/nonexistent/path/config.json"));
        assert_eq!(config.agent.max_tool_rounds, 10);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_read_valid_json() {
        let file = write_temp_json(
            r#"{
            "agent": { "model": "gpt-4o-mini", "maxToolRounds": 4 },
            "game": { "maxGuesses": 5 }
        }"#,
        );

        let config = read_config_file(file.path());
        assert_eq!(config.agent.model, "gpt-4o-mini");
        assert_eq!(config.agent.max_tool_rounds, 4);
        assert_eq!(config.game.max_guesses, 5);
        // Defaults preserved
        assert_eq!(config.agent.temperature, 0.7);
        assert_eq!(config.game.session_ttl_secs, 3600);
    }

    #[test]
    fn test_read_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = read_config_file(file.path());
        assert_eq!(config.agent.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.agent.model = "deepseek-chat".to_string();
        config.providers.deepseek.api_key = "ds-test".to_string();
        config.search.api_key = "tvly-test".to_string();

        save_config(&config, Some(&path)).unwrap();

        let reloaded = read_config_file(&path);
        assert_eq!(reloaded.agent.model, "deepseek-chat");
        assert_eq!(reloaded.providers.deepseek.api_key, "ds-test");
        assert_eq!(reloaded.search.api_key, "tvly-test");
    }

    #[test]
    fn test_provider_section_parsing() {
        let file = write_temp_json(
            r#"{
            "providers": {
                "gemini": { "apiKey": "g-123" },
                "openrouter": { "apiKey": "sk-or-456", "apiBase": "https://custom.io/v1" }
            }
        }"#,
        );

        let config = read_config_file(file.path());
        assert!(config.providers.gemini.is_configured());
        assert_eq!(
            config.providers.openrouter.api_base.as_deref(),
            Some("https://custom.io/v1")
        );
        assert!(!config.providers.openai.is_configured());
    }

    // Env-based tests use distinct variables so they don't race each other.

    #[test]
    fn test_env_override_model() {
        std::env::set_var("GUESSWHO_AGENT__MODEL", "test-model");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.agent.model, "test-model");
        std::env::remove_var("GUESSWHO_AGENT__MODEL");
    }

    #[test]
    fn test_env_override_port() {
        std::env::set_var("GUESSWHO_SERVER__PORT", "9999");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.server.port, 9999);
        std::env::remove_var("GUESSWHO_SERVER__PORT");
    }

    #[test]
    fn test_env_override_bad_number_ignored() {
        std::env::set_var("GUESSWHO_GAME__MAX_GUESSES", "lots");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.game.max_guesses, 20);
        std::env::remove_var("GUESSWHO_GAME__MAX_GUESSES");
    }

    #[test]
    fn test_google_key_fills_empty_gemini_key() {
        std::env::set_var("GOOGLE_API_KEY", "google-env");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.providers.gemini.api_key, "google-env");

        let mut preset = Config::default();
        preset.providers.gemini.api_key = "from-file".into();
        let config = apply_env_overrides(preset);
        assert_eq!(config.providers.gemini.api_key, "from-file");
        std::env::remove_var("GOOGLE_API_KEY");
    }
}
