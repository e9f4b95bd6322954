//! `guesswho status`: show configuration and provider status.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use guesswho_core::config::{get_config_path, load_config};
use guesswho_providers::registry::{match_provider, PROVIDERS};

/// Run the status command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    println!();
    println!("{}", "🤔 Guesswho Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        path.display(),
        if path.exists() {
            "✓".green().to_string()
        } else {
            "(not found, using defaults)".red().to_string()
        }
    );

    let agent = &config.agent;
    println!("  {:<18} {}", "Model:".bold(), agent.model);
    println!(
        "  {:<18} {}",
        "Parameters:".bold(),
        format!(
            "temp: {} | max_tokens: {} | tool rounds: {} | timeout: {}s",
            agent.temperature, agent.max_tokens, agent.max_tool_rounds, agent.agent_timeout_secs
        )
        .dimmed()
    );
    println!(
        "  {:<18} {}",
        "Strategy:".bold(),
        if agent.system_prompt.is_some() {
            "custom"
        } else {
            "built-in"
        }
    );

    // Providers
    println!();
    println!("  {}", "Providers:".bold());
    let providers_map = config.providers.to_map();
    let active = match_provider(&agent.model, &providers_map).map(|(_, spec)| spec.name);

    for spec in PROVIDERS {
        let configured = config
            .providers
            .get_by_name(spec.name)
            .is_some_and(|c| c.is_configured());
        let mut status = if configured {
            format!("{} (key set)", "✓".green())
        } else {
            format!("{} {}", "· not configured".dimmed(), spec.env_key.dimmed())
        };
        if active == Some(spec.name) {
            status.push_str(&format!(" {}", "← active".cyan()));
        }
        println!("    {:<20} {}", spec.display_name, status);
    }

    // Search
    println!();
    let search_status = if config.search.api_key.is_empty() {
        format!("{}", "· not configured (TAVILY_API_KEY)".dimmed())
    } else {
        format!("{} (key set)", "✓".green())
    };
    println!("  {:<18} {}", "Tavily Search:".bold(), search_status);

    // Game + server
    println!();
    println!(
        "  {:<18} max guesses {} | idle ttl {}s",
        "Game:".bold(),
        config.game.max_guesses,
        config.game.session_ttl_secs
    );
    println!(
        "  {:<18} {}:{}{}",
        "Server:".bold(),
        config.server.host,
        config.server.port,
        if config.server.cors_allow_all {
            " (CORS: any origin)"
        } else {
            ""
        }
    );
    println!();

    Ok(())
}
