//! Guesswho CLI: entry point.
//!
//! # Commands
//!
//! - `guesswho serve [--host HOST] [--port PORT]`: run the HTTP API
//! - `guesswho play`: play a game in the terminal
//! - `guesswho init`: write a default config file
//! - `guesswho status`: show configuration and provider status

mod helpers;
mod init;
mod repl;
mod routes;
mod server;
mod status;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use guesswho_agent::GameEngine;
use guesswho_core::config::{load_config, Config};
use guesswho_providers::http_provider::create_provider;
use guesswho_providers::LlmProvider;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Guesswho: an LLM that guesses who or what you are thinking of
#[derive(Parser)]
#[command(name = "guesswho", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.guesswho/config.json)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Play a game in the terminal
    Play {
        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Write a default config file
    Init,

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref().map(helpers::expand_tilde);

    match cli.command {
        Commands::Serve { host, port, logs } => {
            init_logging(logs);
            let config = load_config(config_path.as_deref());
            server::run(config, host, port).await
        }
        Commands::Play { logs } => {
            init_logging(logs);
            let config = load_config(config_path.as_deref());
            let engine = build_engine(&config)?;
            repl::run(engine, logs).await
        }
        Commands::Init => init::run(config_path.as_deref()),
        Commands::Status => status::run(config_path.as_deref()),
    }
}

/// Build a `GameEngine` from the loaded configuration.
pub fn build_engine(config: &Config) -> Result<GameEngine> {
    let model = &config.agent.model;
    let provider = create_provider(model, &config.providers.to_map())
        .context("failed to create LLM provider")?;

    info!(
        model = %model,
        provider = provider.display_name(),
        search = !config.search.api_key.is_empty(),
        "game engine ready"
    );

    Ok(GameEngine::from_config(config, Arc::new(provider)))
}

/// Initialize tracing/logging.
///
/// `--logs` turns on debug output for our crates; otherwise `RUST_LOG`
/// decides, falling back to `info`.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("guesswho=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_flags_parse() {
        let cli = Cli::parse_from(["guesswho", "serve", "--host", "127.0.0.1", "-p", "9000"]);
        match cli.command {
            Commands::Serve { host, port, logs } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(9000));
                assert!(!logs);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn global_config_flag() {
        let cli = Cli::parse_from(["guesswho", "status", "--config", "/tmp/gw.json"]);
        assert_eq!(cli.config.as_deref(), Some("/tmp/gw.json"));
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn build_engine_requires_provider_key() {
        match build_engine(&Config::default()) {
            Ok(_) => panic!("expected missing provider error"),
            Err(err) => assert!(format!("{err:#}").contains("No configured provider")),
        }
    }
}
