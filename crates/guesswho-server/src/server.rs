//! `guesswho serve`: run the HTTP API.
//!
//! Startup sequence:
//! 1. Build the game engine (provider + tools + session store)
//! 2. Spawn the idle-session sweep
//! 3. Bind and serve until Ctrl+C

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use guesswho_agent::GameEngine;
use guesswho_core::config::{Config, GameConfig};

use crate::routes::{api_routes, AppState};

/// Run the API server.
pub async fn run(config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    let engine = Arc::new(crate::build_engine(&config)?);
    let sweeper = spawn_sweep_task(engine.clone(), &config.game);

    let app = api_routes(AppState { engine }, config.server.cors_allow_all);

    let host = host.unwrap_or(config.server.host);
    let port = port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(addr = %addr, "Guesswho API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(handle) = sweeper {
        handle.abort();
    }
    info!("server stopped");
    Ok(())
}

/// Periodically drop idle sessions. Disabled when `sessionTtlSecs` is 0.
fn spawn_sweep_task(engine: Arc<GameEngine>, game: &GameConfig) -> Option<JoinHandle<()>> {
    if game.session_ttl_secs == 0 {
        return None;
    }
    let ttl = Duration::from_secs(game.session_ttl_secs);
    let every = Duration::from_secs(game.sweep_interval_secs.max(1));

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = engine.sweep_idle(ttl).await;
            if removed > 0 {
                info!(removed = removed, "expired idle sessions");
            }
        }
    }))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down");
    }
}
