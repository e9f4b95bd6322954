//! `guesswho init`: write a default config file.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use guesswho_core::config::{get_config_path, save_config, Config};

/// Run the init command. An existing file is left alone.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    println!();
    if write_default(&path)? {
        println!("  {} created config at {}", "✓".green(), path.display());
        println!(
            "{}",
            "  Set providers.gemini.apiKey (or GOOGLE_API_KEY) and search.apiKey (or TAVILY_API_KEY)."
                .dimmed()
        );
    } else {
        println!("  {} config already exists at {}", "✓".green(), path.display());
    }
    println!();
    Ok(())
}

/// Write defaults to `path` unless it exists. Returns whether a file was written.
fn write_default(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}
