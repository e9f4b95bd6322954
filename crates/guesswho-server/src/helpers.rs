//! Shared CLI helpers: path expansion and terminal output.

use std::path::PathBuf;

use colored::Colorize;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Print the agent's line.
pub fn print_agent(text: &str, is_guess: bool) {
    println!();
    let label = if is_guess {
        "🎯 Guesswho".yellow().bold()
    } else {
        "🤔 Guesswho".cyan().bold()
    };
    if text.trim().is_empty() {
        println!("{label}  {}", "(no response)".dimmed());
    } else {
        println!("{label}  {text}");
    }
    println!();
}

/// Print the banner shown at game start.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "🤔 Guesswho".cyan().bold(), version.dimmed());
    println!(
        "{}",
        "Think of someone or something. Answer yes / no / don't know, or \"quit\" to stop."
            .dimmed()
    );
    println!();
}

/// Print a "thinking" placeholder (for non-log mode).
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
