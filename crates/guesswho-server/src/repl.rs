//! `guesswho play`: a game in the terminal.
//!
//! Drives the same `GameEngine` as the HTTP API, with `rustyline` for line
//! editing and persistent history.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use guesswho_agent::GameEngine;

use crate::helpers;

/// Run one game, then ask whether to play again.
pub async fn run(engine: GameEngine, show_logs: bool) -> Result<()> {
    helpers::print_banner();
    let mut editor = create_editor()?;

    'games: loop {
        thinking(show_logs);
        let started = engine.start().await;
        done_thinking(show_logs);
        let mut current = match started {
            Ok(resp) => resp,
            Err(e) => {
                eprintln!("\n❌ Error starting game: {e}\n");
                break;
            }
        };
        helpers::print_agent(&current.question, current.is_guess);

        while !current.game_over {
            let input = match editor.readline("You: ") {
                Ok(line) => line,
                // Ctrl-C / Ctrl-D: leave the game cleanly
                Err(rustyline::error::ReadlineError::Interrupted)
                | Err(rustyline::error::ReadlineError::Eof) => {
                    engine.reset(&current.session_id).await;
                    break 'games;
                }
                Err(e) => {
                    eprintln!("Input error: {e}");
                    engine.reset(&current.session_id).await;
                    break 'games;
                }
            };

            let trimmed = input.trim();
            if trimmed.is_empty() {
                continue;
            }
            let _ = editor.add_history_entry(trimmed);

            debug!(session_id = %current.session_id, answer = trimmed, "submitting answer");
            thinking(show_logs);
            let result = engine.answer(&current.session_id, trimmed).await;
            done_thinking(show_logs);

            match result {
                Ok(resp) => {
                    helpers::print_agent(&resp.question, resp.is_guess);
                    current = resp;
                }
                // The session is unchanged; the same answer can be retried.
                Err(e) => eprintln!("\n❌ Error: {e}\n"),
            }
        }

        match editor.readline("Play again? (y/n): ") {
            Ok(line) if is_yes(&line) => continue,
            _ => break,
        }
    }

    println!("\nGoodbye! 👋");
    save_history(&mut editor);
    Ok(())
}

fn thinking(show_logs: bool) {
    if !show_logs {
        helpers::print_thinking();
    }
}

fn done_thinking(show_logs: bool) {
    if !show_logs {
        helpers::clear_thinking();
    }
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(500)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded REPL history from {}", history_path.display());
    }

    Ok(editor)
}

/// Save history to disk.
fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

fn history_path() -> std::path::PathBuf {
    guesswho_core::utils::get_data_path()
        .join("history")
        .join("play_history")
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_again_answers() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }

    #[test]
    fn history_path_under_data_dir() {
        let path = history_path();
        assert!(path.to_string_lossy().contains(".guesswho"));
        assert!(path.ends_with("history/play_history"));
    }
}
