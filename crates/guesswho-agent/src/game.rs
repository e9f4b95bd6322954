//! Game engine: session lifecycle on top of the turn controller.
//!
//! `start` opens a session and returns the first question, `answer` feeds
//! one user reply through a turn and decides whether the game is over, and
//! `reset` drops a session. A finished game's session is removed right away,
//! so its id answers `SessionNotFound` from then on.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use guesswho_core::config::schema::{Config, GameConfig};
use guesswho_core::error::{GameError, Result};
use guesswho_core::session::SessionStore;
use guesswho_core::types::{GameSession, Message};
use guesswho_core::utils::matches_keyword;
use guesswho_providers::traits::LlmProvider;

use crate::strategy::Strategy;
use crate::tools::guess::MakeFinalGuessTool;
use crate::tools::registry::ToolRegistry;
use crate::tools::web::WebSearchTool;
use crate::turn::{TurnConfig, TurnController};

/// First user entry of every session.
pub const SEED_MESSAGE: &str =
    "I'm thinking of someone/something. Start asking me yes/no questions!";

/// Reply sent when the user quits.
pub const QUIT_MESSAGE: &str = "Thanks for playing! Game ended.";

/// Answers that end the game immediately.
pub const QUIT_WORDS: &[&str] = &["quit", "exit", "q"];

/// Answers that confirm a guess.
pub const CONFIRM_WORDS: &[&str] = &["yes", "y", "correct", "right"];

/// Payload returned by `start` and `answer`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameResponse {
    pub session_id: String,
    /// The agent's question, guess announcement, or closing message.
    pub question: String,
    pub is_guess: bool,
    pub game_over: bool,
}

// ─────────────────────────────────────────────
// GameEngine
// ─────────────────────────────────────────────

/// Owns the session store and runs turns for every game.
pub struct GameEngine {
    controller: TurnController,
    store: Arc<SessionStore>,
    max_guesses: u32,
}

impl GameEngine {
    pub fn new(controller: TurnController, store: Arc<SessionStore>, game: &GameConfig) -> Self {
        Self {
            controller,
            store,
            max_guesses: game.max_guesses,
        }
    }

    /// Wire up the standard tools (Tavily-backed `web_search`, `make_final_guess`).
    pub fn from_config(config: &Config, provider: Arc<dyn LlmProvider>) -> Self {
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(WebSearchTool::from_config(&config.search)));
        tools.register(Arc::new(MakeFinalGuessTool));

        let controller = TurnController::new(
            provider,
            tools,
            Strategy::from_config(config.agent.system_prompt.as_deref()),
            TurnConfig::from_agent_config(&config.agent),
        );
        Self::new(controller, Arc::new(SessionStore::new()), &config.game)
    }

    /// Open a new game and return the agent's opening question.
    ///
    /// If the opening turn fails nothing is stored.
    pub async fn start(&self) -> Result<GameResponse> {
        let session_id = uuid::Uuid::new_v4().to_string();
        let mut session = GameSession::new(&session_id, SEED_MESSAGE);

        let outcome = self.controller.run(&mut session.history, 0).await?;
        let is_guess = outcome.is_guess();
        session.touch();
        self.store.insert(session).await;

        info!(session_id = %session_id, is_guess = is_guess, "game started");

        Ok(GameResponse {
            session_id,
            question: outcome.text,
            is_guess,
            game_over: false,
        })
    }

    /// Feed one user answer through a turn.
    ///
    /// Holds the session's lock for the whole turn, so answers for one game
    /// are processed one at a time. A failed turn leaves the session exactly
    /// as it was.
    pub async fn answer(&self, session_id: &str, answer: &str) -> Result<GameResponse> {
        let handle = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| GameError::SessionNotFound(session_id.to_string()))?;
        let mut session = handle.lock().await;

        // A request queued behind the one that ended the game, or a reset.
        if session.game_over || !self.store.contains(session_id).await {
            return Err(GameError::SessionNotFound(session_id.to_string()));
        }

        let answer = answer.trim();

        if matches_keyword(answer, QUIT_WORDS) {
            session.game_over = true;
            self.store.remove(session_id).await;
            info!(session_id = %session_id, "player quit");
            return Ok(GameResponse {
                session_id: session_id.to_string(),
                question: QUIT_MESSAGE.to_string(),
                is_guess: false,
                game_over: true,
            });
        }

        let questions_asked = session.questions_asked + 1;
        let mut history = session.history.clone();
        history.push(Message::user(answer));

        let outcome = match self.controller.run(&mut history, questions_asked).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "turn failed, session unchanged");
                return Err(e);
            }
        };

        let is_guess = outcome.is_guess();
        session.history = history;
        session.questions_asked = questions_asked;
        if is_guess {
            session.guesses_made += 1;
        }
        session.touch();

        debug!(
            session_id = %session_id,
            questions_asked = session.questions_asked,
            guesses_made = session.guesses_made,
            is_guess = is_guess,
            "turn applied"
        );

        let mut question = outcome.text;
        // The confirmation check reads the answer that triggered this turn.
        let game_over = if is_guess && matches_keyword(answer, CONFIRM_WORDS) {
            info!(session_id = %session_id, "guess confirmed");
            true
        } else if session.guesses_made >= self.max_guesses {
            info!(session_id = %session_id, guesses_made = session.guesses_made, "guess ceiling reached");
            question = give_up_message(self.max_guesses);
            true
        } else {
            false
        };

        if game_over {
            session.game_over = true;
            self.store.remove(session_id).await;
        }

        Ok(GameResponse {
            session_id: session_id.to_string(),
            question,
            is_guess,
            game_over,
        })
    }

    /// Drop a session if it exists. Never fails.
    pub async fn reset(&self, session_id: &str) {
        if self.store.remove(session_id).await {
            info!(session_id = %session_id, "session reset");
        }
    }

    pub async fn active_sessions(&self) -> usize {
        self.store.len().await
    }

    /// Remove sessions idle for longer than `max_idle`.
    pub async fn sweep_idle(&self, max_idle: Duration) -> usize {
        self.store.sweep_idle(max_idle).await
    }
}

fn give_up_message(max_guesses: u32) -> String {
    format!("I give up! You win! I couldn't guess your character in {max_guesses} tries. 🎉")
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
