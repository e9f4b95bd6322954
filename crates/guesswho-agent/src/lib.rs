//! Guesswho Agent: tools, turn controller, and game engine.
//!
//! This crate contains:
//! - **tools**: Tool trait, registry, and the two game tools (`web_search`, `make_final_guess`)
//! - **strategy**: the questioning strategy injected as the system prompt
//! - **turn**: the agent ⇄ tools state machine run once per user-visible turn
//! - **game**: session lifecycle (start, answer, reset) on top of the session store

pub mod game;
pub mod strategy;
pub mod tools;
pub mod turn;

#[cfg(test)]
pub(crate) mod testing;

pub use game::{GameEngine, GameResponse};
pub use strategy::Strategy;
pub use tools::{Tool, ToolRegistry};
pub use turn::{AgentOutput, TurnConfig, TurnController, TurnOutcome, TurnState};
