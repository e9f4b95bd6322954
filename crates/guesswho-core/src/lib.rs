//! Guesswho core: shared types, errors, configuration, and session storage.

pub mod config;
pub mod error;
pub mod session;
pub mod types;
pub mod utils;

pub use error::{GameError, ProviderError, SearchError};
pub use types::{GameSession, LlmResponse, Message, ToolCall, ToolDefinition};
