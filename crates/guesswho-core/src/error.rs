//! Error taxonomy for the game backend.
//!
//! Only model failures, the turn cap, and unknown session ids escalate to
//! the caller. Search failures never appear here: the search tool turns them
//! into text the agent can read.

use std::time::Duration;

/// Errors surfaced by the game engine to its callers.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Model invocation failed: {0}")]
    ModelInvocation(#[from] ProviderError),

    #[error("Turn exceeded {rounds} agent/tool rounds without a response")]
    TurnLimitExceeded { rounds: usize },
}

/// Failures talking to the language model.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request to {provider} failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("{provider} returned {status}: {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Failures from the web search provider.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("no search API key configured (set TAVILY_API_KEY)")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Request(String),

    #[error("provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("could not parse response: {0}")]
    Parse(String),
}

/// Result alias for game operations.
pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_wraps_into_game_error() {
        let err: GameError = ProviderError::Timeout(Duration::from_secs(30)).into();
        assert!(matches!(err, GameError::ModelInvocation(_)));
        assert!(err.to_string().contains("timed out after 30s"));
    }

    #[test]
    fn api_error_message_includes_status_and_body() {
        let err = ProviderError::Api {
            provider: "Gemini".into(),
            status: 429,
            body: "quota".into(),
        };
        assert_eq!(err.to_string(), "Gemini returned 429: quota");
    }

    #[test]
    fn search_error_mentions_env_var() {
        assert!(SearchError::MissingApiKey.to_string().contains("TAVILY_API_KEY"));
    }
}
