//! `make_final_guess`: the agent's way of committing to an answer.
//!
//! The tool is pure: it only formats the sentinel string. Calling it is what
//! marks a turn as a guess; the game engine looks at the tool call names and,
//! as a fallback, for the sentinel in the turn's final text.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::base::{require_string, Tool};

/// Registered name of the guess tool.
pub const FINAL_GUESS_TOOL: &str = "make_final_guess";

/// Marker prefix produced by the guess tool.
pub const FINAL_GUESS_SENTINEL: &str = "FINAL_GUESS:";

/// How sure the agent is about its guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Confidence {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Confidence::High),
            "medium" => Ok(Confidence::Medium),
            "low" => Ok(Confidence::Low),
            other => anyhow::bail!("Invalid confidence '{other}': expected high, medium, or low"),
        }
    }
}

/// Format a final guess.
///
/// `make_final_guess("Pizza", Confidence::High)` →
/// `"FINAL_GUESS: Pizza (confidence: high)"`.
pub fn make_final_guess(character_name: &str, confidence: Confidence) -> String {
    format!("{FINAL_GUESS_SENTINEL} {character_name} (confidence: {confidence})")
}

/// Whether the text carries the final-guess sentinel.
pub fn contains_sentinel(text: &str) -> bool {
    text.contains(FINAL_GUESS_SENTINEL)
}

// ─────────────────────────────────────────────
// MakeFinalGuessTool
// ─────────────────────────────────────────────

/// Registers a final guess about what the user is thinking of.
pub struct MakeFinalGuessTool;

#[async_trait]
impl Tool for MakeFinalGuessTool {
    fn name(&self) -> &str {
        FINAL_GUESS_TOOL
    }

    fn description(&self) -> &str {
        "Make your final guess when you're confident you know the answer. \
         Use this ONLY when you believe you have identified who or what the user \
         is thinking of. Afterwards, ask the user to confirm the guess."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "character_name": {
                    "type": "string",
                    "description": "The name of the character, person, or thing you think it is"
                },
                "confidence": {
                    "type": "string",
                    "enum": ["high", "medium", "low"],
                    "description": "Your confidence level"
                }
            },
            "required": ["character_name", "confidence"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let name = require_string(&params, "character_name")?;
        let confidence: Confidence = require_string(&params, "confidence")?.parse()?;
        Ok(make_final_guess(&name, confidence))
    }
}
