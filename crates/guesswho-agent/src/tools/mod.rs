//! Tool modules for the guessing agent.

pub mod base;
pub mod guess;
pub mod registry;
pub mod web;

pub use base::{require_string, Tool};
pub use guess::{
    contains_sentinel, make_final_guess, Confidence, MakeFinalGuessTool, FINAL_GUESS_SENTINEL,
    FINAL_GUESS_TOOL,
};
pub use registry::ToolRegistry;
pub use web::{SearchHit, SearchProvider, TavilySearch, WebSearchTool, WEB_SEARCH_TOOL};
