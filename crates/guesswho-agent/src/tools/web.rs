//! Web search: `SearchProvider` trait, Tavily client, and the `web_search` tool.
//!
//! Search failures never fail a turn: the tool reports them to the agent as
//! `"Search error: ..."` text and the agent carries on asking questions.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use guesswho_core::config::schema::SearchConfig;
use guesswho_core::error::SearchError;

use super::base::{require_string, Tool};

/// Registered name of the search tool.
pub const WEB_SEARCH_TOOL: &str = "web_search";

/// Request timeout for the search backend.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(20);

// ─────────────────────────────────────────────
// SearchProvider
// ─────────────────────────────────────────────

/// One search result as the agent sees it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// A hosted web search backend.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Return up to `max_results` hits for `query`, best first.
    async fn search(
        &self,
        query: &str,
        max_results: u32,
        depth: &str,
    ) -> Result<Vec<SearchHit>, SearchError>;
}

// ─────────────────────────────────────────────
// TavilySearch
// ─────────────────────────────────────────────

/// Tavily search API client (`POST {api_base}/search`).
pub struct TavilySearch {
    api_key: String,
    api_base: String,
    client: Client,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

impl TavilySearch {
    pub fn new(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: api_base.into(),
            client: Client::builder()
                .timeout(SEARCH_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.api_key.clone(), config.api_base.clone())
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl SearchProvider for TavilySearch {
    async fn search(
        &self,
        query: &str,
        max_results: u32,
        depth: &str,
    ) -> Result<Vec<SearchHit>, SearchError> {
        if self.api_key.is_empty() {
            return Err(SearchError::MissingApiKey);
        }

        let resp = self
            .client
            .post(self.search_url())
            .json(&json!({
                "api_key": self.api_key,
                "query": query,
                "search_depth": depth,
                "max_results": max_results,
            }))
            .send()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchError::Api { status, body });
        }

        let body: TavilyResponse = resp
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        Ok(body.results)
    }
}

// ─────────────────────────────────────────────
// WebSearchTool
// ─────────────────────────────────────────────

/// Searches the web for candidates matching what the agent has learned so far.
pub struct WebSearchTool {
    provider: Arc<dyn SearchProvider>,
    max_results: u32,
    search_depth: String,
}

impl WebSearchTool {
    pub fn new(provider: Arc<dyn SearchProvider>, max_results: u32, search_depth: impl Into<String>) -> Self {
        Self {
            provider,
            max_results,
            search_depth: search_depth.into(),
        }
    }

    /// Build the tool with a Tavily backend from config.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(
            Arc::new(TavilySearch::from_config(config)),
            config.max_results,
            config.search_depth.clone(),
        )
    }

    /// Run a search and render it as the digest the agent reads.
    pub async fn search_digest(&self, query: &str) -> String {
        debug!(query = %query, max_results = self.max_results, "searching web");

        match self
            .provider
            .search(query, self.max_results, &self.search_depth)
            .await
        {
            Ok(hits) => format_hits(&hits),
            Err(e) => {
                warn!(query = %query, error = %e, "web search failed");
                format!("Search error: {e}")
            }
        }
    }
}

/// `"- title: content"` per hit in provider order, or `"No results found."`.
fn format_hits(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No results found.".into();
    }
    hits.iter()
        .map(|h| format!("- {}: {}", h.title, h.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        WEB_SEARCH_TOOL
    }

    fn description(&self) -> &str {
        "Search the web for information about a character, person, or topic. \
         Use it to gather real candidates once the category is narrowed down, \
         or to verify facts before guessing. Returns a summary of the top results."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let query = require_string(&params, "query")?;
        Ok(self.search_digest(&query).await)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Returns a fixed result set (or error) and records the arguments.
    struct StaticSearch {
        result: std::sync::Mutex<Option<Result<Vec<SearchHit>, SearchError>>>,
        seen: std::sync::Mutex<Vec<(String, u32, String)>>,
    }

    impl StaticSearch {
        fn new(result: Result<Vec<SearchHit>, SearchError>) -> Self {
            Self {
                result: std::sync::Mutex::new(Some(result)),
                seen: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SearchProvider for StaticSearch {
        async fn search(
            &self,
            query: &str,
            max_results: u32,
            depth: &str,
        ) -> Result<Vec<SearchHit>, SearchError> {
            self.seen
                .lock()
                .unwrap()
                .push((query.to_string(), max_results, depth.to_string()));
            self.result.lock().unwrap().take().unwrap_or(Ok(Vec::new()))
        }
    }

    fn query(q: &str) -> HashMap<String, Value> {
        let mut p = HashMap::new();
        p.insert("query".into(), json!(q));
        p
    }

    #[tokio::test]
    async fn test_empty_results() {
        let tool = WebSearchTool::new(Arc::new(StaticSearch::new(Ok(vec![]))), 3, "basic");
        let out = tool.execute(query("nothing")).await.unwrap();
        assert_eq!(out, "No results found.");
    }

    #[tokio::test]
    async fn test_results_keep_provider_order() {
        let hits = vec![
            SearchHit::new("LeBron James", "American basketball player."),
            SearchHit::new("Stephen Curry", "Point guard for the Warriors."),
        ];
        let provider = Arc::new(StaticSearch::new(Ok(hits)));
        let tool = WebSearchTool::new(provider.clone(), 3, "basic");

        let out = tool.execute(query("famous NBA players")).await.unwrap();
        assert_eq!(
            out,
            "- LeBron James: American basketball player.\n- Stephen Curry: Point guard for the Warriors."
        );

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0], ("famous NBA players".to_string(), 3, "basic".to_string()));
    }

    #[tokio::test]
    async fn test_provider_error_becomes_text() {
        let provider = Arc::new(StaticSearch::new(Err(SearchError::Request("connection reset".into()))));
        let tool = WebSearchTool::new(provider, 3, "basic");
        let out = tool.execute(query("anything")).await.unwrap();
        assert_eq!(out, "Search error: request failed: connection reset");
    }

    #[tokio::test]
    async fn test_missing_query_is_error() {
        let tool = WebSearchTool::new(Arc::new(StaticSearch::new(Ok(vec![]))), 3, "basic");
        assert!(tool.execute(HashMap::new()).await.is_err());
    }

    // ── Tavily against a mock server ──

    #[tokio::test]
    async fn test_tavily_request_and_parse() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_partial_json(json!({
                "api_key": "tvly-test",
                "query": "popular Italian foods",
                "search_depth": "basic",
                "max_results": 3
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "popular Italian foods",
                "results": [
                    {"title": "Pizza", "url": "https://example.com/pizza", "content": "Flatbread with toppings.", "score": 0.9},
                    {"title": "Lasagna", "url": "https://example.com/lasagna", "content": "Layered pasta.", "score": 0.8}
                ]
            })))
            .mount(&mock_server)
            .await;

        let tavily = TavilySearch::new("tvly-test", mock_server.uri());
        let hits = tavily.search("popular Italian foods", 3, "basic").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], SearchHit::new("Pizza", "Flatbread with toppings."));
        assert_eq!(hits[1].title, "Lasagna");
    }

    #[tokio::test]
    async fn test_tavily_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&mock_server)
            .await;

        let tavily = TavilySearch::new("bad", mock_server.uri());
        let err = tavily.search("q", 3, "basic").await.unwrap_err();
        match err {
            SearchError::Api { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_tavily_missing_key() {
        let tavily = TavilySearch::new("", "http://127.0.0.1:1");
        assert!(matches!(
            tavily.search("q", 3, "basic").await,
            Err(SearchError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_tool_from_config_degrades_without_key() {
        let tool = WebSearchTool::from_config(&SearchConfig::default());
        let out = tool.execute(query("anything")).await.unwrap();
        assert!(out.starts_with("Search error: "));
    }
}
