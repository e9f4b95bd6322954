//! HTTP API routes.
//!
//! | Route | Method | Body |
//! |---|---|---|
//! | `/` | GET | - |
//! | `/api/start` | POST | ignored |
//! | `/api/answer` | POST | `{session_id, answer}` |
//! | `/api/reset` | POST | `{session_id}` |
//! | `/api/sessions` | GET | - |
//!
//! Errors come back as `{"detail": "..."}`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

use guesswho_agent::GameEngine;
use guesswho_core::error::GameError;

/// Shared state for the API routes.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<GameEngine>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub session_id: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// GET /
async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok", "message": "Guesswho API is running"}))
}

/// POST /api/start
async fn start_game(State(state): State<AppState>) -> Response {
    match state.engine.start().await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => error_response(&e, "Error starting game"),
    }
}

/// POST /api/answer
async fn submit_answer(
    State(state): State<AppState>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    match state.engine.answer(&req.session_id, &req.answer).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => error_response(&e, "Error processing answer"),
    }
}

/// POST /api/reset
async fn reset_game(
    State(state): State<AppState>,
    payload: Result<Json<ResetRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    if let Some(id) = req.session_id {
        state.engine.reset(&id).await;
    }
    Json(json!({"status": "ok", "message": "Session reset"})).into_response()
}

/// GET /api/sessions
async fn active_sessions(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({"active_sessions": state.engine.active_sessions().await}))
}

/// Map an engine error to a status code and `{detail}` body.
fn error_response(err: &GameError, context: &str) -> Response {
    let (status, detail) = match err {
        GameError::SessionNotFound(_) => (
            StatusCode::NOT_FOUND,
            "Session not found. Please start a new game.".to_string(),
        ),
        other => {
            error!(error = %other, "{context}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{context}: {other}"),
            )
        }
    };
    (status, Json(json!({ "detail": detail }))).into_response()
}

/// A request body that could not be read keeps axum's status code but
/// uses the `{detail}` shape.
fn rejection_response(rejection: JsonRejection) -> Response {
    let status = rejection.status();
    let detail = rejection.body_text();
    warn!(status = status.as_u16(), detail = %detail, "rejected request body");
    (status, Json(json!({ "detail": detail }))).into_response()
}

/// Build the API router.
pub fn api_routes(state: AppState, cors_allow_all: bool) -> Router {
    let router = Router::new()
        .route("/", get(health))
        .route("/api/start", post(start_game))
        .route("/api/answer", post(submit_answer))
        .route("/api/reset", post(reset_game))
        .route("/api/sessions", get(active_sessions))
        .with_state(state);

    if cors_allow_all {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
