//! In-memory session store with per-session locking.
//!
//! The outer `RwLock` guards the id → session map and is only held long
//! enough to look up, insert, or remove a handle. Each session sits behind
//! its own `Mutex`, which a caller holds for an entire turn so two answers
//! for the same id cannot interleave. Nothing is persisted; a restart loses
//! every game.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::types::GameSession;

/// Shared, lockable handle to one session.
pub type SessionHandle = Arc<Mutex<GameSession>>;

/// Process-wide table of active game sessions.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a session, replacing any previous one with the same id.
    pub async fn insert(&self, session: GameSession) -> SessionHandle {
        let id = session.id.clone();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, handle.clone());
        handle
    }

    /// Look up a session handle.
    pub async fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Remove a session. Returns `true` if it was present.
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            debug!(session_id = id, "session removed");
        }
        removed
    }

    /// Whether a session with this id exists.
    pub async fn contains(&self, id: &str) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    /// Number of active sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop sessions untouched for longer than `max_idle`.
    ///
    /// Sessions whose lock is currently held are mid-turn and are skipped.
    /// Returns the number of sessions removed.
    pub async fn sweep_idle(&self, max_idle: Duration) -> usize {
        let cutoff = match chrono::Duration::from_std(max_idle) {
            Ok(d) => chrono::Utc::now() - d,
            Err(_) => return 0,
        };

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => session.updated_at >= cutoff,
            Err(_) => true,
        });
        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed = removed, remaining = sessions.len(), "swept idle sessions");
        }
        removed
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
