//! Per-user session store.
//!
//! Sessions are in-memory only; a restart loses all in-flight forms.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::form::state::{Field, FormState};

/// One active form conversation.
#[derive(Debug, Clone)]
pub struct Session {
    pub state: FormState,
    /// Collected answers, in the order they were given.
    pub answers: Vec<(Field, String)>,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            state: FormState::AwaitingName,
            answers: Vec::new(),
            started_at: now,
            updated_at: now,
        }
    }
}

/// In-memory map from Telegram user id to active session. Users not
/// present are Idle. Injected into the collector rather than global.
#[derive(Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<i64, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `user_id`, or `None` when Idle.
    pub async fn state_of(&self, user_id: i64) -> Option<FormState> {
        self.inner.read().await.get(&user_id).map(|s| s.state)
    }

    /// Start a fresh session in `AwaitingName`, discarding any stale one.
    pub async fn create(&self, user_id: i64) {
        self.inner.write().await.insert(user_id, Session::new());
    }

    /// Record one answer and advance to `next`.
    pub async fn record(&self, user_id: i64, field: Field, answer: &str, next: FormState) {
        let mut sessions = self.inner.write().await;
        if let Some(session) = sessions.get_mut(&user_id) {
            session.answers.push((field, answer.to_string()));
            session.state = next;
            session.updated_at = Utc::now();
        }
    }

    /// Remove and return the session, if any.
    pub async fn take(&self, user_id: i64) -> Option<Session> {
        self.inner.write().await.remove(&user_id)
    }

    /// Number of active sessions (for logging).
    pub async fn active_count(&self) -> usize {
        self.inner.read().await.len()
    }
}
