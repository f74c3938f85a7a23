//! Session storage implementation
//!
//! Sessions live in a process-local map keyed by the owner's user id.
//! Nothing is persisted; a restart drops every pending block.

use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use crate::models::Session;

/// Keyed store of per-user sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current session of `user_id`
    async fn load(&self, user_id: i64) -> Option<Session>;

    /// Insert or overwrite the session of its owner
    async fn save(&self, session: Session);

    /// Remove and return the session of `user_id`
    async fn remove(&self, user_id: i64) -> Option<Session>;

    /// Number of live sessions
    async fn len(&self) -> usize;
}

/// `SessionStore` backed by a `HashMap` behind a tokio `RwLock`
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<i64, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, user_id: i64) -> Option<Session> {
        self.sessions.read().await.get(&user_id).cloned()
    }

    async fn save(&self, session: Session) {
        let user_id = session.owner_id();
        let replaced = self.sessions.write().await.insert(user_id, session).is_some();
        debug!(user_id = user_id, replaced = replaced, "Session saved");
    }

    async fn remove(&self, user_id: i64) -> Option<Session> {
        let removed = self.sessions.write().await.remove(&user_id);
        debug!(user_id = user_id, removed = removed.is_some(), "Session removed");
        removed
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
