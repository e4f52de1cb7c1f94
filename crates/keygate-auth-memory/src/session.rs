//! In-memory session storage.
//!
//! Sessions live in one table keyed by id, with two token indexes pointing
//! into it. All three maps sit behind a single read/write lock: lookups share
//! the read lock, while `save` and `delete` update both indexes under one
//! write lock, so readers never see a half-applied change.

use std::collections::HashMap;

use async_trait::async_trait;
use keygate_auth::storage::SessionStorage;
use keygate_auth::{AuthResult, Session, SessionId};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Indexes {
    sessions: HashMap<SessionId, Session>,
    by_access_token: HashMap<String, SessionId>,
    by_refresh_token: HashMap<String, SessionId>,
}

impl Indexes {
    fn insert(&mut self, session: Session) {
        if let Some(previous) = self.sessions.remove(&session.id) {
            self.unindex(&previous);
        }

        let mut displaced = Vec::new();
        displaced.extend(
            self.by_access_token
                .insert(session.access_token.value.clone(), session.id),
        );
        if let Some(refresh) = &session.refresh_token {
            displaced.extend(self.by_refresh_token.insert(refresh.value.clone(), session.id));
        }

        // A session that lost a token key to another id is unreachable by it.
        for id in displaced.into_iter().filter(|id| *id != session.id) {
            if let Some(stale) = self.sessions.remove(&id) {
                self.unindex(&stale);
            }
        }
        self.sessions.insert(session.id, session);
    }

    fn remove(&mut self, session: &Session) -> bool {
        let same_version = self.sessions.get(&session.id).map(|stored| stored == session);

        match same_version {
            Some(true) => {
                if let Some(stored) = self.sessions.remove(&session.id) {
                    self.unindex(&stored);
                }
                true
            }
            // Re-saved since this copy was read; keep the newer version.
            Some(false) => false,
            None => {
                self.unindex(session);
                false
            }
        }
    }

    /// Drops the token entries of `session` that still point at its id.
    fn unindex(&mut self, session: &Session) {
        remove_if_points_to(
            &mut self.by_access_token,
            &session.access_token.value,
            session.id,
        );
        if let Some(refresh) = &session.refresh_token {
            remove_if_points_to(&mut self.by_refresh_token, &refresh.value, session.id);
        }
    }

    fn resolve(&self, index: &HashMap<String, SessionId>, value: &str) -> Option<Session> {
        index
            .get(value)
            .and_then(|id| self.sessions.get(id))
            .cloned()
    }
}

fn remove_if_points_to(index: &mut HashMap<String, SessionId>, value: &str, id: SessionId) {
    if index.get(value) == Some(&id) {
        index.remove(value);
    }
}

/// Session storage held entirely in process memory.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use keygate_auth::SessionStore;
/// use keygate_auth_memory::MemorySessionStorage;
///
/// let store = SessionStore::new(Arc::new(MemorySessionStorage::new()))?;
/// ```
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    indexes: RwLock<Indexes>,
}

impl MemorySessionStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the access token index.
    pub async fn access_index_len(&self) -> usize {
        self.indexes.read().await.by_access_token.len()
    }

    /// Number of entries in the refresh token index.
    pub async fn refresh_index_len(&self) -> usize {
        self.indexes.read().await.by_refresh_token.len()
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn save(&self, session: &Session) -> AuthResult<()> {
        self.indexes.write().await.insert(session.clone());
        Ok(())
    }

    async fn find_by_access_token(&self, value: &str) -> AuthResult<Option<Session>> {
        let indexes = self.indexes.read().await;
        Ok(indexes.resolve(&indexes.by_access_token, value))
    }

    async fn find_by_refresh_token(&self, value: &str) -> AuthResult<Option<Session>> {
        let indexes = self.indexes.read().await;
        Ok(indexes.resolve(&indexes.by_refresh_token, value))
    }

    async fn find_by_id(&self, id: SessionId) -> AuthResult<Option<Session>> {
        Ok(self.indexes.read().await.sessions.get(&id).cloned())
    }

    async fn delete(&self, session: &Session) -> AuthResult<()> {
        let removed = self.indexes.write().await.remove(session);
        if !removed {
            tracing::trace!(session_id = %session.id, "Session already gone or replaced");
        }
        Ok(())
    }

    async fn len(&self) -> AuthResult<usize> {
        Ok(self.indexes.read().await.sessions.len())
    }
}
