//! Expiration-aware session store.
//!
//! [`SessionStore`] wraps any [`SessionStorage`] backend and decides, from its
//! own clock check, whether a looked-up session may be used:
//!
//! | Lookup          | Access token | Refresh token      | Result                         |
//! |-----------------|--------------|--------------------|--------------------------------|
//! | access token    | valid        | any                | session                        |
//! | access token    | expired      | valid              | `AccessTokenExpired`           |
//! | access token    | expired      | expired or absent  | `SessionExpired` + eviction    |
//! | refresh token   | any          | valid              | session                        |
//! | refresh token   | any          | expired            | `SessionExpired` + eviction    |
//!
//! The refresh path does not look at the access token: refreshing is the
//! recovery path for a session whose access token has lapsed.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::instrument;

use super::eviction::{EvictionQueue, EvictionStats};
use crate::storage::SessionStorage;
use crate::types::token::log_prefix;
use crate::types::{Session, is_expired};
use crate::{AuthError, AuthResult};

/// Session store enforcing expiration and lazy eviction.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use keygate_auth::session::SessionStore;
/// use keygate_auth_memory::MemorySessionStorage;
///
/// let store = SessionStore::new(Arc::new(MemorySessionStorage::new()))?;
/// store.save(&session).await?;
///
/// match store.find_by_access_token(bearer).await {
///     Ok(session) => { /* authorized */ }
///     Err(AuthError::AccessTokenExpired) => { /* ask the client to refresh */ }
///     Err(e) => return Err(e),
/// }
/// ```
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    eviction: EvictionQueue,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("eviction", &self.eviction)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Creates a store over `storage` and starts its eviction worker.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if called outside a Tokio runtime.
    pub fn new(storage: Arc<dyn SessionStorage>) -> AuthResult<Self> {
        let eviction = EvictionQueue::spawn(storage.clone())?;
        Ok(Self { storage, eviction })
    }

    /// The backing storage.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    /// Stores `session`, replacing any entry under its token values.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the backend fails.
    #[instrument(skip_all, fields(session_id = %session.id))]
    pub async fn save(&self, session: &Session) -> AuthResult<()> {
        self.storage.save(session).await
    }

    /// Resolves a bearer access token to its session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session uses this access token
    /// - `AccessTokenExpired` if the access token lapsed but the session can
    ///   still be refreshed
    /// - `SessionExpired` if both tokens lapsed (or there is no refresh
    ///   token); the session is scheduled for eviction
    /// - `Storage` if the backend fails; nothing is evicted
    #[instrument(skip_all)]
    pub async fn find_by_access_token(&self, value: &str) -> AuthResult<Session> {
        let Some(session) = self.storage.find_by_access_token(value).await? else {
            tracing::debug!(token_prefix = log_prefix(value), "No session for access token");
            return Err(AuthError::not_found("no session for access token"));
        };

        let now = OffsetDateTime::now_utc();
        if is_expired(Some(&session.access_token), now) {
            if is_expired(session.refresh_token.as_ref(), now) {
                tracing::debug!(session_id = %session.id, "Session expired, scheduling eviction");
                self.eviction.enqueue(session);
                return Err(AuthError::SessionExpired);
            }

            tracing::debug!(session_id = %session.id, "Access token expired, refresh required");
            return Err(AuthError::AccessTokenExpired);
        }

        Ok(session)
    }

    /// Resolves a refresh token to its session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session uses this refresh token
    /// - `SessionExpired` if the refresh token lapsed; the session is
    ///   scheduled for eviction
    /// - `Storage` if the backend fails; nothing is evicted
    #[instrument(skip_all)]
    pub async fn find_by_refresh_token(&self, value: &str) -> AuthResult<Session> {
        let Some(session) = self.storage.find_by_refresh_token(value).await? else {
            tracing::debug!(token_prefix = log_prefix(value), "No session for refresh token");
            return Err(AuthError::not_found("no session for refresh token"));
        };

        if is_expired(session.refresh_token.as_ref(), OffsetDateTime::now_utc()) {
            tracing::debug!(session_id = %session.id, "Refresh token expired, scheduling eviction");
            self.eviction.enqueue(session);
            return Err(AuthError::SessionExpired);
        }

        Ok(session)
    }

    /// Removes `session` from both token indexes. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the backend fails.
    #[instrument(skip_all, fields(session_id = %session.id))]
    pub async fn delete(&self, session: &Session) -> AuthResult<()> {
        self.storage.delete(session).await
    }

    /// Waits until all evictions scheduled so far have been processed.
    pub async fn flush_evictions(&self) {
        self.eviction.flush().await;
    }

    /// Get eviction statistics.
    #[must_use]
    pub fn eviction_stats(&self) -> EvictionStats {
        self.eviction.stats()
    }

    /// Drains pending evictions and stops the eviction worker.
    ///
    /// Lookups keep working afterwards, but dead sessions are no longer evicted.
    pub async fn shutdown(&self) {
        self.eviction.shutdown().await;
    }
}
