//! Session storage trait.
//!
//! This module defines the backend interface for persisting sessions.
//! Backends only store and index; expiration rules live in
//! [`SessionStore`](crate::session::SessionStore).
//!
//! # Implementation Notes
//!
//! A durable backend keeps three logical tables:
//!
//! - `sessions(session_id) -> session record`
//! - `sessions_by_access_token(token_value) -> session_id`
//! - `sessions_by_refresh_token(token_value) -> session_id`
//!
//! Implementations must:
//!
//! - Apply `save` to both token indexes atomically
//! - Make `delete` idempotent
//! - Never log full token values

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::{Session, SessionId};

/// Storage trait for sessions.
///
/// # Implementations
///
/// Implementations are provided in separate crates:
/// - `keygate-auth-memory` - In-memory reference backend
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Stores a session, indexing it by access token and, when present,
    /// refresh token.
    ///
    /// Overwrites any entry under either token value; a different session
    /// that loses a token key this way is dropped. Saving a session whose id
    /// is already stored replaces the previous version, including its index
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn save(&self, session: &Session) -> AuthResult<()>;

    /// Finds a session by access token value.
    ///
    /// Returns sessions regardless of expiration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_access_token(&self, value: &str) -> AuthResult<Option<Session>>;

    /// Finds a session by refresh token value.
    ///
    /// Returns sessions regardless of expiration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_refresh_token(&self, value: &str) -> AuthResult<Option<Session>>;

    /// Finds a session by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, id: SessionId) -> AuthResult<Option<Session>>;

    /// Removes a session and its index entries.
    ///
    /// Deleting an absent session is not an error. Index entries that now
    /// point at a different session are left untouched, and a session that
    /// was re-saved with any change since `session` was read is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn delete(&self, session: &Session) -> AuthResult<()>;

    /// Number of stored sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn len(&self) -> AuthResult<usize>;

    /// Returns `true` if no sessions are stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn is_empty(&self) -> AuthResult<bool> {
        Ok(self.len().await? == 0)
    }
}
