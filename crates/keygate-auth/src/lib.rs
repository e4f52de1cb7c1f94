//! # keygate-auth
//!
//! Session and token lifecycle for the Keygate OAuth 2.0 authorization server.
//!
//! This crate provides:
//! - Access and refresh token minting with pluggable token values
//! - The session model binding a token pair to a client, owner, and scopes
//! - Storage traits for sessions and identity lookups
//! - An expiration-aware session store with lazy background eviction
//!
//! ## Modules
//!
//! - [`config`] - Token lifetime configuration
//! - [`token`] - Token generation
//! - [`types`] - Tokens, sessions, clients, owners, and scopes
//! - [`request`] - Session request carriers passed to grants
//! - [`storage`] - Storage traits implemented by backends
//! - [`session`] - The session store and its eviction worker

pub mod config;
pub mod error;
pub mod request;
pub mod session;
pub mod storage;
pub mod token;
pub mod types;

pub use config::{ConfigError, TokenConfig};
pub use error::{AuthError, ErrorCategory};
pub use request::{BasicSessionRequest, SessionRequest};
pub use session::{EvictionStats, SessionStore};
pub use storage::{ClientStorage, OwnerStorage, ScopeStorage, SessionStorage};
pub use token::{DefaultTokenGenerator, Grant, RandomTokenId, TokenGenerator, TokenIdGenerator};
pub use types::{
    AuthorizationCode, Client, Expiry, LATEST_EXPIRY, NO_EXPIRATION, Owner, Scope, Session,
    SessionId, Token, is_expired,
};

/// Type alias for session and token results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use keygate_auth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::AuthResult;
    pub use crate::config::{ConfigError, TokenConfig};
    pub use crate::error::{AuthError, ErrorCategory};
    pub use crate::request::{BasicSessionRequest, SessionRequest};
    pub use crate::session::{EvictionStats, SessionStore};
    pub use crate::storage::{ClientStorage, OwnerStorage, ScopeStorage, SessionStorage};
    pub use crate::token::{DefaultTokenGenerator, Grant, TokenGenerator, TokenIdGenerator};
    pub use crate::types::{Client, Expiry, Owner, Scope, Session, SessionId, Token};
}
