//! Session domain type.
//!
//! A session binds an access token, and optionally a refresh token, to the
//! client, owner, and scopes of a grant. The session store owns the
//! authoritative copy; client, owner, and scopes are shared snapshots.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::{Client, Owner, Scope};
use super::token::Token;

/// Identifier of a stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Marker recording that a session was obtained through an authorization code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorizationCode;

/// A live grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session identifier.
    pub id: SessionId,

    /// The access token. Every session has exactly one.
    pub access_token: Token,

    /// The refresh token, if the grant issued one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<Token>,

    /// Set when the session came from an authorization code exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<AuthorizationCode>,

    /// Granted scopes keyed by name.
    #[serde(default)]
    pub scopes: BTreeMap<String, Arc<Scope>>,

    /// Client the session was issued to.
    pub client: Arc<Client>,

    /// Owner that authorized the session.
    pub owner: Arc<Owner>,

    /// Grant-specific metadata such as the original redirect URI.
    #[serde(default)]
    pub extra_data: BTreeMap<String, String>,
}

impl Session {
    /// Creates a session with a fresh id and no refresh token, scopes, or
    /// extra data.
    #[must_use]
    pub fn new(client: Arc<Client>, owner: Arc<Owner>, access_token: Token) -> Self {
        Self {
            id: SessionId::new(),
            access_token,
            refresh_token: None,
            authorization_code: None,
            scopes: BTreeMap::new(),
            client,
            owner,
            extra_data: BTreeMap::new(),
        }
    }

    /// Sets the refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, token: Token) -> Self {
        self.refresh_token = Some(token);
        self
    }

    /// Marks the session as issued from an authorization code.
    #[must_use]
    pub fn with_authorization_code(mut self) -> Self {
        self.authorization_code = Some(AuthorizationCode);
        self
    }

    /// Adds a scope. A scope with the same name replaces the previous one.
    #[must_use]
    pub fn with_scope(mut self, scope: Arc<Scope>) -> Self {
        self.add_scope(scope);
        self
    }

    /// Adds an extra data entry.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_data.insert(key.into(), value.into());
        self
    }

    /// Adds a scope keyed by its name.
    pub fn add_scope(&mut self, scope: Arc<Scope>) {
        self.scopes.insert(scope.name.clone(), scope);
    }

    /// Returns `true` if the session was granted the named scope.
    #[must_use]
    pub fn has_scope(&self, name: &str) -> bool {
        self.scopes.contains_key(name)
    }

    /// Space-separated scope names, in the form used by OAuth responses.
    #[must_use]
    pub fn scope_string(&self) -> String {
        self.scopes.keys().cloned().collect::<Vec<_>>().join(" ")
    }
}
