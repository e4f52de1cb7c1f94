//! Session request carriers.
//!
//! The grant orchestrator hands requests to grants through [`SessionRequest`],
//! which exposes only the grant type and named string parameters.

use std::collections::HashMap;

/// A request to open a session.
pub trait SessionRequest: Send + Sync {
    /// The OAuth 2.0 `grant_type` of the request.
    fn grant_type(&self) -> &str;

    /// Returns the named parameter, if present.
    fn get(&self, key: &str) -> Option<&str>;
}

/// Map-backed [`SessionRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicSessionRequest {
    grant_type: String,
    data: HashMap<String, String>,
}

impl BasicSessionRequest {
    /// Creates a request holding its own copy of `data`.
    #[must_use]
    pub fn new(grant_type: impl Into<String>, data: &HashMap<String, String>) -> Self {
        Self {
            grant_type: grant_type.into(),
            data: data.clone(),
        }
    }
}

impl SessionRequest for BasicSessionRequest {
    fn grant_type(&self) -> &str {
        &self.grant_type
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}
