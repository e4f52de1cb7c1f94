//! Client, resource owner, and scope snapshots.
//!
//! Sessions hold these as shared, immutable references taken when the
//! session was created. Use the identity storages to re-fetch a fresh copy.

use serde::{Deserialize, Serialize};

/// A registered OAuth 2.0 client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Client identifier used in OAuth flows.
    pub id: String,

    /// Human-readable display name.
    pub name: String,

    /// Registered redirect URI for the authorization code flow.
    pub redirect_uri: String,
}

impl Client {
    /// Creates a client snapshot.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            redirect_uri: redirect_uri.into(),
        }
    }
}

/// The resource owner that authorized a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Owner {
    /// Owner identifier.
    pub id: String,

    /// Display name.
    pub name: String,
}

impl Owner {
    /// Creates an owner snapshot.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Builds the owner for grants where the client acts on its own behalf
    /// (client credentials).
    #[must_use]
    pub fn from_client(client: &Client) -> Self {
        Self::new(client.id.clone(), client.name.clone())
    }
}

/// A named permission granted to a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    /// Scope identifier.
    pub id: String,

    /// Scope name, unique within a session.
    pub name: String,
}

impl Scope {
    /// Creates a scope.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_from_client() {
        let client = Client::new("svc-1", "Billing service", "https://billing.example/cb");
        let owner = Owner::from_client(&client);
        assert_eq!(owner, Owner::new("svc-1", "Billing service"));
    }

    #[test]
    fn test_client_serialization() {
        let client = Client::new("app", "App", "https://app.example/cb");
        let json = serde_json::to_value(&client).unwrap();
        assert_eq!(json["redirectUri"], "https://app.example/cb");
    }
}
