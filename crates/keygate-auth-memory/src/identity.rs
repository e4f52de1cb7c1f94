//! In-memory client, owner, and scope storages.
//!
//! Credentials are never kept in plain text: lookups by id and secret (or
//! username and password) go through a SHA-256 digest of the pair.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use keygate_auth::storage::{ClientStorage, OwnerStorage, ScopeStorage};
use keygate_auth::{AuthError, AuthResult, Client, Owner, Scope};
use sha2::{Digest, Sha256};

/// Hash an identifier/credential pair.
fn credential_key(id: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.as_bytes());
    hasher.update([0u8]);
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

// =============================================================================
// Clients
// =============================================================================

/// Client registry held in memory.
#[derive(Debug, Default)]
pub struct MemoryClientStorage {
    by_id: DashMap<String, Arc<Client>>,
    by_credentials: DashMap<String, Arc<Client>>,
}

impl MemoryClientStorage {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `client` under `client_id` with `secret`.
    pub fn add_client(&self, client_id: &str, secret: &str, client: Client) -> &Self {
        let client = Arc::new(client);
        self.by_id.insert(client_id.to_string(), client.clone());
        self.by_credentials
            .insert(credential_key(client_id, secret), client);
        self
    }
}

#[async_trait]
impl ClientStorage for MemoryClientStorage {
    async fn find_by_id(&self, client_id: &str) -> AuthResult<Client> {
        self.by_id
            .get(client_id)
            .map(|c| Client::clone(&c))
            .ok_or_else(|| AuthError::not_found(format!("client '{client_id}'")))
    }

    async fn find_by_id_and_secret(&self, client_id: &str, secret: &str) -> AuthResult<Client> {
        self.by_credentials
            .get(&credential_key(client_id, secret))
            .map(|c| Client::clone(&c))
            .ok_or_else(|| AuthError::not_found(format!("client '{client_id}'")))
    }

    async fn refresh(&self, client: &Client) -> AuthResult<Client> {
        self.find_by_id(&client.id).await
    }
}

// =============================================================================
// Owners
// =============================================================================

/// Resource owner directory held in memory.
#[derive(Debug, Default)]
pub struct MemoryOwnerStorage {
    by_username: DashMap<String, Arc<Owner>>,
    by_id: DashMap<String, Arc<Owner>>,
    by_credentials: DashMap<String, Arc<Owner>>,
}

impl MemoryOwnerStorage {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `owner` under `username` with `password`.
    pub fn add_owner(&self, username: &str, password: &str, owner: Owner) -> &Self {
        let owner = Arc::new(owner);
        self.by_username.insert(username.to_string(), owner.clone());
        self.by_id.insert(owner.id.clone(), owner.clone());
        self.by_credentials
            .insert(credential_key(username, password), owner);
        self
    }
}

#[async_trait]
impl OwnerStorage for MemoryOwnerStorage {
    async fn find_by_username(&self, username: &str) -> AuthResult<Owner> {
        self.by_username
            .get(username)
            .map(|o| Owner::clone(&o))
            .ok_or_else(|| AuthError::not_found(format!("owner '{username}'")))
    }

    async fn find_by_username_and_password(
        &self,
        username: &str,
        password: &str,
    ) -> AuthResult<Owner> {
        self.by_credentials
            .get(&credential_key(username, password))
            .map(|o| Owner::clone(&o))
            .ok_or_else(|| AuthError::not_found(format!("owner '{username}'")))
    }

    async fn refresh(&self, owner: &Owner) -> AuthResult<Owner> {
        self.by_id
            .get(&owner.id)
            .map(|o| Owner::clone(&o))
            .ok_or_else(|| AuthError::not_found(format!("owner id '{}'", owner.id)))
    }
}

// =============================================================================
// Scopes
// =============================================================================

/// Scope catalogue held in memory.
#[derive(Debug, Default)]
pub struct MemoryScopeStorage {
    scopes: DashMap<String, Arc<Scope>>,
}

impl MemoryScopeStorage {
    /// Creates an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `scope` under its name.
    pub fn add_scope(&self, scope: Scope) -> &Self {
        self.scopes.insert(scope.name.clone(), Arc::new(scope));
        self
    }

    /// Returns the shared snapshot for `name`, ready to attach to a session.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Scope>> {
        self.scopes.get(name).map(|s| Arc::clone(&s))
    }
}

#[async_trait]
impl ScopeStorage for MemoryScopeStorage {
    async fn find_by_name(&self, name: &str) -> AuthResult<Scope> {
        self.scopes
            .get(name)
            .map(|s| Scope::clone(&s))
            .ok_or_else(|| AuthError::not_found(format!("scope '{name}'")))
    }
}
