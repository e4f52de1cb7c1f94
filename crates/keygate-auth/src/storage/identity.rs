//! Client, owner, and scope storage traits.
//!
//! These are keyed lookups used by the grant orchestrator. A miss is reported
//! as [`AuthError::NotFound`](crate::AuthError::NotFound).

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::{Client, Owner, Scope};

// =============================================================================
// Client Storage Trait
// =============================================================================

/// Lookup operations for registered clients.
///
/// # Example
///
/// ```ignore
/// use keygate_auth::storage::ClientStorage;
///
/// async fn example(storage: &impl ClientStorage) -> keygate_auth::AuthResult<()> {
///     let client = storage.find_by_id_and_secret("my-app", "s3cret").await?;
///     println!("Authenticated client: {}", client.name);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ClientStorage: Send + Sync {
    /// Find a client by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no client is registered under `client_id`.
    async fn find_by_id(&self, client_id: &str) -> AuthResult<Client>;

    /// Find a client by id, verifying its secret.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the client does not exist or the secret does
    /// not match.
    async fn find_by_id_and_secret(&self, client_id: &str, secret: &str) -> AuthResult<Client>;

    /// Re-fetch the latest copy of a previously loaded client.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the client has since been removed.
    async fn refresh(&self, client: &Client) -> AuthResult<Client>;
}

// =============================================================================
// Owner Storage Trait
// =============================================================================

/// Lookup operations for resource owners.
#[async_trait]
pub trait OwnerStorage: Send + Sync {
    /// Find an owner by username.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no owner has this username.
    async fn find_by_username(&self, username: &str) -> AuthResult<Owner>;

    /// Find an owner by username, verifying the password.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the owner does not exist or the password does
    /// not match.
    async fn find_by_username_and_password(
        &self,
        username: &str,
        password: &str,
    ) -> AuthResult<Owner>;

    /// Re-fetch the latest copy of a previously loaded owner.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the owner has since been removed.
    async fn refresh(&self, owner: &Owner) -> AuthResult<Owner>;
}

// =============================================================================
// Scope Storage Trait
// =============================================================================

/// Lookup operations for scopes.
#[async_trait]
pub trait ScopeStorage: Send + Sync {
    /// Find a scope by name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the scope is unknown.
    async fn find_by_name(&self, name: &str) -> AuthResult<Scope>;
}
