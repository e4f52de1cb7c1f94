//! In-memory storage backend for keygate-auth.
//!
//! This crate provides in-process implementations of the storage traits
//! from `keygate-auth`:
//!
//! - [`MemorySessionStorage`] - Sessions indexed by access and refresh token
//! - [`MemoryClientStorage`] - Registered clients
//! - [`MemoryOwnerStorage`] - Resource owners
//! - [`MemoryScopeStorage`] - Scopes
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use keygate_auth::{SessionStore, TokenConfig, DefaultTokenGenerator, TokenGenerator};
//! use keygate_auth_memory::MemorySessionStorage;
//!
//! let store = SessionStore::new(Arc::new(MemorySessionStorage::new()))?;
//! let access = DefaultTokenGenerator::new().generate_access_token(&TokenConfig::default(), &grant);
//! ```

pub mod identity;
pub mod session;

pub use identity::{MemoryClientStorage, MemoryOwnerStorage, MemoryScopeStorage};
pub use session::MemorySessionStorage;
