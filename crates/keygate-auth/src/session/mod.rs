//! Expiration-aware session store and background eviction.
//!
//! - [`SessionStore`] - Resolves tokens to sessions, enforcing expiry
//! - [`EvictionQueue`] - Deletes dead sessions off the read path

pub mod eviction;
pub mod store;

pub use eviction::{EvictionQueue, EvictionStats};
pub use store::SessionStore;
