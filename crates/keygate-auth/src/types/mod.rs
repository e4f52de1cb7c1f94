//! Domain types shared by the token generator and the session storages.
//!
//! ## Domain Types
//!
//! - [`Token`] / [`Expiry`] - Bearer tokens and their expiration
//! - [`Session`] - A live grant binding a token pair to a client and owner
//! - [`Client`], [`Owner`], [`Scope`] - Identity snapshots referenced by sessions

pub mod identity;
pub mod session;
pub mod token;

pub use identity::{Client, Owner, Scope};
pub use session::{AuthorizationCode, Session, SessionId};
pub use token::{Expiry, LATEST_EXPIRY, NO_EXPIRATION, Token, is_expired};
