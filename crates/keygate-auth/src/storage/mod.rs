//! Storage traits for session and identity data.
//!
//! This module defines storage interfaces for:
//!
//! - Sessions indexed by access and refresh token
//! - OAuth client registrations
//! - Resource owners
//! - Scopes
//!
//! # Implementations
//!
//! Storage implementations are provided in separate crates:
//!
//! - `keygate-auth-memory` - In-memory reference backend

pub mod identity;
pub mod session;

pub use identity::{ClientStorage, OwnerStorage, ScopeStorage};
pub use session::SessionStorage;
