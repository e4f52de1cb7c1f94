//! Token generation.
//!
//! - [`TokenGenerator`] - Mints access and refresh tokens for a grant
//! - [`TokenIdGenerator`] - Pluggable source of token values

pub mod generator;

pub use generator::{DefaultTokenGenerator, Grant, RandomTokenId, TokenGenerator, TokenIdGenerator};
