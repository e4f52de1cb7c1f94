//! Access and refresh token minting.
//!
//! Token values come from a pluggable [`TokenIdGenerator`]; expirations are
//! computed from the grant's override or the configured defaults.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use time::OffsetDateTime;

use crate::config::TokenConfig;
use crate::types::{Expiry, Token};

/// Produces unique token values.
pub trait TokenIdGenerator: Send + Sync {
    /// Returns a new token value.
    fn generate(&self) -> String;
}

impl<F> TokenIdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Default generator: 128 random bits, base64url encoded without padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenId;

impl TokenIdGenerator for RandomTokenId {
    fn generate(&self) -> String {
        let mut bytes = [0u8; 16];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

/// A grant type as seen by the token generator.
pub trait Grant: Send + Sync {
    /// The OAuth 2.0 `grant_type` this grant handles.
    fn grant_type(&self) -> &str;

    /// Access token lifetime override. `Duration::ZERO` means "use the
    /// configured default", not "expire immediately".
    fn access_token_lifetime(&self) -> Duration {
        Duration::ZERO
    }
}

/// Mints access and refresh tokens.
pub trait TokenGenerator: Send + Sync {
    /// Mints an access token for `grant`.
    fn generate_access_token(&self, config: &TokenConfig, grant: &dyn Grant) -> Token;

    /// Mints a refresh token. Its lifetime always comes from `config`.
    fn generate_refresh_token(&self, config: &TokenConfig, grant: &dyn Grant) -> Token;
}

/// [`TokenGenerator`] backed by an injectable [`TokenIdGenerator`].
#[derive(Clone)]
pub struct DefaultTokenGenerator {
    id_generator: Arc<dyn TokenIdGenerator>,
}

impl DefaultTokenGenerator {
    /// Creates a generator using [`RandomTokenId`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_id_generator(Arc::new(RandomTokenId))
    }

    /// Creates a generator using a custom id source.
    #[must_use]
    pub fn with_id_generator(id_generator: Arc<dyn TokenIdGenerator>) -> Self {
        Self { id_generator }
    }

    /// Returns the id source.
    #[must_use]
    pub fn id_generator(&self) -> &Arc<dyn TokenIdGenerator> {
        &self.id_generator
    }

    fn mint(&self, lifetime: Duration) -> Token {
        Token::new(
            self.id_generator.generate(),
            Expiry::after(OffsetDateTime::now_utc(), lifetime),
        )
    }
}

impl Default for DefaultTokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DefaultTokenGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultTokenGenerator").finish_non_exhaustive()
    }
}

impl TokenGenerator for DefaultTokenGenerator {
    fn generate_access_token(&self, config: &TokenConfig, grant: &dyn Grant) -> Token {
        let mut lifetime = grant.access_token_lifetime();
        if lifetime.is_zero() {
            lifetime = config.access_token_lifetime;
        }
        self.mint(lifetime)
    }

    fn generate_refresh_token(&self, config: &TokenConfig, _grant: &dyn Grant) -> Token {
        self.mint(config.refresh_token_lifetime)
    }
}
