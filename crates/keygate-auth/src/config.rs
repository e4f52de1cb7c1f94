//! Token lifetime configuration.
//!
//! Lifetimes are written as human-readable durations in configuration files
//! and exposed as whole seconds to the token generator.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default access token lifetime (1 hour).
pub const DEFAULT_ACCESS_TOKEN_EXPIRES: u64 = 3600;

/// Default refresh token lifetime (14 days).
pub const DEFAULT_REFRESH_TOKEN_EXPIRES: u64 = 14 * 24 * 3600;

/// Longest accepted token lifetime (100 years).
pub const MAX_TOKEN_EXPIRES: u64 = 100 * 365 * 24 * 3600;

/// Token minting configuration.
///
/// # Example (TOML)
///
/// ```toml
/// [tokens]
/// access_token_lifetime = "1h"
/// refresh_token_lifetime = "14d"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Lifetime of access tokens when the grant does not override it.
    #[serde(with = "humantime_serde")]
    pub access_token_lifetime: Duration,

    /// Lifetime of refresh tokens. Grants cannot override it.
    #[serde(with = "humantime_serde")]
    pub refresh_token_lifetime: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_token_lifetime: Duration::from_secs(DEFAULT_ACCESS_TOKEN_EXPIRES),
            refresh_token_lifetime: Duration::from_secs(DEFAULT_REFRESH_TOKEN_EXPIRES),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    tokens: TokenConfig,
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration value is out of range or inconsistent.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// The configuration document could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl TokenConfig {
    /// Builds a configuration from lifetimes expressed in seconds.
    #[must_use]
    pub fn from_secs(access_token_expires: u64, refresh_token_expires: u64) -> Self {
        Self {
            access_token_lifetime: Duration::from_secs(access_token_expires),
            refresh_token_lifetime: Duration::from_secs(refresh_token_expires),
        }
    }

    /// Parses the `[tokens]` table of a TOML document and validates it.
    ///
    /// A missing table yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(source)?;
        file.tokens.validate()?;
        Ok(file.tokens)
    }

    /// Default access token lifetime in seconds.
    #[must_use]
    pub fn default_access_token_expires(&self) -> u64 {
        self.access_token_lifetime.as_secs()
    }

    /// Default refresh token lifetime in seconds.
    #[must_use]
    pub fn default_refresh_token_expires(&self) -> u64 {
        self.refresh_token_lifetime.as_secs()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - Either lifetime is shorter than one second
    /// - Either lifetime exceeds [`MAX_TOKEN_EXPIRES`]
    /// - The refresh token would lapse before the access token
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_access_token_expires() == 0 {
            return Err(ConfigError::InvalidValue(
                "access_token_lifetime must be at least 1s".to_string(),
            ));
        }

        if self.default_refresh_token_expires() == 0 {
            return Err(ConfigError::InvalidValue(
                "refresh_token_lifetime must be at least 1s".to_string(),
            ));
        }

        for (name, secs) in [
            ("access_token_lifetime", self.default_access_token_expires()),
            ("refresh_token_lifetime", self.default_refresh_token_expires()),
        ] {
            if secs > MAX_TOKEN_EXPIRES {
                return Err(ConfigError::InvalidValue(format!(
                    "{name} ({secs}s) exceeds the maximum of {MAX_TOKEN_EXPIRES}s"
                )));
            }
        }

        if self.refresh_token_lifetime < self.access_token_lifetime {
            return Err(ConfigError::InvalidValue(format!(
                "refresh_token_lifetime ({}s) must not be shorter than access_token_lifetime ({}s)",
                self.default_refresh_token_expires(),
                self.default_access_token_expires()
            )));
        }

        Ok(())
    }
}
