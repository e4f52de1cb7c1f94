//! Bearer token domain type.
//!
//! A token is an opaque value paired with an absolute expiration instant.
//! Expirations are persisted as UTC epoch seconds, with [`NO_EXPIRATION`]
//! reserved for tokens that never lapse.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::datetime;

/// Persisted expiry value meaning "never expires".
pub const NO_EXPIRATION: i64 = -1;

/// Latest representable expiry; lifetimes reaching past it saturate here.
pub const LATEST_EXPIRY: OffsetDateTime = datetime!(9999-12-31 23:59:59 UTC);

/// When a token stops being valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Expiry {
    /// The token never lapses.
    Never,
    /// The token lapses at this instant (UTC).
    At(OffsetDateTime),
}

impl Expiry {
    /// Builds an expiry `lifetime` after `now`, truncated to whole seconds.
    ///
    /// Saturates at [`LATEST_EXPIRY`].
    #[must_use]
    pub fn after(now: OffsetDateTime, lifetime: Duration) -> Self {
        let at = time::Duration::try_from(lifetime)
            .ok()
            .and_then(|lifetime| now.checked_add(lifetime))
            .map_or(LATEST_EXPIRY, |at| at.min(LATEST_EXPIRY));
        Self::At(at.replace_nanosecond(0).unwrap_or(at))
    }

    /// Builds an expiry `lifetime` after the current UTC time.
    #[must_use]
    pub fn from_now(lifetime: Duration) -> Self {
        Self::after(OffsetDateTime::now_utc(), lifetime)
    }

    /// Decodes a persisted epoch-seconds value.
    ///
    /// # Errors
    ///
    /// Returns an error if `secs` is not [`NO_EXPIRATION`] and falls outside
    /// the representable date range.
    pub fn from_unix(secs: i64) -> Result<Self, time::error::ComponentRange> {
        if secs == NO_EXPIRATION {
            return Ok(Self::Never);
        }
        OffsetDateTime::from_unix_timestamp(secs.max(0)).map(Self::At)
    }

    /// Encodes this expiry as epoch seconds.
    ///
    /// Instants before the epoch encode as `0`, keeping them expired and
    /// clear of [`NO_EXPIRATION`].
    #[must_use]
    pub fn unix(&self) -> i64 {
        match self {
            Self::Never => NO_EXPIRATION,
            Self::At(at) => at.unix_timestamp().max(0),
        }
    }

    /// Returns `true` if the expiry instant is at or before `now`.
    #[must_use]
    pub fn has_passed(&self, now: OffsetDateTime) -> bool {
        match self {
            Self::Never => false,
            Self::At(at) => *at <= now,
        }
    }
}

impl From<Expiry> for i64 {
    fn from(expiry: Expiry) -> Self {
        expiry.unix()
    }
}

impl TryFrom<i64> for Expiry {
    type Error = time::error::ComponentRange;

    fn try_from(secs: i64) -> Result<Self, Self::Error> {
        Self::from_unix(secs)
    }
}

/// An access or refresh token.
///
/// A token's identity is its `value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Opaque bearer value presented by the client.
    pub value: String,

    /// Absolute expiration.
    pub expires: Expiry,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(value: impl Into<String>, expires: Expiry) -> Self {
        Self {
            value: value.into(),
            expires,
        }
    }

    /// Creates a token that never expires.
    #[must_use]
    pub fn non_expiring(value: impl Into<String>) -> Self {
        Self::new(value, Expiry::Never)
    }

    /// Returns `true` if this token has lapsed at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires.has_passed(now)
    }

    /// Returns `true` if this token has lapsed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(OffsetDateTime::now_utc())
    }

    /// Short prefix of the value, safe to put in logs.
    #[must_use]
    pub fn log_prefix(&self) -> &str {
        log_prefix(&self.value)
    }
}

/// Returns `true` if `token` is absent or has lapsed at `now`.
///
/// An absent token counts as expired: a session without a refresh token
/// cannot be refreshed.
#[must_use]
pub fn is_expired(token: Option<&Token>, now: OffsetDateTime) -> bool {
    token.is_none_or(|t| t.is_expired_at(now))
}

pub(crate) fn log_prefix(value: &str) -> &str {
    let end = value
        .char_indices()
        .nth(8)
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    &value[..end]
}
