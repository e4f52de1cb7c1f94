//! Session and token error types.
//!
//! This module defines all error types that can occur while minting, storing,
//! and resolving sessions.

use std::fmt;

/// Errors that can occur during session and token operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No entry exists under the presented token value or identifier.
    #[error("Not found: {message}")]
    NotFound {
        /// Description of what was looked up.
        message: String,
    },

    /// The access token has lapsed but the session can still be refreshed.
    #[error("Access token expired")]
    AccessTokenExpired,

    /// The session can no longer be recovered (refresh token lapsed or absent).
    #[error("Session expired")]
    SessionExpired,

    /// An error occurred while storing or retrieving session data.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// An unexpected internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a lookup miss.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if the store determined that a token has lapsed.
    #[must_use]
    pub fn is_expiration(&self) -> bool {
        matches!(self, Self::AccessTokenExpired | Self::SessionExpired)
    }

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::AccessTokenExpired | Self::SessionExpired
        )
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::Internal { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::Token,
            Self::AccessTokenExpired => ErrorCategory::Token,
            Self::SessionExpired => ErrorCategory::Token,
            Self::Storage { .. } => ErrorCategory::Infrastructure,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns the OAuth 2.0 error code for this error.
    #[must_use]
    pub fn oauth_error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "invalid_token",
            Self::AccessTokenExpired => "invalid_token",
            Self::SessionExpired => "invalid_grant",
            Self::Storage { .. } => "server_error",
            Self::Internal { .. } => "server_error",
        }
    }
}

/// Categories of session errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Token lookup and expiration errors.
    Token,
    /// Infrastructure/storage errors.
    Infrastructure,
    /// Internal errors.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token => write!(f, "token"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Internal => write!(f, "internal"),
        }
    }
}
