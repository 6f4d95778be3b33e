//! Authentication error types.
//!
//! Four error classes matter to callers:
//!
//! - [`AuthError::Validation`] - malformed or policy-violating input, addressed to a field
//! - [`AuthError::Unauthenticated`] - credentials rejected; carries no detail at all
//! - [`AuthError::Authorization`] - identity proven but the current password was wrong
//! - [`AuthError::CredentialFormat`] - a stored encoding could not be interpreted
//!
//! The remaining variants describe infrastructure failures.

use std::fmt;

/// Uniform message for every rejected authentication attempt.
///
/// Unknown login id, wrong password, malformed login id and missing headers all
/// render this exact text.
pub const UNAUTHENTICATED_MESSAGE: &str = "Login ID or password does not match.";

/// Errors that can occur while validating, encoding or authenticating credentials.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Input failed a format or policy rule.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Wire name of the offending field (`loginId`, `password`, ...).
        field: &'static str,
        /// Human-readable reason, safe to return to the caller.
        message: String,
    },

    /// The presented credentials were not accepted.
    ///
    /// Unit variant: it cannot carry a reason, so no caller can learn whether the
    /// login id exists.
    #[error("{}", UNAUTHENTICATED_MESSAGE)]
    Unauthenticated,

    /// The caller is authenticated but did not prove the current credential.
    #[error("Authorization failed: {message}")]
    Authorization {
        /// Description of the failed check.
        message: String,
    },

    /// The encoder could not interpret a stored credential.
    #[error("Credential format error: {message}")]
    CredentialFormat {
        /// Adapter-level description.
        message: String,
    },

    /// The requested identity does not exist.
    #[error("Not found: {message}")]
    NotFound {
        /// Description of what was missing.
        message: String,
    },

    /// The identity store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// The auth configuration is invalid.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
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
    /// Creates a new `Validation` error for `field`.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Creates a new `Authorization` error.
    #[must_use]
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
        }
    }

    /// Creates a new `CredentialFormat` error.
    #[must_use]
    pub fn credential_format(message: impl Into<String>) -> Self {
        Self::CredentialFormat {
            message: message.into(),
        }
    }

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

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
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

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::Unauthenticated
                | Self::Authorization { .. }
                | Self::NotFound { .. }
        )
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }

    /// Returns the error category for logging purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::Unauthenticated => ErrorCategory::Authentication,
            Self::Authorization { .. } => ErrorCategory::Authorization,
            Self::CredentialFormat { .. } => ErrorCategory::Credential,
            Self::NotFound { .. } => ErrorCategory::Validation,
            Self::Storage { .. } => ErrorCategory::Infrastructure,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Categories of auth errors for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed or policy-violating input.
    Validation,
    /// Credential verification failed.
    Authentication,
    /// Current-credential proof failed.
    Authorization,
    /// Stored credential could not be decoded.
    Credential,
    /// Storage errors.
    Infrastructure,
    /// Configuration errors.
    Configuration,
    /// Internal errors.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Authentication => write!(f, "authentication"),
            Self::Authorization => write!(f, "authorization"),
            Self::Credential => write!(f, "credential"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Configuration => write!(f, "configuration"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::validation("loginId", "must not be blank");
        assert_eq!(err.to_string(), "Invalid loginId: must not be blank");

        let err = AuthError::Unauthenticated;
        assert_eq!(err.to_string(), UNAUTHENTICATED_MESSAGE);

        let err = AuthError::credential_format("invalid PHC string");
        assert_eq!(
            err.to_string(),
            "Credential format error: invalid PHC string"
        );
    }

    #[test]
    fn test_error_predicates() {
        assert!(AuthError::validation("password", "x").is_client_error());
        assert!(AuthError::Unauthenticated.is_client_error());
        assert!(AuthError::authorization("x").is_client_error());
        assert!(AuthError::credential_format("x").is_server_error());
        assert!(AuthError::storage("x").is_server_error());
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            AuthError::Unauthenticated.category(),
            ErrorCategory::Authentication
        );
        assert_eq!(
            AuthError::authorization("x").category(),
            ErrorCategory::Authorization
        );
        assert_eq!(
            AuthError::credential_format("x").category(),
            ErrorCategory::Credential
        );
        assert_eq!(ErrorCategory::Infrastructure.to_string(), "infrastructure");
    }
}
