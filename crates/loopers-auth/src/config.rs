//! Authentication configuration.
//!
//! # Example (TOML)
//!
//! ```toml
//! [auth]
//! protected_paths = ["/api/v1/users/me", "/api/v1/users/password"]
//!
//! [auth.headers]
//! login_id = "X-Loopers-LoginId"
//! password = "X-Loopers-LoginPw"
//!
//! [auth.hashing]
//! memory_kib = 19456
//! iterations = 2
//! parallelism = 1
//! ```

use serde::{Deserialize, Serialize};

/// Root authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Request paths that require header authentication (exact match).
    pub protected_paths: Vec<String>,

    /// Names of the credential headers.
    pub headers: HeaderConfig,

    /// Argon2 cost parameters for newly encoded credentials.
    pub hashing: HashingConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            protected_paths: vec![
                "/api/v1/users/me".to_string(),
                "/api/v1/users/password".to_string(),
            ],
            headers: HeaderConfig::default(),
            hashing: HashingConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Returns `true` if `path` requires authentication.
    #[must_use]
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_paths.iter().any(|p| p == path)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in &self.protected_paths {
            if !path.starts_with('/') {
                return Err(ConfigError::invalid_value(
                    "protected_paths",
                    format!("'{path}' must start with '/'"),
                ));
            }
        }
        self.headers.validate()?;
        self.hashing.validate()?;
        Ok(())
    }
}

/// Credential header names. Lookups are case-insensitive.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Header carrying the login id.
    pub login_id: String,

    /// Header carrying the raw password.
    pub password: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            login_id: "X-Loopers-LoginId".to_string(),
            password: "X-Loopers-LoginPw".to_string(),
        }
    }
}

impl HeaderConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.login_id.trim().is_empty() {
            return Err(ConfigError::missing_field("headers.login_id"));
        }
        if self.password.trim().is_empty() {
            return Err(ConfigError::missing_field("headers.password"));
        }
        if self.login_id.eq_ignore_ascii_case(&self.password) {
            return Err(ConfigError::invalid_value(
                "headers",
                "login_id and password headers must differ",
            ));
        }
        Ok(())
    }
}

/// Argon2id cost parameters.
///
/// Defaults follow the OWASP baseline (19 MiB, 2 passes, 1 lane).
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct HashingConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,

    /// Number of passes.
    pub iterations: u32,

    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl HashingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::invalid_value(
                "hashing.iterations",
                "must be > 0",
            ));
        }
        if self.parallelism == 0 {
            return Err(ConfigError::invalid_value(
                "hashing.parallelism",
                "must be > 0",
            ));
        }
        // Argon2 requires at least 8 KiB per lane.
        if self.memory_kib < 8 * self.parallelism {
            return Err(ConfigError::invalid_value(
                "hashing.memory_kib",
                "must be at least 8 * parallelism",
            ));
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// A required field is missing or empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },

    /// A field has an invalid value.
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        /// Name of the field.
        field: String,
        /// Why the value is invalid.
        message: String,
    },
}

impl ConfigError {
    /// Creates a `MissingField` error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an `InvalidValue` error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
