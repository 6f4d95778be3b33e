//! Credential encoding capability and its Argon2id adapter.
//!
//! Encoded credentials use the PHC string format, so cost parameters travel
//! with each stored value and verification keeps working after the configured
//! cost changes.
//!
//! # Example
//!
//! ```
//! use loopers_auth::encoder::{Argon2CredentialEncoder, CredentialEncoder};
//! use loopers_auth::types::RawSecret;
//!
//! let encoder = Argon2CredentialEncoder::default();
//! let raw = RawSecret::new("Test1234!@#");
//!
//! let encoded = encoder.encode(&raw).unwrap();
//! assert!(encoded.as_str().starts_with("$argon2id$"));
//! assert!(encoder.matches(&raw, &encoded).unwrap());
//! ```

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::AuthResult;
use crate::config::HashingConfig;
use crate::error::AuthError;
use crate::types::{EncodedCredential, RawSecret};

/// Turns raw secrets into stored credentials and checks them back.
pub trait CredentialEncoder: Send + Sync {
    /// Encodes `raw`. Salted adapters return a different string on every call.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Internal` if the adapter fails to hash.
    fn encode(&self, raw: &RawSecret) -> AuthResult<EncodedCredential>;

    /// Returns `true` iff `raw` produced `encoded`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CredentialFormat` when `encoded` cannot be parsed.
    fn matches(&self, raw: &RawSecret, encoded: &EncodedCredential) -> AuthResult<bool>;
}

/// Argon2id adapter producing PHC strings.
#[derive(Clone)]
pub struct Argon2CredentialEncoder {
    hasher: Argon2<'static>,
}

impl Argon2CredentialEncoder {
    /// Builds an encoder with explicit cost parameters.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if Argon2 rejects the parameters.
    pub fn with_params(config: &HashingConfig) -> AuthResult<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AuthError::configuration(format!("invalid argon2 parameters: {e}")))?;
        Ok(Self {
            hasher: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2CredentialEncoder {
    fn default() -> Self {
        Self {
            hasher: Argon2::default(),
        }
    }
}

impl std::fmt::Debug for Argon2CredentialEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2CredentialEncoder").finish_non_exhaustive()
    }
}

impl CredentialEncoder for Argon2CredentialEncoder {
    fn encode(&self, raw: &RawSecret) -> AuthResult<EncodedCredential> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .hasher
            .hash_password(raw.expose().as_bytes(), &salt)
            .map_err(|e| AuthError::internal(format!("failed to encode credential: {e}")))?;
        Ok(EncodedCredential::from_encoded(hash.to_string()))
    }

    fn matches(&self, raw: &RawSecret, encoded: &EncodedCredential) -> AuthResult<bool> {
        let parsed = PasswordHash::new(encoded.as_str())
            .map_err(|e| AuthError::credential_format(e.to_string()))?;
        Ok(self
            .hasher
            .verify_password(raw.expose().as_bytes(), &parsed)
            .is_ok())
    }
}
