//! Raw and encoded credential forms.
//!
//! A [`RawSecret`] lives only for the duration of one operation. It has no
//! `Display` or `Serialize` impl and its `Debug` output is redacted, so it
//! cannot reach a log line or a response body by accident.
//!
//! An [`EncodedCredential`] is the only form ever persisted. It is produced by a
//! [`CredentialEncoder`](crate::encoder::CredentialEncoder) or rehydrated from
//! storage through [`EncodedCredential::from_encoded`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::AuthResult;
use crate::error::AuthError;
use crate::types::BirthDate;

/// Punctuation accepted in a password; at least one is required.
pub const PASSWORD_SPECIAL_CHARS: &str = "~!@#$%^&*()_+=-";

const FIELD: &str = "password";

static ALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9~!@#$%^&*()_+=\-]{8,16}$").expect("valid password regex")
});

const FORMAT_MESSAGE: &str =
    "password must be 8 to 16 characters mixing upper and lower case letters, digits and symbols";

/// Plaintext password supplied by a caller.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RawSecret(String);

impl RawSecret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrows the plaintext. Only encoders should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Checks the password format rule.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` on field `password` when the value is
    /// blank, outside 8..=16 characters, uses a character outside the allowed
    /// set, or misses one of the required character classes.
    pub fn validate_format(&self) -> AuthResult<()> {
        if self.is_blank() {
            return Err(AuthError::validation(FIELD, "password must not be blank"));
        }
        let value = self.0.as_str();
        let complete = ALLOWED.is_match(value)
            && value.chars().any(|c| c.is_ascii_lowercase())
            && value.chars().any(|c| c.is_ascii_uppercase())
            && value.chars().any(|c| c.is_ascii_digit())
            && value.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));
        if !complete {
            return Err(AuthError::validation(FIELD, FORMAT_MESSAGE));
        }
        Ok(())
    }

    /// Rejects a password containing the `YYYYMMDD` form of `birth_date`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` on field `password`.
    pub fn ensure_excludes_birth_date(&self, birth_date: &BirthDate) -> AuthResult<()> {
        if self.0.contains(&birth_date.to_compact_string()) {
            return Err(AuthError::validation(
                FIELD,
                "password must not contain the birth date",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for RawSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawSecret(***)")
    }
}

/// Opaque encoder output; never built by formatting a raw secret.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedCredential(String);

impl EncodedCredential {
    /// Wraps an already-encoded value loaded from storage or produced by an encoder.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EncodedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncodedCredential(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_valid_formats() {
        for value in ["Test1234!@#", "NewPass123!@", "aB3~aaaa", "Zz9=Zz9=Zz9=Zz9="] {
            assert!(
                RawSecret::new(value).validate_format().is_ok(),
                "{value} should be accepted"
            );
        }
    }

    #[test]
    fn test_invalid_formats() {
        let cases = [
            "",
            "        ",
            "Ab1!",              // too short
            "Abcdefgh12345!@#x", // too long
            "test1234!@#",       // no upper
            "TEST1234!@#",       // no lower
            "TestTest!@#",       // no digit
            "Test12345678",      // no symbol
            "Test 1234!@#",      // space
            "Test1234!@#?",      // `?` is not in the symbol set
            "Tést1234!@#",       // non-ascii
        ];
        for value in cases {
            let err = RawSecret::new(value).validate_format().unwrap_err();
            assert!(
                matches!(err, AuthError::Validation { field: "password", .. }),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_birth_date_exclusion() {
        let birth_date = BirthDate::new_as_of(date!(1990 - 01 - 15), date!(2024 - 01 - 01)).unwrap();

        assert!(RawSecret::new("Test1234!@#").ensure_excludes_birth_date(&birth_date).is_ok());
        assert!(RawSecret::new("Ab!19900115").ensure_excludes_birth_date(&birth_date).is_err());
        // Partial overlap is allowed.
        assert!(RawSecret::new("Ab!1990011x").ensure_excludes_birth_date(&birth_date).is_ok());
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = RawSecret::new("Test1234!@#");
        assert!(!format!("{secret:?}").contains("Test1234"));

        let encoded = EncodedCredential::from_encoded("$argon2id$v=19$...");
        assert!(!format!("{encoded:?}").contains("argon2id"));
    }

    #[test]
    fn test_deserialize_transparent() {
        let secret: RawSecret = serde_json::from_str("\"Test1234!@#\"").unwrap();
        assert_eq!(secret.expose(), "Test1234!@#");
    }
}
