use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::AuthResult;
use crate::error::AuthError;

const FIELD: &str = "loginId";
const MIN_LENGTH: usize = 4;
const MAX_LENGTH: usize = 12;

static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid login id regex"));

/// Public login identifier: 4 to 12 ASCII letters or digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoginId(String);

impl LoginId {
    /// Validates and wraps a login id.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` on field `loginId` if the value is blank,
    /// outside 4..=12 characters, or not alphanumeric.
    pub fn new(value: impl Into<String>) -> AuthResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AuthError::validation(FIELD, "login id must not be blank"));
        }
        let len = value.chars().count();
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&len) {
            return Err(AuthError::validation(
                FIELD,
                format!("login id must be between {MIN_LENGTH} and {MAX_LENGTH} characters"),
            ));
        }
        if !ALPHANUMERIC.is_match(&value) {
            return Err(AuthError::validation(
                FIELD,
                "login id may contain only letters and digits",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LoginId {
    type Error = AuthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LoginId> for String {
    fn from(value: LoginId) -> Self {
        value.0
    }
}
