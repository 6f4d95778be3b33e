use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::AuthResult;
use crate::error::AuthError;

const FIELD: &str = "email";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@([A-Za-z0-9-]+\.)+[A-Za-z]{2,}$").expect("valid email regex")
});

/// Contact e-mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> AuthResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AuthError::validation(FIELD, "email must not be blank"));
        }
        if !EMAIL.is_match(&value) {
            return Err(AuthError::validation(FIELD, "email format is invalid"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        for value in ["test@example.com", "a.b+c@mail.example.co.kr", "x_y-z@d-1.io"] {
            assert_eq!(Email::new(value).unwrap().as_str(), value);
        }
    }

    #[test]
    fn test_invalid_addresses() {
        for value in ["", "plain", "no-at.example.com", "user@", "user@example", "user@example.c", "us er@example.com"] {
            let err = Email::new(value).unwrap_err();
            assert!(
                matches!(err, AuthError::Validation { field: "email", .. }),
                "{value} should be rejected"
            );
        }
    }
}
