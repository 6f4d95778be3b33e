use std::fmt;

use crate::AuthResult;
use crate::error::AuthError;

const FIELD: &str = "name";
const MIN_LENGTH: usize = 2;
const MAX_LENGTH: usize = 10;
const MASK: char = '*';

/// Display name: 2 to 10 characters, not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: impl Into<String>) -> AuthResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AuthError::validation(FIELD, "name must not be blank"));
        }
        let len = value.chars().count();
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&len) {
            return Err(AuthError::validation(
                FIELD,
                format!("name must be between {MIN_LENGTH} and {MAX_LENGTH} characters"),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name with its last character replaced by `*`.
    pub fn masked(&self) -> String {
        let mut chars: Vec<char> = self.0.chars().collect();
        if let Some(last) = chars.last_mut() {
            *last = MASK;
        }
        chars.into_iter().collect()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
