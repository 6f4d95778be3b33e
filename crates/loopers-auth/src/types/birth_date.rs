use std::fmt;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::AuthResult;
use crate::error::AuthError;

const FIELD: &str = "birthDate";

/// Compact `YYYYMMDD` representation used on the wire and in password policy.
const COMPACT_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year][month][day]");

/// Date of birth. Never in the future relative to the current UTC date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BirthDate(Date);

impl BirthDate {
    /// Validates a date of birth against today's UTC date.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` on field `birthDate` if the date is in the future.
    pub fn new(date: Date) -> AuthResult<Self> {
        Self::new_as_of(date, OffsetDateTime::now_utc().date())
    }

    /// Validates a date of birth against an explicit `today`.
    ///
    /// Today itself is accepted; any later day is rejected.
    pub fn new_as_of(date: Date, today: Date) -> AuthResult<Self> {
        if date > today {
            return Err(AuthError::validation(
                FIELD,
                "birth date must not be in the future",
            ));
        }
        Ok(Self(date))
    }

    /// Parses a compact `YYYYMMDD` string and validates it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` on field `birthDate` if the string is blank,
    /// not exactly eight digits, not a calendar date, or in the future.
    pub fn parse(value: &str) -> AuthResult<Self> {
        Self::new(Self::parse_date(value)?)
    }

    /// Parses a compact `YYYYMMDD` string without the future-date check.
    pub fn parse_date(value: &str) -> AuthResult<Date> {
        if value.trim().is_empty() {
            return Err(AuthError::validation(FIELD, "birth date is required"));
        }
        if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AuthError::validation(
                FIELD,
                "birth date must be formatted as YYYYMMDD",
            ));
        }
        Date::parse(value, COMPACT_FORMAT)
            .map_err(|_| AuthError::validation(FIELD, "birth date is not a valid calendar date"))
    }

    pub fn date(&self) -> Date {
        self.0
    }

    /// Eight-digit `YYYYMMDD` form, e.g. `19900115`.
    pub fn to_compact_string(&self) -> String {
        format!(
            "{:04}{:02}{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_compact_string())
    }
}
