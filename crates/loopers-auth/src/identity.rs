//! The identity record aggregate.
//!
//! An [`IdentityRecord`] owns exactly one [`EncodedCredential`]. Raw secrets pass
//! through it only on the way to the encoder, and every path that assigns a
//! credential runs the password policy first.

use time::Date;

use crate::AuthResult;
use crate::encoder::CredentialEncoder;
use crate::error::AuthError;
use crate::types::{BirthDate, DisplayName, Email, EncodedCredential, LoginId, RawSecret};

/// A registered user and their stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    id: Option<i64>,
    login_id: LoginId,
    credential: EncodedCredential,
    name: DisplayName,
    birth_date: BirthDate,
    email: Email,
}

impl IdentityRecord {
    /// Validates every field, applies the password policy and encodes the secret.
    ///
    /// Fields are checked in the order `loginId`, `name`, `birthDate`, `email`,
    /// followed by the password format and the birth-date exclusion. The first
    /// failure is returned.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` naming the first invalid field, or the
    /// encoder's error if encoding fails.
    pub fn create(
        login_id: &str,
        raw: &RawSecret,
        name: &str,
        birth_date: Date,
        email: &str,
        encoder: &dyn CredentialEncoder,
    ) -> AuthResult<Self> {
        let login_id = LoginId::new(login_id)?;
        let name = DisplayName::new(name)?;
        let birth_date = BirthDate::new(birth_date)?;
        let email = Email::new(email)?;

        raw.validate_format()?;
        raw.ensure_excludes_birth_date(&birth_date)?;
        let credential = encoder.encode(raw)?;

        Ok(Self {
            id: None,
            login_id,
            credential,
            name,
            birth_date,
            email,
        })
    }

    /// Rebuilds a record from already-validated stored parts.
    pub fn restore(
        id: i64,
        login_id: LoginId,
        credential: EncodedCredential,
        name: DisplayName,
        birth_date: BirthDate,
        email: Email,
    ) -> Self {
        Self {
            id: Some(id),
            login_id,
            credential,
            name,
            birth_date,
            email,
        }
    }

    /// Returns the record with its storage id assigned.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Replaces the stored credential.
    ///
    /// Checks run in order and the first violation is reported:
    /// 1. `current` must match the stored credential (`Authorization`).
    /// 2. `new` must not match the stored credential (`Validation`).
    /// 3. `new` must satisfy the format rule and exclude the birth date (`Validation`).
    ///
    /// # Errors
    ///
    /// See above; encoder errors propagate unchanged.
    pub fn change_credential(
        &mut self,
        current: &RawSecret,
        new: &RawSecret,
        encoder: &dyn CredentialEncoder,
    ) -> AuthResult<()> {
        if !encoder.matches(current, &self.credential)? {
            return Err(AuthError::authorization("current password does not match"));
        }
        if encoder.matches(new, &self.credential)? {
            return Err(AuthError::validation(
                "password",
                "new password must differ from the current password",
            ));
        }
        new.validate_format()?;
        new.ensure_excludes_birth_date(&self.birth_date)?;

        self.credential = encoder.encode(new)?;
        Ok(())
    }

    /// Verifies `raw` against the stored credential.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CredentialFormat` if the stored value is unreadable.
    pub fn verify(&self, raw: &RawSecret, encoder: &dyn CredentialEncoder) -> AuthResult<bool> {
        encoder.matches(raw, &self.credential)
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn login_id(&self) -> &LoginId {
        &self.login_id
    }

    pub fn credential(&self) -> &EncodedCredential {
        &self.credential
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    pub fn birth_date(&self) -> &BirthDate {
        &self.birth_date
    }

    pub fn email(&self) -> &Email {
        &self.email
    }
}
