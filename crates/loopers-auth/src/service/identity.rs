//! Signup, profile lookup and credential change.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::AuthResult;
use crate::encoder::CredentialEncoder;
use crate::error::AuthError;
use crate::identity::IdentityRecord;
use crate::storage::IdentityStorage;
use crate::types::{BirthDate, LoginId, RawSecret};

use super::run_blocking;

/// Input for [`IdentityService::signup`], shaped like the signup request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupCommand {
    pub login_id: String,
    pub password: RawSecret,
    pub name: String,
    /// `YYYYMMDD`.
    pub birth_date: String,
    pub email: String,
}

/// Outward-facing view of an identity. Never carries the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProfile {
    pub id: i64,
    pub login_id: String,
    /// Display name with its last character masked.
    pub name: String,
    pub birth_date: String,
    pub email: String,
}

impl IdentityProfile {
    fn from_record(record: &IdentityRecord) -> AuthResult<Self> {
        let id = record
            .id()
            .ok_or_else(|| AuthError::internal("stored identity record has no id"))?;
        Ok(Self {
            id,
            login_id: record.login_id().to_string(),
            name: record.name().masked(),
            birth_date: record.birth_date().to_compact_string(),
            email: record.email().to_string(),
        })
    }
}

/// Domain service owning the identity lifecycle.
#[derive(Clone)]
pub struct IdentityService {
    storage: Arc<dyn IdentityStorage>,
    encoder: Arc<dyn CredentialEncoder>,
}

impl IdentityService {
    pub fn new(storage: Arc<dyn IdentityStorage>, encoder: Arc<dyn CredentialEncoder>) -> Self {
        Self { storage, encoder }
    }

    /// Registers a new identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` naming the first invalid field, including
    /// `loginId` when the login id is already registered.
    pub async fn signup(&self, command: SignupCommand) -> AuthResult<IdentityProfile> {
        let login_id = LoginId::new(command.login_id.as_str())?;
        if self.storage.exists_by_login_id(&login_id).await? {
            return Err(AuthError::validation("loginId", "login id already exists"));
        }
        let birth_date = BirthDate::parse_date(&command.birth_date)?;

        let encoder = Arc::clone(&self.encoder);
        let record = run_blocking(move || {
            IdentityRecord::create(
                &command.login_id,
                &command.password,
                &command.name,
                birth_date,
                &command.email,
                encoder.as_ref(),
            )
        })
        .await?;

        let saved = self.storage.save(record).await?;
        tracing::info!(login_id = %saved.login_id(), id = ?saved.id(), "identity registered");
        IdentityProfile::from_record(&saved)
    }

    /// Looks up the profile of `login_id`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if no record exists.
    pub async fn profile(&self, login_id: &LoginId) -> AuthResult<IdentityProfile> {
        let record = self.load(login_id).await?;
        IdentityProfile::from_record(&record)
    }

    /// Replaces the credential of `login_id`.
    ///
    /// # Errors
    ///
    /// - `AuthError::NotFound` if no record exists
    /// - `AuthError::Authorization` if `current` does not match
    /// - `AuthError::Validation` if `new` is a no-op or violates the password policy
    pub async fn change_credential(
        &self,
        login_id: &LoginId,
        current: RawSecret,
        new: RawSecret,
    ) -> AuthResult<()> {
        let mut record = self.load(login_id).await?;

        let encoder = Arc::clone(&self.encoder);
        let record = run_blocking(move || {
            record.change_credential(&current, &new, encoder.as_ref())?;
            Ok(record)
        })
        .await?;

        self.storage.save(record).await?;
        tracing::info!(login_id = %login_id, "credential changed");
        Ok(())
    }

    async fn load(&self, login_id: &LoginId) -> AuthResult<IdentityRecord> {
        self.storage
            .find_by_login_id(login_id)
            .await?
            .ok_or_else(|| AuthError::not_found(format!("user '{login_id}' not found")))
    }
}

impl std::fmt::Debug for IdentityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityService").finish_non_exhaustive()
    }
}
