//! Credential verification for incoming requests.

use std::sync::Arc;

use crate::AuthResult;
use crate::encoder::CredentialEncoder;
use crate::error::AuthError;
use crate::middleware::AuthenticatedIdentity;
use crate::storage::IdentityStorage;
use crate::types::{LoginId, RawSecret};

use super::run_blocking;

/// Verifies presented credentials against stored identity records.
///
/// Every rejection is [`AuthError::Unauthenticated`]: a malformed login id, an
/// unknown login id and a wrong password are indistinguishable to the caller.
#[derive(Clone)]
pub struct AuthenticationService {
    storage: Arc<dyn IdentityStorage>,
    encoder: Arc<dyn CredentialEncoder>,
}

impl AuthenticationService {
    pub fn new(storage: Arc<dyn IdentityStorage>, encoder: Arc<dyn CredentialEncoder>) -> Self {
        Self { storage, encoder }
    }

    /// Authenticates a login id / raw password pair.
    ///
    /// # Errors
    ///
    /// - `AuthError::Unauthenticated` if the credentials are not accepted
    /// - `AuthError::CredentialFormat` if the stored credential is unreadable
    /// - storage errors unchanged
    pub async fn authenticate(
        &self,
        login_id: &str,
        raw: &RawSecret,
    ) -> AuthResult<AuthenticatedIdentity> {
        let Ok(login_id) = LoginId::new(login_id) else {
            tracing::debug!("rejecting malformed login id");
            return Err(AuthError::Unauthenticated);
        };

        let Some(record) = self.storage.find_by_login_id(&login_id).await? else {
            tracing::debug!(login_id = %login_id, "authentication failed");
            return Err(AuthError::Unauthenticated);
        };

        let encoder = Arc::clone(&self.encoder);
        let raw = raw.clone();
        let credential = record.credential().clone();
        let matched = run_blocking(move || encoder.matches(&raw, &credential))
            .await
            .inspect_err(|e| {
                if matches!(e, AuthError::CredentialFormat { .. }) {
                    tracing::error!(login_id = %login_id, error = %e, "stored credential is unreadable");
                }
            })?;

        if !matched {
            tracing::debug!(login_id = %login_id, "authentication failed");
            return Err(AuthError::Unauthenticated);
        }

        let id = record
            .id()
            .ok_or_else(|| AuthError::internal("stored identity record has no id"))?;

        Ok(AuthenticatedIdentity {
            id,
            login_id,
            name: record.name().clone(),
        })
    }
}

impl std::fmt::Debug for AuthenticationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationService").finish_non_exhaustive()
    }
}
