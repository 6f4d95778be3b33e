//! Identity storage trait.

use async_trait::async_trait;

use crate::AuthResult;
use crate::identity::IdentityRecord;
use crate::types::LoginId;

// =============================================================================
// Identity Storage Trait
// =============================================================================

/// Persistence for identity records.
///
/// Login id uniqueness and atomic credential replacement are the store's
/// responsibility; callers never lock.
///
/// # Example
///
/// ```ignore
/// use loopers_auth::storage::IdentityStorage;
///
/// async fn example(storage: &impl IdentityStorage, login_id: &LoginId) {
///     if let Some(record) = storage.find_by_login_id(login_id).await? {
///         println!("Found user: {}", record.name());
///     }
/// }
/// ```
#[async_trait]
pub trait IdentityStorage: Send + Sync {
    /// Inserts or replaces a record.
    ///
    /// A record without an id is inserted and returned with its assigned id.
    /// A record with an id replaces the stored record with that id.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` on field `loginId` if another record
    /// already uses the login id, or a storage error.
    async fn save(&self, record: IdentityRecord) -> AuthResult<IdentityRecord>;

    /// Finds a record by login id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_login_id(&self, login_id: &LoginId) -> AuthResult<Option<IdentityRecord>>;

    /// Returns `true` if a record with `login_id` exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn exists_by_login_id(&self, login_id: &LoginId) -> AuthResult<bool> {
        Ok(self.find_by_login_id(login_id).await?.is_some())
    }
}
