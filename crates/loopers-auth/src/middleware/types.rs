//! Request-scoped authentication context.

use crate::types::{DisplayName, LoginId};

/// Identity attached to a request after a successful filter pass.
///
/// A projection of the stored record that deliberately excludes the credential.
/// It lives only as long as the request it was attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    /// Storage id of the identity record.
    pub id: i64,

    /// Login id the caller authenticated with.
    pub login_id: LoginId,

    /// Unmasked display name.
    pub name: DisplayName,
}
