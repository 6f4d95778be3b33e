//! Authentication and identity services.
//!
//! Both services hold their collaborators as `Arc<dyn ..>` so the HTTP layer,
//! tests and alternative stores can inject their own.

pub mod authentication;
pub mod identity;

pub use authentication::AuthenticationService;
pub use identity::{IdentityProfile, IdentityService, SignupCommand};

use crate::AuthResult;
use crate::error::AuthError;

/// Runs CPU-bound credential work off the async executor.
pub(crate) async fn run_blocking<T, F>(work: F) -> AuthResult<T>
where
    F: FnOnce() -> AuthResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AuthError::internal(format!("credential task failed: {e}")))?
}
