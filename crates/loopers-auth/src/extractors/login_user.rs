//! Authenticated identity extractor.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AuthError;
use crate::middleware::AuthenticatedIdentity;

/// The identity attached by the authentication filter.
///
/// Rejects with the uniform 401 when no identity is attached. That only happens
/// when a handler is mounted outside the filter's protected paths, which is a
/// wiring error and is logged as such.
#[derive(Debug, Clone)]
pub struct LoginUser(pub AuthenticatedIdentity);

impl<S> FromRequestParts<S> for LoginUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthenticatedIdentity>() {
            Some(identity) => Ok(Self(identity.clone())),
            None => {
                tracing::error!(
                    path = %parts.uri.path(),
                    "LoginUser extracted on a request the authentication filter did not pass"
                );
                Err(AuthError::Unauthenticated)
            }
        }
    }
}
