//! Header authentication filter.
//!
//! Each request starts unchecked and ends in exactly one of three states:
//!
//! - [`FilterOutcome::Bypassed`] - the path is not protected; nothing is read
//! - [`FilterOutcome::Authenticated`] - the identity is attached to the request
//! - [`FilterOutcome::Rejected`] - the chain must not continue
//!
//! Missing headers, blank headers and rejected credentials all produce the same
//! [`AuthError::Unauthenticated`].

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::service::AuthenticationService;
use crate::types::RawSecret;

use super::types::AuthenticatedIdentity;

// =============================================================================
// Auth State
// =============================================================================

/// State required by the authentication filter.
#[derive(Clone)]
pub struct AuthState {
    /// Verifies credentials against the identity store.
    pub authenticator: Arc<AuthenticationService>,

    /// Protected paths and header names.
    pub config: Arc<AuthConfig>,
}

impl AuthState {
    /// Creates a new auth state.
    pub fn new(authenticator: Arc<AuthenticationService>, config: Arc<AuthConfig>) -> Self {
        Self {
            authenticator,
            config,
        }
    }
}

// =============================================================================
// Credential Carrier
// =============================================================================

/// The parts of an inbound request the filter needs.
pub trait CredentialCarrier {
    /// Request path without the query string.
    fn path(&self) -> &str;

    /// Value of header `name` (case-insensitive). `None` if absent or not visible ASCII.
    fn header(&self, name: &str) -> Option<&str>;

    /// Makes `identity` visible to everything downstream.
    fn attach(&mut self, identity: AuthenticatedIdentity);
}

impl<B> CredentialCarrier for axum::http::Request<B> {
    fn path(&self) -> &str {
        self.uri().path()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(|v| v.to_str().ok())
    }

    fn attach(&mut self, identity: AuthenticatedIdentity) {
        self.extensions_mut().insert(identity);
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Result of running the filter on one request.
#[derive(Debug)]
pub enum FilterOutcome {
    /// The path is not protected.
    Bypassed,
    /// Credentials verified and the identity attached.
    Authenticated,
    /// The request must be answered with this error.
    Rejected(AuthError),
}

/// Runs the filter against `carrier`.
pub async fn authenticate_request<C>(state: &AuthState, carrier: &mut C) -> FilterOutcome
where
    C: CredentialCarrier + ?Sized,
{
    if !state.config.is_protected(carrier.path()) {
        return FilterOutcome::Bypassed;
    }

    let headers = &state.config.headers;
    let login_id = non_blank(carrier.header(&headers.login_id));
    let password = non_blank(carrier.header(&headers.password));
    let (Some(login_id), Some(password)) = (login_id, password) else {
        tracing::debug!(path = %carrier.path(), "credential headers missing");
        return FilterOutcome::Rejected(AuthError::Unauthenticated);
    };

    let login_id = login_id.to_owned();
    let password = RawSecret::new(password);
    match state.authenticator.authenticate(&login_id, &password).await {
        Ok(identity) => {
            tracing::debug!(login_id = %identity.login_id, path = %carrier.path(), "request authenticated");
            carrier.attach(identity);
            FilterOutcome::Authenticated
        }
        Err(e) => FilterOutcome::Rejected(e),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Axum middleware wrapping [`authenticate_request`].
///
/// Install with `axum::middleware::from_fn_with_state`.
pub async fn authentication_middleware(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match authenticate_request(&state, &mut request).await {
        FilterOutcome::Bypassed | FilterOutcome::Authenticated => next.run(request).await,
        FilterOutcome::Rejected(err) => err.into_response(),
    }
}
