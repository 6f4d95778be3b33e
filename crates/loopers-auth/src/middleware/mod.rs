//! HTTP middleware for header authentication.
//!
//! This module provides:
//!
//! - The per-request filter that reads the credential headers on protected
//!   paths and authenticates exactly once
//! - The request-scoped [`AuthenticatedIdentity`] it attaches
//! - Envelope rendering for [`AuthError`](crate::error::AuthError)
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use loopers_auth::middleware::{AuthState, authentication_middleware};
//!
//! let auth_state = AuthState::new(authenticator, auth_config);
//!
//! let app = Router::new()
//!     .route("/api/v1/users/me", get(me))
//!     .layer(middleware::from_fn_with_state(auth_state, authentication_middleware));
//! ```

pub mod error;
pub mod filter;
pub mod types;

pub use filter::{
    AuthState, CredentialCarrier, FilterOutcome, authenticate_request, authentication_middleware,
};
pub use types::AuthenticatedIdentity;
