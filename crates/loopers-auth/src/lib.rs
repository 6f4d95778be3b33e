//! # loopers-auth
//!
//! Credential and request-authentication subsystem for the Loopers commerce API.
//!
//! This crate provides:
//! - Credential value objects (login id, birth date, display name, email, raw secret)
//! - The credential encoding capability and its Argon2 adapter
//! - The identity record aggregate and its password policy
//! - Authentication and identity services over an injected store
//! - A per-request header authentication filter and the identity extractor
//!
//! ## Overview
//!
//! Authentication is stateless: every request to a protected path carries the
//! login id and the raw password in two headers and is re-authenticated from
//! scratch. There are no sessions and no tokens.
//!
//! ## Modules
//!
//! - [`config`] - Protected paths, header names and hashing cost
//! - [`types`] - Validated value objects
//! - [`encoder`] - Credential encoding capability and the Argon2 adapter
//! - [`identity`] - The identity record aggregate
//! - [`storage`] - Storage trait for identity records
//! - [`service`] - Authentication and identity services
//! - [`middleware`] - Request authentication filter
//! - [`extractors`] - Axum extractor for the authenticated identity

pub mod config;
pub mod encoder;
pub mod error;
pub mod extractors;
pub mod identity;
pub mod middleware;
pub mod service;
pub mod storage;
pub mod types;

pub use config::{AuthConfig, ConfigError, HashingConfig, HeaderConfig};
pub use encoder::{Argon2CredentialEncoder, CredentialEncoder};
pub use error::{AuthError, ErrorCategory};
pub use extractors::LoginUser;
pub use identity::IdentityRecord;
pub use middleware::{
    AuthState, AuthenticatedIdentity, CredentialCarrier, FilterOutcome, authenticate_request,
    authentication_middleware,
};
pub use service::{
    AuthenticationService, IdentityProfile, IdentityService, SignupCommand,
};
pub use storage::IdentityStorage;
pub use types::{BirthDate, DisplayName, Email, EncodedCredential, LoginId, RawSecret};

/// Type alias for authentication results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use loopers_auth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::AuthResult;
    pub use crate::config::{AuthConfig, ConfigError, HashingConfig, HeaderConfig};
    pub use crate::encoder::{Argon2CredentialEncoder, CredentialEncoder};
    pub use crate::error::{AuthError, ErrorCategory};
    pub use crate::extractors::LoginUser;
    pub use crate::identity::IdentityRecord;
    pub use crate::middleware::{AuthState, AuthenticatedIdentity, authentication_middleware};
    pub use crate::service::{
        AuthenticationService, IdentityProfile, IdentityService, SignupCommand,
    };
    pub use crate::storage::IdentityStorage;
    pub use crate::types::{BirthDate, DisplayName, Email, EncodedCredential, LoginId, RawSecret};
}
