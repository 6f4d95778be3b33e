//! Error response handling for authentication.
//!
//! `AuthError` renders as the shared `{meta, data}` envelope. Server-side
//! failures are logged here and leave the process as a generic 500.

use axum::response::{IntoResponse, Response};
use loopers_api::ApiError;

use crate::error::{AuthError, UNAUTHENTICATED_MESSAGE};

// =============================================================================
// Conversions
// =============================================================================

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Validation { field, message } => ApiError::invalid_field(field, message),
            AuthError::Unauthenticated => ApiError::unauthorized(UNAUTHENTICATED_MESSAGE),
            AuthError::Authorization { message } => ApiError::forbidden(message),
            AuthError::NotFound { message } => ApiError::not_found(message),
            AuthError::CredentialFormat { .. }
            | AuthError::Storage { .. }
            | AuthError::Configuration { .. }
            | AuthError::Internal { .. } => {
                tracing::error!(category = %error.category(), error = %error, "auth request failed");
                ApiError::Internal
            }
        }
    }
}

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
