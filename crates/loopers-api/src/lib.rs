//! # loopers-api
//!
//! Wire-level response types shared by every HTTP surface of the Loopers
//! commerce API.
//!
//! Every response body, successful or not, is wrapped in the same envelope:
//!
//! ```json
//! { "meta": { "result": "FAIL", "errorCode": "UNAUTHORIZED", "message": "..." }, "data": null }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// -------------------------
// Envelope
// -------------------------

/// Outcome marker carried in every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultKind {
    Success,
    Fail,
}

/// Envelope metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub result: ResultKind,
    pub error_code: Option<String>,
    pub message: Option<String>,
}

impl Meta {
    pub fn success() -> Self {
        Self {
            result: ResultKind::Success,
            error_code: None,
            message: None,
        }
    }

    pub fn fail(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            result: ResultKind::Fail,
            error_code: Some(error_code.into()),
            message: Some(message.into()),
        }
    }
}

/// The response envelope: `{ meta, data }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub meta: Meta,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            meta: Meta::success(),
            data: Some(data),
        }
    }
}

impl ApiResponse<serde_json::Value> {
    /// Failure envelope with `data: null`.
    pub fn fail(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            meta: Meta::fail(error_type.code(), message),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// A single field-level validation failure.
///
/// The rejected value is deliberately not echoed back: it may be a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

// -------------------------
// Error codes
// -------------------------

/// Error classes exposed through `meta.errorCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    InternalError,
}

impl ErrorType {
    pub fn code(self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Default message used when no more specific text applies.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::BadRequest => "The request is invalid.",
            Self::Unauthorized => "Authentication is required.",
            Self::Forbidden => "The operation is not permitted.",
            Self::NotFound => "The requested resource does not exist.",
            Self::InternalError => "An unexpected error occurred.",
        }
    }
}

// -------------------------
// API errors
// -------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        field_errors: Vec<FieldError>,
    },
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest {
            message: msg.into(),
            field_errors: Vec::new(),
        }
    }

    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::BadRequest {
            message: reason.clone(),
            field_errors: vec![FieldError {
                field: field.into(),
                reason,
            }],
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            ApiError::BadRequest { .. } => ErrorType::BadRequest,
            ApiError::Unauthorized(_) => ErrorType::Unauthorized,
            ApiError::Forbidden(_) => ErrorType::Forbidden,
            ApiError::NotFound(_) => ErrorType::NotFound,
            ApiError::Internal => ErrorType::InternalError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.error_type().status()
    }

    /// Builds the failure envelope for this error.
    pub fn to_envelope(&self) -> ApiResponse<serde_json::Value> {
        let error_type = self.error_type();
        match self {
            ApiError::BadRequest {
                message,
                field_errors,
            } => {
                let data = if field_errors.is_empty() {
                    None
                } else {
                    serde_json::to_value(field_errors).ok()
                };
                ApiResponse {
                    meta: Meta::fail(error_type.code(), message.clone()),
                    data,
                }
            }
            ApiError::Unauthorized(msg) | ApiError::Forbidden(msg) | ApiError::NotFound(msg) => {
                ApiResponse::<serde_json::Value>::fail(error_type, msg.clone())
            }
            // Internal details never leave the process.
            ApiError::Internal => {
                ApiResponse::<serde_json::Value>::fail(error_type, error_type.default_message())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_envelope())).into_response()
    }
}
