use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use loopers_api::{ApiError, ApiResponse};
use loopers_auth::{IdentityProfile, IdentityService, LoginUser, RawSecret, SignupCommand};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: RawSecret,
    pub new_password: RawSecret,
}

#[derive(Debug, Serialize)]
pub struct ChangePasswordResponse {
    pub message: &'static str,
}

/// Unreadable bodies get the same envelope as every other failure.
fn body_rejection(rejection: JsonRejection) -> ApiError {
    tracing::debug!(error = %rejection.body_text(), "request body rejected");
    ApiError::bad_request(rejection.body_text())
}

/// POST /api/v1/users/signup
pub async fn signup(
    State(identities): State<Arc<IdentityService>>,
    payload: Result<Json<SignupCommand>, JsonRejection>,
) -> Result<ApiResponse<IdentityProfile>, ApiError> {
    let Json(command) = payload.map_err(body_rejection)?;
    let profile = identities.signup(command).await?;
    Ok(ApiResponse::success(profile))
}

/// GET /api/v1/users/me
pub async fn me(
    State(identities): State<Arc<IdentityService>>,
    LoginUser(identity): LoginUser,
) -> Result<ApiResponse<IdentityProfile>, ApiError> {
    let profile = identities.profile(&identity.login_id).await?;
    Ok(ApiResponse::success(profile))
}

/// PATCH /api/v1/users/password
pub async fn change_password(
    State(identities): State<Arc<IdentityService>>,
    LoginUser(identity): LoginUser,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<ApiResponse<ChangePasswordResponse>, ApiError> {
    let Json(request) = payload.map_err(body_rejection)?;
    identities
        .change_credential(
            &identity.login_id,
            request.current_password,
            request.new_password,
        )
        .await?;
    Ok(ApiResponse::success(ChangePasswordResponse {
        message: "Password changed.",
    }))
}
