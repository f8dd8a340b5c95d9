//! Registration, login/logout and password reset endpoints.

use super::MessageResponse;
use crate::{
    api::{
        AppState,
        error::ApiResult,
        extract::{AuthUser, Json},
    },
    core::{
        auth::{self, NewUser},
        user::{UserProfile, get_profile},
    },
};
use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Generic answer to a forgot-password request, whether or not the email exists
pub const RESET_REQUESTED: &str =
    "If an account with that email exists, a password reset link has been sent";
/// Answer to a successful password reset
pub const RESET_DONE: &str = "Password has been reset, please log in with your new password";

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username or email
    #[serde(alias = "email", alias = "username")]
    pub login: String,
    /// Plaintext password
    pub password: String,
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// Profile of the logged-in user
    pub user: UserProfile,
}

/// Forgot-password request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    /// Email of the account
    pub email: String,
}

/// Reset-password request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    /// Token from the reset link
    pub token: String,
    /// New plaintext password
    pub password: String,
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(new): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let account = auth::register(&state.db, new, state.settings.bcrypt_cost).await?;
    let profile = get_profile(&state.db, account).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let (session, account) = auth::login(
        &state.db,
        &request.login,
        &request.password,
        state.settings.session_ttl(),
    )
    .await?;
    let user = get_profile(&state.db, account).await?;
    Ok(Json(LoginResponse {
        token: session.token,
        user,
    }))
}

/// `POST /api/auth/logout`
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> ApiResult<StatusCode> {
    auth::logout(&state.db, &user.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/auth/forgot-password`
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    auth::request_password_reset(
        &state.db,
        &request.email,
        state.settings.reset_token_ttl(),
        &state.settings.reset_link_base,
        state.delivery.as_ref(),
    )
    .await?;
    Ok(MessageResponse::new(RESET_REQUESTED))
}

/// `POST /api/auth/reset-password`
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    auth::reset_password(
        &state.db,
        &request.token,
        &request.password,
        state.settings.bcrypt_cost,
    )
    .await?;
    Ok(MessageResponse::new(RESET_DONE))
}
