//! Request extractors.
//!
//! [`AuthUser`] and [`AdminUser`] read an `Authorization: Bearer <token>`
//! header and resolve it to a session through `core::auth`. [`AdminUser`]
//! additionally requires the admin role. [`Json`] and [`Path`] wrap axum's
//! extractors so a malformed body or path answers with the usual
//! `{"message": ...}` error body.

use super::{AppState, error::ApiError};
use crate::{
    core::auth,
    entities::{Role, user},
    errors::Error,
};
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON request body or response
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Path parameters
#[derive(Debug, Clone, Copy, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

/// The account behind a valid bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Authenticated account
    pub account: user::Model,
    /// The token the request carried
    pub token: String,
}

/// An authenticated account with the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

/// Extracts the token from an `Authorization: Bearer` header.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| Error::Unauthorized {
            message: "Missing bearer token".to_string(),
        })?;
        let account = auth::authenticate(&state.db, token).await?;
        Ok(Self {
            account,
            token: token.to_string(),
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.account.role != Role::Admin {
            return Err(Error::Forbidden {
                message: "Admin access required".to_string(),
            }
            .into());
        }
        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc123"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
