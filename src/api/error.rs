//! HTTP error mapping.
//!
//! Every handler returns [`ApiResult`]. Crate errors become a status code and
//! a `{"message": ...}` body; server-side failures are logged and reported
//! without detail.

use crate::errors::Error;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Error body returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub message: String,
}

/// A crate error on its way to becoming an HTTP response
#[derive(Debug)]
pub struct ApiError(pub Error);

/// Handler result
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self(Error::Database(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(Error::validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(Error::validation(rejection.body_text()))
    }
}

impl ApiError {
    /// Status code for the wrapped error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.0 {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Error::Forbidden { .. } => StatusCode::FORBIDDEN,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Duplicate { .. } | Error::InvalidTransition { .. } => StatusCode::CONFLICT,
            Error::Config { .. }
            | Error::Database(_)
            | Error::PasswordHash(_)
            | Error::Io(_)
            | Error::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            Error::Validation { message }
            | Error::Unauthorized { message }
            | Error::Forbidden { message } => message.clone(),
            Error::NotFound { .. } | Error::Duplicate { .. } | Error::InvalidTransition { .. } => {
                self.0.to_string()
            }
            other => {
                error!("Request failed: {}", other);
                "Internal server error".to_string()
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::validation("bad"), StatusCode::BAD_REQUEST),
            (
                Error::Unauthorized {
                    message: "who".to_string(),
                },
                StatusCode::UNAUTHORIZED,
            ),
            (
                Error::Forbidden {
                    message: "no".to_string(),
                },
                StatusCode::FORBIDDEN,
            ),
            (
                Error::NotFound {
                    entity: "Order",
                    id: "7".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                Error::Duplicate {
                    field: "name",
                    value: "Goulash".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                Error::Config {
                    message: "broken".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }
}
