//! Client-side error type.
//!
//! Transport failures and `{"message"}` error bodies are folded into one
//! [`ClientError`]; [`ClientError::banner`] gives the text a screen shows.

use thiserror::Error;

/// Shown for any failure to reach the server
pub const NETWORK_BANNER: &str = "Unable to reach the server. Please try again later.";

/// Errors returned by [`super::ApiClient`] and the client flows
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Request failed with status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-provided message, or the status reason
        message: String,
    },

    /// Input rejected before any request was made
    #[error("{message}")]
    Validation {
        /// Human-readable description
        message: String,
    },

    /// An authenticated call was attempted without a token
    #[error("Not logged in")]
    NotAuthenticated,

    /// The session file could not be read or written
    #[error("Session store error: {0}")]
    Store(#[from] std::io::Error),

    /// The session file is not valid JSON
    #[error("Session store format error: {0}")]
    Format(#[from] serde_json::Error),
}

impl ClientError {
    /// Text suitable for an error banner.
    #[must_use]
    pub fn banner(&self) -> String {
        match self {
            Self::Network(_) => NETWORK_BANNER.to_string(),
            Self::Api { message, .. } | Self::Validation { message } => message.clone(),
            Self::NotAuthenticated => "Please log in to continue.".to_string(),
            Self::Store(_) | Self::Format(_) => "Could not save your session.".to_string(),
        }
    }

    /// HTTP status of an [`ClientError::Api`] error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client result
pub type ClientResult<T> = std::result::Result<T, ClientError>;
