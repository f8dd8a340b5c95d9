//! Unified error type for the resort kitchen backend.
//!
//! Core functions, maintenance routines and API handlers all return
//! [`Result`]. The HTTP layer maps each variant to a status code in
//! `api::error`.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors produced by the data layer, business logic and configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Input rejected before touching the database
    #[error("Validation failed: {message}")]
    Validation {
        /// Human-readable description
        message: String,
    },

    /// A record looked up by key does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. `"Employee"`
        entity: &'static str,
        /// The key that was looked up
        id: String,
    },

    /// A unique natural key is already taken
    #[error("Duplicate {field}: {value}")]
    Duplicate {
        /// Field carrying the unique constraint
        field: &'static str,
        /// The conflicting value
        value: String,
    },

    /// Missing, unknown or expired credentials
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable description
        message: String,
    },

    /// Authenticated, but the role does not allow the action
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable description
        message: String,
    },

    /// A status change that the state machine does not allow
    #[error("Cannot change status from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },

    /// Password hashing or verification failed
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// I/O failure (config and roster files, sockets)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A spawned task panicked or was cancelled
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    /// Shorthand for [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Converts a database error into [`Error::Duplicate`] when it is a unique
    /// constraint violation, otherwise into [`Error::Database`].
    pub fn from_insert(err: DbErr, field: &'static str, value: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Duplicate {
                field,
                value: value.into(),
            },
            _ => Self::Database(err),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
