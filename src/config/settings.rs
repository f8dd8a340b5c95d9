//! Application settings.
//!
//! Settings come from an optional TOML file (`RESORT_CONFIG`, default
//! `config.toml`) with environment overrides for the values that differ per
//! deployment. A missing file is not an error; every field has a default.

use crate::config::database::{DEFAULT_DATABASE_URL, database_url_from_env};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the settings file
pub const CONFIG_PATH_KEY: &str = "RESORT_CONFIG";
/// Environment variable overriding [`AppSettings::bind_address`]
pub const BIND_ADDRESS_KEY: &str = "BIND_ADDRESS";
/// Lowest bcrypt work factor the hasher accepts
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest bcrypt work factor the hasher accepts
pub const MAX_BCRYPT_COST: u32 = 31;

/// Runtime settings shared by the server and the maintenance CLI
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// `SeaORM` connection string
    pub database_url: String,
    /// Socket address the API listens on
    pub bind_address: String,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
    /// Lifetime of a login session
    pub session_ttl_hours: i64,
    /// Lifetime of a password reset token
    pub reset_token_ttl_minutes: i64,
    /// Base URL of the reset page; the token is appended as `?token=`
    pub reset_link_base: String,
    /// Origins allowed by CORS; empty allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: "0.0.0.0:5000".to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            session_ttl_hours: 12,
            reset_token_ttl_minutes: 60,
            reset_link_base: "http://localhost:3000/reset-password".to_string(),
            allowed_origins: Vec::new(),
        }
    }
}

impl AppSettings {
    /// Parses settings from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse settings: {e}"),
        })
    }

    /// Loads settings from `path`, or defaults when the file does not exist.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        debug!("Loading settings from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Failed to read settings file {}: {e}", path.display()),
        })?;
        Self::from_toml(&contents)
    }

    /// Loads the settings file named by `RESORT_CONFIG` and applies the
    /// `DATABASE_URL` and `BIND_ADDRESS` overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_KEY).unwrap_or_else(|_| "config.toml".to_string());
        let mut settings = Self::load_file(path)?;

        if let Some(url) = database_url_from_env() {
            settings.database_url = url;
        }
        if let Ok(address) = std::env::var(BIND_ADDRESS_KEY) {
            settings.bind_address = address;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Rejects settings that would make the server unusable.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(Error::Config {
                message: format!(
                    "bcrypt_cost must be between {} and {}, got {}",
                    MIN_BCRYPT_COST,
                    MAX_BCRYPT_COST,
                    self.bcrypt_cost
                ),
            });
        }
        if self.session_ttl_hours <= 0 || self.reset_token_ttl_minutes <= 0 {
            return Err(Error::Config {
                message: "token lifetimes must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// How long a login session stays valid.
    #[must_use]
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours)
    }

    /// How long a password reset token stays valid.
    #[must_use]
    pub fn reset_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.reset_token_ttl_minutes)
    }
}
