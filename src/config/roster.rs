//! Employee roster loading from TOML.
//!
//! A roster file lists `[[employees]]` tables that `resort-admin seed-roster`
//! inserts in one batch. The built-in roster ships with the crate and is used
//! when no file is given.

use crate::entities::Role;
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

const BUILTIN_ROSTER: &str = include_str!("../../roster.toml");

/// Configuration structure representing a roster file
#[derive(Debug, Deserialize)]
pub struct Roster {
    /// Employees to insert
    pub employees: Vec<RosterEntry>,
}

/// One employee of a roster
#[derive(Debug, Deserialize, Clone)]
pub struct RosterEntry {
    /// Business identifier, e.g. `EMP001`
    pub employee_id: String,
    /// Full name
    pub name: String,
    /// Job title
    pub position: String,
    /// Monthly pay rate
    pub monthly_rate: f64,
    /// First working day
    pub start_date: NaiveDate,
    /// Assigned duties
    #[serde(default)]
    pub duties: Vec<String>,
    /// Access role, staff unless stated
    #[serde(default = "default_role")]
    pub role: Role,
}

const fn default_role() -> Role {
    Role::Staff
}

/// Parses a roster from TOML text.
///
/// # Errors
/// Returns an error if the TOML syntax is invalid or required fields are missing.
pub fn parse_roster(contents: &str) -> Result<Roster> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse roster: {e}"),
    })
}

/// Loads a roster from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Roster> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read roster file {}: {e}", path.display()),
    })?;
    parse_roster(&contents)
}

/// The roster compiled into the binary.
pub fn builtin_roster() -> Result<Roster> {
    parse_roster(BUILTIN_ROSTER)
}
