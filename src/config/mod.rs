/// Database connection and table creation
pub mod database;

/// Employee roster loading from TOML
pub mod roster;

/// Application settings from config.toml and the environment
pub mod settings;
