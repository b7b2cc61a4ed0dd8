/// Database configuration and connection management
pub mod database;

/// Roster listing configuration loading from config.toml
pub mod roster;

pub use roster::{AppConfig, RosterConfig};
