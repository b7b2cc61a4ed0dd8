//! Roster configuration loading from config.toml
//!
//! The page size and default ordering of roster listings live here and are passed
//! explicitly into the query functions in [`crate::core::member`] and
//! [`crate::core::roster`].

use crate::core::query::{MemberField, SortDirection, SortKey};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Roster listing settings
    #[serde(default)]
    pub roster: RosterConfig,
}

/// Settings for paginated roster listings
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Members per page
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Ordering applied when a listing does not specify one
    #[serde(default = "default_sort")]
    pub sort: Vec<SortKey>,
    /// Whether inactive members appear in the roster by default
    #[serde(default)]
    pub show_inactive: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            sort: default_sort(),
            show_inactive: false,
        }
    }
}

const fn default_page_size() -> u64 {
    10
}

fn default_sort() -> Vec<SortKey> {
    vec![
        SortKey::new(MemberField::LastName, SortDirection::Asc),
        SortKey::new(MemberField::FirstName, SortDirection::Asc),
    ]
}

impl AppConfig {
    fn validate(self) -> Result<Self> {
        if self.roster.page_size == 0 {
            return Err(Error::Config {
                message: "roster.page_size must be at least 1".to_string(),
            });
        }
        Ok(self)
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()
}

/// Loads configuration from a TOML file.
///
/// A missing file yields the defaults; an unreadable or malformed one is an error.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("No config file at {:?}, using default roster settings", path);
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    parse_config(&contents)
}

/// Loads configuration from `ROSTER_CONFIG`, or `./config.toml` when unset.
pub fn load_default_config() -> Result<AppConfig> {
    let path = std::env::var("ROSTER_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_roster_config() {
        let toml_str = r#"
            [roster]
            page_size = 25
            show_inactive = true

            [[roster.sort]]
            field = "city"
            direction = "desc"
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.roster.page_size, 25);
        assert!(config.roster.show_inactive);
        assert_eq!(
            config.roster.sort,
            vec![SortKey::new(MemberField::City, SortDirection::Desc)]
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.roster.page_size, 10);
        assert!(!config.roster.show_inactive);
        assert_eq!(config.roster.sort.len(), 2);
        assert_eq!(config.roster.sort[0].field, MemberField::LastName);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = parse_config("[roster]\npage_size = 0\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config("definitely/not/here.toml").unwrap();
        assert_eq!(config.roster.page_size, 10);
    }
}
