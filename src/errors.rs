//! Unified error types and result handling for `RosterBuddy`.

use crate::core::forms::FormErrors;
use chrono::NaiveDate;
use thiserror::Error;

/// Every failure the roster can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Application configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A form submission failed validation; nothing was persisted
    #[error("{message}")]
    Validation {
        /// Human-readable summary
        message: String,
        /// Errors keyed by form field name
        errors: FormErrors,
    },

    /// An update or delete was invoked without the record identifier it needs
    #[error("{operation} requires a record identifier")]
    MissingIdentifier {
        /// Name of the operation that was attempted
        operation: &'static str,
    },

    /// Date arithmetic left the supported calendar range
    #[error("Date out of range: {date}")]
    DateOutOfRange {
        /// Anchor date of the failed computation
        date: NaiveDate,
    },

    /// A stored or submitted tier code is not recognised
    #[error("Unknown membership tier code '{code}'")]
    InvalidTier {
        /// The offending code
        code: String,
    },

    /// No member with the given id
    #[error("Member {id} not found")]
    MemberNotFound {
        /// Requested member id
        id: i64,
    },

    /// No note with the given id
    #[error("Note {id} not found")]
    NoteNotFound {
        /// Requested note id
        id: i64,
    },

    /// Persistence failure reported by the database layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (configuration file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or unreadable environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Failure while building a reply message
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Discord / serenity failure
    #[error("Discord error: {0}")]
    Discord(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Discord(Box::new(value))
    }
}

impl Error {
    /// Builds a validation error from a populated error map.
    #[must_use]
    pub fn validation(message: impl Into<String>, errors: FormErrors) -> Self {
        Self::Validation {
            message: message.into(),
            errors,
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
