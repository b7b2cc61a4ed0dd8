//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Member management commands
pub mod member;

/// Member note commands
pub mod note;

/// Dues and donation commands
pub mod remittance;

/// Roster listing command
pub mod roster;

use crate::{
    bot::BotData,
    errors::{Error, Result},
};

// Export commands
pub use general::*;
pub use member::*;
pub use note::*;
pub use remittance::*;
pub use roster::*;

/// The reply for failures the submitter can fix themselves, or `None` for
/// failures that should go to the framework error handler.
#[must_use]
pub fn user_facing_failure(error: &Error) -> Option<String> {
    match error {
        Error::Validation { message, errors } => {
            let lines = errors.iter().flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |text| format!("• **{field}**: {text}"))
            });
            Some(
                std::iter::once(format!("❌ {message}"))
                    .chain(lines)
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        }
        Error::MissingIdentifier { .. }
        | Error::MemberNotFound { .. }
        | Error::NoteNotFound { .. } => Some(format!("❌ {error}")),
        _ => None,
    }
}

/// Replies with the failure when the submitter can fix it, otherwise hands
/// the error back to the framework.
pub async fn reply_failure(ctx: poise::Context<'_, BotData, Error>, error: Error) -> Result<()> {
    match user_facing_failure(&error) {
        Some(reply) => {
            ctx.say(reply).await?;
            Ok(())
        }
        None => Err(error),
    }
}

/// Today's date in the bot's local time zone, as a form value.
#[must_use]
pub fn today() -> String {
    chrono::Local::now()
        .date_naive()
        .format(crate::core::forms::DATE_FORMAT)
        .to_string()
}
