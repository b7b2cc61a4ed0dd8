//! Autocomplete handlers for Discord slash command parameters.
//!
//! Member parameters are completed with `"id - Last, First"` labels, which
//! [`crate::core::roster::parse_member_ref`] turns back into an id.

use crate::{
    bot::BotData,
    core::{member, roster},
    errors::Error,
};
use tracing::warn;

/// Discord accepts at most this many choices.
const MAX_CHOICES: u64 = 25;

/// Provides autocomplete suggestions for members by last or first name.
///
/// Inactive members are included so they can still be looked up and reactivated.
pub async fn autocomplete_member(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    match member::suggest_members(db, partial, MAX_CHOICES).await {
        Ok(members) => members.iter().map(roster::member_label).collect(),
        Err(e) => {
            warn!("Member autocomplete failed: {}", e);
            Vec::new()
        }
    }
}
