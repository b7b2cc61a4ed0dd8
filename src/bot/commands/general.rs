//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    ///
    /// This is a simple health check command that doesn't require any database operations.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    ///
    /// This command provides users with information about all available bot commands
    /// and their usage, helping them understand the bot's capabilities.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**RosterBuddy Help**\n\
        Here is a summary of all available commands for RosterBuddy.\n\n\
        **Roster**\n\
        • `/roster [page] [search]` - Lists members, sorted and paged per config.toml.\n\n\
        **Member Commands**\n\
        • `/member add <last> [first] [address] ... [tier] [joined]` - Adds a member (VOL, LM, HLM or BEN).\n\
        • `/member edit <member> [fields...]` - Updates contact details. Omitted fields are kept, `-` clears one.\n\
        • `/member show <member>` - Shows membership, contact status and recent remittances.\n\
        • `/member activate <member> <active>` - Shows or hides a member on the roster.\n\
        • `/member delete <member>` - Deletes a member with their remittances and notes.\n\n\
        **Payments and Notes**\n\
        • `/remit <member> [dues] [donation] [date]` - Records dues and/or a donation. Amounts look like 25.00.\n\
        • `/remittances <member>` - Lists a member's remittances.\n\
        • `/note add|edit|list` - Manages dated notes on a member.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Dates are written YYYY-MM-DD and default to today.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
