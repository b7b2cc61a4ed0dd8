//! Note Discord commands - the `/note` command group.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{reply_failure, today},
            handlers::autocomplete,
        },
        core::{forms::NoteFormData, member, note, roster},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Parent command for member notes.
    #[poise::command(slash_command, subcommands("note_add", "note_edit", "note_list"))]
    pub async fn note(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Note command. Available subcommands:\n\
            `/note add` - Add a dated note to a member\n\
            `/note edit` - Change the date or text of a note\n\
            `/note list` - List a member's notes, newest first";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a dated note to a member.
    #[poise::command(slash_command, rename = "add")]
    pub async fn note_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member the note is about"]
        #[autocomplete = "autocomplete::autocomplete_member"]
        member_ref: String,
        #[description = "Note text"] text: String,
        #[description = "Date (YYYY-MM-DD). Defaults to today."] date: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let form = NoteFormData {
            memberid: roster::parse_member_ref(&member_ref)
                .map(|id| id.to_string())
                .unwrap_or_default(),
            date: date.unwrap_or_else(today),
            note: text,
            ..NoteFormData::default()
        };

        match note::create_note_from_form(db, &form).await {
            Ok(created) => {
                ctx.say(format!(
                    "📝 Saved note #{} for {} dated {}.",
                    created.id, member_ref, created.date
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_failure(ctx, e).await,
        }
    }

    /// Changes the text and, optionally, the date of a note.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn note_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Note number, as shown by /note list"] note_id: i64,
        #[description = "New note text"] text: String,
        #[description = "New date (YYYY-MM-DD). Defaults to the current one."] date: Option<
            String,
        >,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let date = match date {
            Some(date) => date,
            None => match note::get_note_by_id(db, note_id).await? {
                Some(existing) => existing.date.to_string(),
                None => return reply_failure(ctx, Error::NoteNotFound { id: note_id }).await,
            },
        };
        let form = NoteFormData {
            noteid: note_id.to_string(),
            date,
            note: text,
            ..NoteFormData::default()
        };

        match note::edit_note(db, &form).await {
            Ok(edited) => {
                ctx.say(format!("📝 Updated note #{} ({}).", edited.id, edited.date))
                    .await?;
                Ok(())
            }
            Err(e) => reply_failure(ctx, e).await,
        }
    }

    /// Lists a member's notes, newest first.
    #[poise::command(slash_command, rename = "list")]
    pub async fn note_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member whose notes to list"]
        #[autocomplete = "autocomplete::autocomplete_member"]
        member_ref: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(member_id) = roster::parse_member_ref(&member_ref) else {
            ctx.say(format!("❌ '{member_ref}' is not a member. Pick one from the list."))
                .await?;
            return Ok(());
        };
        let record = match member::require_member(db, member_id).await {
            Ok(record) => record,
            Err(e) => return reply_failure(ctx, e).await,
        };

        let notes = note::get_notes_for_member(db, member_id).await?;
        if notes.is_empty() {
            ctx.say(format!("ℹ️ No notes for {}.", roster::member_label(&record)))
                .await?;
            return Ok(());
        }

        let mut response = format!("📒 **Notes for {}**\n", roster::member_label(&record));
        for n in &notes {
            writeln!(&mut response, "**#{}** {}: {}", n.id, n.date, n.body)?;
        }

        ctx.say(response).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
