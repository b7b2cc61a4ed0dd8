//! Member Discord commands - the `/member` command group.
//!
//! Contact edits go through the same validation and contact-status derivation
//! as creation; tier and dates only change through `/remit`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::reply_failure,
            handlers::autocomplete,
        },
        core::{
            forms::{MemberEdits, MemberFormData},
            member, note, remittance,
            roster::{self, RosterRow},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use sea_orm::ActiveEnum;
    use std::fmt::Write;

    fn date_or_blank(date: Option<chrono::NaiveDate>) -> String {
        date.map_or_else(|| "n/a".to_string(), |d| d.to_string())
    }

    /// Parent command for adding, editing, viewing and removing members.
    #[poise::command(
        slash_command,
        subcommands(
            "member_add",
            "member_edit",
            "member_show",
            "member_activate",
            "member_delete"
        )
    )]
    pub async fn member(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Member management command. Available subcommands:\n\
            `/member add` - Add a new member\n\
            `/member edit` - Update a member's name and contact details\n\
            `/member show` - Show a member's record\n\
            `/member activate` - Show or hide a member on the roster\n\
            `/member delete` - Delete a member and all their records";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a new member.
    ///
    /// New members start as volunteers unless a lifetime tier is given; paid tiers
    /// come from recording dues with `/remit`.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "add")]
    pub async fn member_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Last name"] last_name: String,
        #[description = "First name"] first_name: Option<String>,
        #[description = "Street address"] address: Option<String>,
        #[description = "Unit or apartment"] unit: Option<String>,
        #[description = "City"] city: Option<String>,
        #[description = "State"] state: Option<String>,
        #[description = "Postal code"] postal_code: Option<String>,
        #[description = "Email address"] email: Option<String>,
        #[description = "Phone number"] phone: Option<String>,
        #[description = "Tier: VOL (default), LM, HLM or BEN"] tier: Option<String>,
        #[description = "Joined date for lifetime tiers (YYYY-MM-DD)"] joined: Option<String>,
    ) -> Result<()> {
        let form = MemberFormData {
            lname: last_name,
            fname: first_name.unwrap_or_default(),
            address: address.unwrap_or_default(),
            unit: unit.unwrap_or_default(),
            city: city.unwrap_or_default(),
            state: state.unwrap_or_default(),
            postalcode: postal_code.unwrap_or_default(),
            email: email.unwrap_or_default(),
            phone: phone.unwrap_or_default(),
            mmb: tier.unwrap_or_default(),
            joined: joined.unwrap_or_default(),
        };

        let db = &ctx.data().database;
        match member::create_member_from_form(db, &form).await {
            Ok(created) => {
                let row = RosterRow::from_member(&created)?;
                ctx.say(format!(
                    "✅ Added **{}** as {}.",
                    roster::member_label(&created),
                    row.tier
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_failure(ctx, e).await,
        }
    }

    /// Updates a member's name and contact details.
    ///
    /// Omitted options keep their current value and `-` clears a field. Mail,
    /// email and newsletter statuses are re-derived from the change.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "edit")]
    pub async fn member_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to edit"]
        #[autocomplete = "autocomplete::autocomplete_member"]
        member_ref: String,
        #[description = "Last name"] last_name: Option<String>,
        #[description = "First name"] first_name: Option<String>,
        #[description = "Street address"] address: Option<String>,
        #[description = "Unit or apartment"] unit: Option<String>,
        #[description = "City"] city: Option<String>,
        #[description = "State"] state: Option<String>,
        #[description = "Postal code"] postal_code: Option<String>,
        #[description = "Email address"] email: Option<String>,
        #[description = "Phone number"] phone: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let edits = MemberEdits {
            lname: last_name,
            fname: first_name,
            address,
            unit,
            city,
            state,
            postalcode: postal_code,
            email,
            phone,
        };
        let member_id = roster::parse_member_ref(&member_ref);

        match member::edit_member(db, member_id, edits).await {
            Ok(updated) => {
                ctx.say(format!(
                    "✅ Updated **{}**. Mail: {}, email: {}, newsletter: {}.",
                    roster::member_label(&updated),
                    updated.valid_post_mail.to_value(),
                    updated.valid_email.to_value(),
                    updated.newsletter_type.to_value(),
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_failure(ctx, e).await,
        }
    }

    /// Shows a member's membership, contact details and recent activity.
    #[poise::command(slash_command, rename = "show")]
    pub async fn member_show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to show"]
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
        let row = RosterRow::from_member(&record)?;
        let remittances = remittance::get_remittances_for_member(db, member_id).await?;
        let notes = note::get_notes_for_member(db, member_id).await?;

        let mut membership = String::new();
        writeln!(&mut membership, "**Tier:** {}", row.tier)?;
        writeln!(&mut membership, "**Joined:** {}", date_or_blank(record.joined))?;
        writeln!(
            &mut membership,
            "**Paid through:** {}",
            date_or_blank(row.paid_through)
        )?;
        write!(
            &mut membership,
            "**On roster:** {}",
            if record.is_active { "yes" } else { "no" }
        )?;

        let mut contact = String::new();
        let street = [record.address.as_deref(), record.unit.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        let locality = [
            record.city.as_deref(),
            record.state.as_deref(),
            record.postal_code.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
        writeln!(&mut contact, "{street}\n{locality}")?;
        writeln!(
            &mut contact,
            "**Email:** {}",
            record.email.as_deref().unwrap_or("n/a")
        )?;
        writeln!(
            &mut contact,
            "**Phone:** {}",
            record.phone.as_deref().unwrap_or("n/a")
        )?;
        write!(
            &mut contact,
            "**Mail:** {} | **Email:** {} | **Newsletter:** {}",
            record.valid_post_mail.to_value(),
            record.valid_email.to_value(),
            record.newsletter_type.to_value()
        )?;

        let mut activity = String::new();
        for r in remittances.iter().rev().take(5) {
            writeln!(&mut activity, "{} ${} ({})", r.date, r.amount, r.memo)?;
        }
        if activity.is_empty() {
            activity.push_str("No remittances recorded.");
        }

        let embed = serenity::CreateEmbed::default()
            .title(format!("👤 {}", row.name))
            .color(0x0034_98DB)
            .field("Membership", membership, false)
            .field("Contact", contact, false)
            .field("Recent remittances", activity, false)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Member {} | {} note{} | updated {}",
                record.id,
                notes.len(),
                if notes.len() == 1 { "" } else { "s" },
                record.last_updated.format("%Y-%m-%d %H:%M UTC")
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows or hides a member on the roster.
    #[poise::command(slash_command, rename = "activate")]
    pub async fn member_activate(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to change"]
        #[autocomplete = "autocomplete::autocomplete_member"]
        member_ref: String,
        #[description = "Whether the member appears on the roster"] active: bool,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(member_id) = roster::parse_member_ref(&member_ref) else {
            ctx.say(format!("❌ '{member_ref}' is not a member. Pick one from the list."))
                .await?;
            return Ok(());
        };

        match member::set_member_active(db, member_id, active).await {
            Ok(updated) => {
                let state = if updated.is_active { "active" } else { "inactive" };
                ctx.say(format!(
                    "✅ **{}** is now {state}.",
                    roster::member_label(&updated)
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_failure(ctx, e).await,
        }
    }

    /// Deletes a member along with their remittances and notes.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn member_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to delete"]
        #[autocomplete = "autocomplete::autocomplete_member"]
        member_ref: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let member_id = roster::parse_member_ref(&member_ref);

        match member::delete_member(db, member_id).await {
            Ok(0) => {
                ctx.say(format!("⚠️ No member matched '{member_ref}'. Nothing was deleted."))
                    .await?;
            }
            Ok(_) => {
                ctx.say(format!(
                    "🗑️ Deleted {member_ref} with their remittances and notes."
                ))
                .await?;
            }
            Err(e) => return reply_failure(ctx, e).await,
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
