//! Roster Discord command - paged member listing.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::roster,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    /// Lists members a page at a time, in the order set in config.toml.
    ///
    /// The search matches last name, first name or email.
    #[poise::command(slash_command, prefix_command)]
    pub async fn roster(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Page number (starts at 1)"] page: Option<u64>,
        #[description = "Search names and emails"] search: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let config = &ctx.data().roster;

        let page = roster::fetch_roster_page(db, config, page.unwrap_or(1), search.as_deref())
            .await?;

        if page.total_count == 0 {
            ctx.say("📋 No members match.").await?;
            return Ok(());
        }

        let mut body = String::from("```\n");
        for row in &page.data {
            let paid = row
                .paid_through
                .map(|d| d.to_string())
                .unwrap_or_default();
            writeln!(
                &mut body,
                "{:>5} {:<28} {:<5} {:<10}{}",
                row.member_id,
                row.name,
                row.tier,
                paid,
                if row.is_active { "" } else { " (inactive)" }
            )?;
        }
        if page.data.is_empty() {
            writeln!(&mut body, "(past the last page)")?;
        }
        body.push_str("```");

        let embed = serenity::CreateEmbed::default()
            .title("📋 Member Roster")
            .description(body)
            .color(0x0034_98DB)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Page {}/{} | {} member{}",
                page.page,
                page.page_count,
                page.total_count,
                if page.total_count == 1 { "" } else { "s" }
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
