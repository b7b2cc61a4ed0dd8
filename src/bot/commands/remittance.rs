//! Remittance Discord commands - `/remit` and `/remittances`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{reply_failure, today},
            handlers::autocomplete,
        },
        core::{
            forms::RemittanceFormData,
            member, remittance,
            roster::{self, RosterRow},
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Records a dues payment, a donation, or both for a member.
    ///
    /// Dues advance the member's tier and paid-through date; donations are only
    /// recorded. Amounts are written like `25.00`.
    #[poise::command(slash_command, prefix_command)]
    pub async fn remit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member who paid"]
        #[autocomplete = "autocomplete::autocomplete_member"]
        member_ref: String,
        #[description = "Dues amount (e.g., 25.00)"] dues: Option<String>,
        #[description = "Donation amount (e.g., 1,000.00)"] donation: Option<String>,
        #[description = "Date received (YYYY-MM-DD). Defaults to today."] date: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let form = RemittanceFormData {
            memberid: roster::parse_member_ref(&member_ref)
                .map(|id| id.to_string())
                .unwrap_or_default(),
            date: date.unwrap_or_else(today),
            duesamount: dues.unwrap_or_default(),
            donationamount: donation.unwrap_or_default(),
        };

        let recorded = match remittance::record_remittance(db, &form).await {
            Ok(recorded) => recorded,
            Err(e) => return reply_failure(ctx, e).await,
        };
        let row = RosterRow::from_member(&recorded.member)?;

        let mut response = format!("✅ Recorded for **{}**:\n", row.name);
        for r in &recorded.remittances {
            writeln!(&mut response, "• ${} {} on {}", r.amount, r.memo, r.date)?;
        }
        write!(&mut response, "Tier: **{}**", row.tier)?;
        if let Some(paid_through) = row.paid_through {
            write!(&mut response, ", paid through {paid_through}")?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Lists every remittance recorded for a member, oldest first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn remittances(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to list"]
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

        let rows = remittance::get_remittances_for_member(db, member_id).await?;
        if rows.is_empty() {
            ctx.say(format!(
                "ℹ️ No remittances recorded for {}.",
                roster::member_label(&record)
            ))
            .await?;
            return Ok(());
        }

        let mut response = format!("💵 **Remittances for {}**\n```\n", roster::member_label(&record));
        for r in &rows {
            writeln!(&mut response, "{}  {:>10}  {}", r.date, r.amount, r.memo)?;
        }
        response.push_str("```");

        ctx.say(response).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
