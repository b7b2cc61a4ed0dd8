//! Roster view - display rows built from member records.
//!
//! Stored tier codes are shown through [`TierCode::display`], so benefactors
//! read as lifetime members, and a paid-through date is only shown for tiers
//! that pay annual dues.

use crate::{
    config::RosterConfig,
    core::{
        member::{list_members, member_tier},
        names::display_name,
        query::{MemberQuery, Page},
    },
    entities::member,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// One roster line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub member_id: i64,
    /// `"Last, First"`, title-cased
    pub name: String,
    /// Display tier code, e.g. `F26` or `LM`
    pub tier: String,
    pub paid_through: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
}

impl RosterRow {
    /// Builds the display row for `member`.
    pub fn from_member(member: &member::Model) -> Result<Self> {
        let tier = member_tier(member)?;
        Ok(Self {
            member_id: member.id,
            name: display_name(&member.last_name, &member.first_name),
            tier: tier.display(),
            paid_through: member.paid_through.filter(|_| tier.base.is_dues_bearing()),
            email: member.email.clone(),
            phone: member.phone.clone(),
            is_active: member.is_active,
        })
    }
}

/// `"12 - Smith, Jane"`, the label used when picking a member.
#[must_use]
pub fn member_label(member: &member::Model) -> String {
    format!(
        "{} - {}",
        member.id,
        display_name(&member.last_name, &member.first_name)
    )
}

/// Reads the member id back out of a [`member_label`], or a bare id.
#[must_use]
pub fn parse_member_ref(reference: &str) -> Option<i64> {
    let id = reference
        .split_once(" - ")
        .map_or(reference, |(id, _)| id)
        .trim();
    id.parse().ok()
}

/// Fetches a page of the configured roster, optionally narrowed by `search`.
pub async fn fetch_roster_page(
    db: &DatabaseConnection,
    config: &RosterConfig,
    page: u64,
    search: Option<&str>,
) -> Result<Page<RosterRow>> {
    let query = MemberQuery::from_config(config).page(page).search(search);
    list_members(db, &query)
        .await?
        .try_map(|member| RosterRow::from_member(&member))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::forms::MemberFormData;
    use crate::core::member::{create_member_from_form, set_member_active};
    use crate::test_utils::*;

    #[test]
    fn test_parse_member_ref() {
        assert_eq!(parse_member_ref("12 - Smith, Jane"), Some(12));
        assert_eq!(parse_member_ref(" 7 "), Some(7));
        assert_eq!(parse_member_ref("Smith"), None);
        assert_eq!(parse_member_ref(""), None);
    }

    #[tokio::test]
    async fn test_roster_rows() -> Result<()> {
        let db = setup_test_db().await?;
        let paid = create_test_member(&db, "smith", "jane").await?;
        record_test_dues(&db, paid.id, "10.00", test_date(2024, 3, 15)).await?;
        let benefactor = create_member_from_form(
            &db,
            &MemberFormData {
                mmb: "BEN".to_string(),
                joined: "2001-05-01".to_string(),
                ..test_member_form("Adams", "Ann")
            },
        )
        .await?;
        assert_eq!(benefactor.mmb, "BEN");
        assert_eq!(RosterRow::from_member(&benefactor)?.tier, "LM");
        let hidden = create_test_member(&db, "Zed", "Zoe").await?;
        set_member_active(&db, hidden.id, false).await?;

        let page = fetch_roster_page(&db, &RosterConfig::default(), 1, None).await?;
        assert_eq!(page.total_count, 2);
        assert_eq!(page.data[0].name, "Adams, Ann");
        assert_eq!(page.data[0].tier, "LM");
        assert_eq!(page.data[0].paid_through, None);
        assert_eq!(page.data[1].name, "Smith, Jane");
        assert_eq!(page.data[1].tier, "F24");
        assert_eq!(page.data[1].paid_through, Some(test_date(2025, 3, 14)));

        let found = fetch_roster_page(&db, &RosterConfig::default(), 1, Some("smi")).await?;
        assert_eq!(found.data.len(), 1);

        let member = crate::core::member::require_member(&db, paid.id).await?;
        assert_eq!(member_label(&member), format!("{} - Smith, Jane", paid.id));
        Ok(())
    }
}
