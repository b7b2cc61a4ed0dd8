//! Remittance business logic - records dues and donations against a member.
//!
//! A submission may carry a dues amount, a donation amount or both. Each
//! non-zero amount becomes its own remittance row. Dues also advance the
//! member's tier, joined date and paid-through date through
//! [`next_membership_state`]. Rows and member changes are written in a single
//! database transaction.

use crate::{
    core::{
        forms::{RemittanceFormData, RemittanceInput},
        member::{member_tier, membership_state},
        membership::next_membership_state,
    },
    entities::{
        Member, Remittance, member,
        remittance::{self, MEMO_DONATION, MEMO_DUES},
    },
    errors::{Error, Result},
};
use sea_orm::{DatabaseTransaction, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Result of recording a remittance.
#[derive(Debug, Clone)]
pub struct RecordedRemittance {
    /// The member after any membership changes
    pub member: member::Model,
    /// Rows created, dues before donation
    pub remittances: Vec<remittance::Model>,
}

async fn insert_row(
    txn: &DatabaseTransaction,
    member_id: i64,
    date: chrono::NaiveDate,
    amount: String,
    memo: &str,
) -> Result<remittance::Model> {
    remittance::ActiveModel {
        member_id: Set(member_id),
        date: Set(date),
        amount: Set(amount),
        memo: Set(memo.to_string()),
        ..Default::default()
    }
    .insert(txn)
    .await
    .map_err(Into::into)
}

/// Validates a remittance form against the member's current tier and records it.
#[instrument(skip(db, form), fields(member = %form.memberid))]
pub async fn record_remittance(
    db: &DatabaseConnection,
    form: &RemittanceFormData,
) -> Result<RecordedRemittance> {
    let txn = db.begin().await?;

    // Lifetime members are rejected for dues, so the tier is needed up front.
    let member_id = form.memberid.trim().parse::<i64>().ok();
    let prior = match member_id {
        Some(id) => Some(
            Member::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or(Error::MemberNotFound { id })?,
        ),
        None => None,
    };
    let tier = prior
        .as_ref()
        .map(member_tier)
        .transpose()?
        .unwrap_or_default();

    let RemittanceInput {
        member_id,
        date,
        dues,
        donation,
    } = form.validate(tier)?;
    let Some(prior) = prior else {
        return Err(Error::MemberNotFound { id: member_id });
    };

    let mut remittances = Vec::with_capacity(2);
    let mut member = prior.clone();

    if let Some(dues) = dues {
        let current = membership_state(&prior)?;
        let next = next_membership_state(&current, date, &dues)?;
        remittances.push(insert_row(&txn, member_id, date, dues, MEMO_DUES).await?);

        let mut model: member::ActiveModel = prior.into();
        model.mmb = Set(next.tier.to_string());
        model.joined = Set(next.joined);
        model.paid_through = Set(next.paid_through);
        model.last_updated = Set(chrono::Utc::now());
        member = model.update(&txn).await?;
    }

    if let Some(donation) = donation {
        remittances.push(insert_row(&txn, member_id, date, donation, MEMO_DONATION).await?);
    }

    txn.commit().await?;

    info!(
        rows = remittances.len(),
        mmb = %member.mmb,
        "Recorded remittance"
    );
    Ok(RecordedRemittance {
        member,
        remittances,
    })
}

/// Retrieves all remittances for a member, oldest first.
pub async fn get_remittances_for_member(
    db: &DatabaseConnection,
    member_id: i64,
) -> Result<Vec<remittance::Model>> {
    Remittance::find()
        .filter(remittance::Column::MemberId.eq(member_id))
        .order_by_asc(remittance::Column::Date)
        .order_by_asc(remittance::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::member::set_member_active;
    use crate::test_utils::*;

    fn form(member_id: i64, date: &str, dues: &str, donation: &str) -> RemittanceFormData {
        RemittanceFormData {
            memberid: member_id.to_string(),
            date: date.to_string(),
            duesamount: dues.to_string(),
            donationamount: donation.to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_dues_payment() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Smith", "Jane").await?;

        let recorded = record_remittance(&db, &form(member.id, "2024-03-15", "10.00", "")).await?;
        assert_eq!(recorded.remittances.len(), 1);
        assert_eq!(recorded.remittances[0].memo, MEMO_DUES);
        assert_eq!(recorded.remittances[0].amount, "10.00");
        assert_eq!(recorded.member.mmb, "F24");
        assert_eq!(recorded.member.joined, Some(test_date(2024, 3, 15)));
        assert_eq!(recorded.member.paid_through, Some(test_date(2025, 3, 14)));
        Ok(())
    }

    #[tokio::test]
    async fn test_renewal_extends_from_paid_through() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Smith", "Jane").await?;
        record_remittance(&db, &form(member.id, "2024-03-15", "10.00", "")).await?;

        let renewed = record_remittance(&db, &form(member.id, "2025-01-10", "25.00", "")).await?;
        assert_eq!(renewed.member.mmb, "P26");
        assert_eq!(renewed.member.joined, Some(test_date(2024, 3, 15)));
        assert_eq!(renewed.member.paid_through, Some(test_date(2026, 3, 14)));
        Ok(())
    }

    #[tokio::test]
    async fn test_dues_and_donation_make_two_rows() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Smith", "Jane").await?;

        let recorded =
            record_remittance(&db, &form(member.id, "2024-03-15", "5.00", "1,000.00")).await?;
        let memos: Vec<_> = recorded.remittances.iter().map(|r| r.memo.as_str()).collect();
        assert_eq!(memos, [MEMO_DUES, MEMO_DONATION]);
        assert_eq!(recorded.remittances[1].amount, "1000.00");
        assert_eq!(recorded.member.mmb, "I24");

        let listed = get_remittances_for_member(&db, member.id).await?;
        assert_eq!(listed.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_donation_only_leaves_membership() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Smith", "Jane").await?;

        let recorded = record_remittance(&db, &form(member.id, "2024-03-15", "", "50.00")).await?;
        assert_eq!(recorded.remittances.len(), 1);
        assert_eq!(recorded.member.mmb, "VOL");
        assert_eq!(recorded.member.paid_through, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_lifetime_payment() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Smith", "Jane").await?;
        record_remittance(&db, &form(member.id, "2024-03-15", "10.00", "")).await?;

        let recorded = record_remittance(&db, &form(member.id, "2024-06-01", "100.00", "")).await?;
        assert_eq!(recorded.member.mmb, "LM");
        assert_eq!(recorded.member.joined, Some(test_date(2024, 3, 15)));
        assert_eq!(recorded.member.paid_through, None);

        let rejected = record_remittance(&db, &form(member.id, "2024-07-01", "10.00", "")).await;
        match rejected {
            Err(Error::Validation { errors, .. }) => {
                assert!(!errors.get("duesamount").is_empty());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        // Donations are still accepted from lifetime members.
        record_remittance(&db, &form(member.id, "2024-07-01", "", "10.00")).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_below_minimum_dues_recorded_without_change() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Smith", "Jane").await?;

        let recorded = record_remittance(&db, &form(member.id, "2024-03-15", "1.00", "")).await?;
        assert_eq!(recorded.remittances.len(), 1);
        assert_eq!(recorded.member.mmb, "VOL");
        assert_eq!(recorded.member.joined, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_submissions_write_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Smith", "Jane").await?;

        for bad in [
            form(member.id, "2024-03-15", "0.00", "0.00"),
            form(member.id, "not a date", "10.00", ""),
            form(member.id, "2024-03-15", "10", ""),
        ] {
            let result = record_remittance(&db, &bad).await;
            assert!(matches!(result, Err(Error::Validation { .. })), "{bad:?}");
        }
        assert!(get_remittances_for_member(&db, member.id).await?.is_empty());

        let missing = record_remittance(&db, &form(4242, "2024-03-15", "10.00", "")).await;
        assert!(matches!(missing, Err(Error::MemberNotFound { id: 4242 })));

        let blank = RemittanceFormData {
            memberid: String::new(),
            ..form(member.id, "2024-03-15", "10.00", "")
        };
        let result = record_remittance(&db, &blank).await;
        assert!(matches!(result, Err(Error::MissingIdentifier { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_inactive_members_can_remit() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Smith", "Jane").await?;
        set_member_active(&db, member.id, false).await?;

        let recorded = record_remittance(&db, &form(member.id, "2024-01-01", "2.00", "")).await?;
        assert_eq!(recorded.member.mmb, "S24");
        assert!(!recorded.member.is_active);
        Ok(())
    }
}
