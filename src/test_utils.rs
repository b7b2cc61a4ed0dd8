//! Shared test utilities for `RosterBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test members with sensible defaults.

use crate::{
    core::{
        forms::{MemberFormData, RemittanceFormData},
        member,
        remittance::{self, RecordedRemittance},
    },
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A complete create form for the given name.
///
/// # Defaults
/// * address: 1 Main St, Springfield IL 62701
/// * email: `first.last@example.org`
/// * tier: VOL (left blank)
pub fn test_member_form(last_name: &str, first_name: &str) -> MemberFormData {
    MemberFormData {
        lname: last_name.to_string(),
        fname: first_name.to_string(),
        address: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        postalcode: "62701".to_string(),
        email: format!(
            "{}.{}@example.org",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        ..MemberFormData::default()
    }
}

/// Creates an active volunteer member with a complete address and an email.
pub async fn create_test_member(
    db: &DatabaseConnection,
    last_name: &str,
    first_name: &str,
) -> Result<entities::member::Model> {
    member::create_member_from_form(db, &test_member_form(last_name, first_name)).await
}

/// Records a dues-only remittance.
pub async fn record_test_dues(
    db: &DatabaseConnection,
    member_id: i64,
    amount: &str,
    date: NaiveDate,
) -> Result<RecordedRemittance> {
    remittance::record_remittance(
        db,
        &RemittanceFormData {
            memberid: member_id.to_string(),
            date: date.format(crate::core::forms::DATE_FORMAT).to_string(),
            duesamount: amount.to_string(),
            donationamount: String::new(),
        },
    )
    .await
}

/// Shorthand for a calendar date.
///
/// # Panics
/// If the date does not exist.
#[allow(clippy::unwrap_used)]
pub fn test_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
