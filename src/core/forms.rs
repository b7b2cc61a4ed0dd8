//! Form submissions: raw string fields in, validated input or a field-keyed error map out.
//!
//! Field names follow the HTML form conventions (`lname`, `postalcode`, `duesamount`, ...)
//! so error maps can be shown next to the inputs that produced them. A missing record
//! identifier is not a validation problem and is reported as
//! [`Error::MissingIdentifier`] instead.

use crate::core::contact::{MailingAddress, present};
use crate::core::dues::{parse_amount, to_cents};
use crate::core::tier::{BaseTier, TierCode};
use crate::entities::MemberModel;
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

/// Date format accepted in date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    /// Records a message against `field`.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Fields with errors, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.0.iter().map(|(field, messages)| (*field, messages.as_slice()))
    }

    fn into_result<T>(self, value: T, message: &str) -> Result<T> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(Error::validation(message, self))
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, messages)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

fn optional(value: &str) -> Option<String> {
    present(Some(value)).map(ToString::to_string)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Parses a required record identifier.
fn record_id(
    value: &str,
    field: &'static str,
    operation: &'static str,
    errors: &mut FormErrors,
) -> Result<Option<i64>> {
    let Some(value) = present(Some(value)) else {
        return Err(Error::MissingIdentifier { operation });
    };
    match value.parse::<i64>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            errors.add(field, "Invalid record identifier.");
            Ok(None)
        }
    }
}

/// Raw member create/edit submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFormData {
    pub lname: String,
    pub fname: String,
    pub address: String,
    pub unit: String,
    pub city: String,
    pub state: String,
    pub postalcode: String,
    pub email: String,
    pub phone: String,
    /// Initial tier, create only
    pub mmb: String,
    /// Initial joined date, create only
    pub joined: String,
}

/// Validated name and contact fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInput {
    pub last_name: String,
    pub first_name: String,
    pub address: MailingAddress,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Validated new-member submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMemberInput {
    pub contact: ContactInput,
    pub tier: TierCode,
    pub joined: Option<NaiveDate>,
}

impl MemberFormData {
    fn contact(&self, errors: &mut FormErrors) -> ContactInput {
        if optional(&self.lname).is_none() {
            errors.add("lname", "Please enter a last name.");
        }
        let email = optional(&self.email);
        if let Some(email) = &email {
            if !looks_like_email(email) {
                errors.add("email", "Please enter a valid email address.");
            }
        }

        ContactInput {
            last_name: self.lname.trim().to_string(),
            first_name: self.fname.trim().to_string(),
            address: MailingAddress {
                address: optional(&self.address),
                unit: optional(&self.unit),
                city: optional(&self.city),
                state: optional(&self.state),
                postal_code: optional(&self.postalcode),
            },
            email,
            phone: optional(&self.phone),
        }
    }

    /// Validates a create submission.
    ///
    /// The tier defaults to `VOL`. Only tiers that never take dues may be set here;
    /// dues-bearing tiers are reached by recording dues.
    pub fn validate_new(&self) -> Result<NewMemberInput> {
        let mut errors = FormErrors::default();
        let contact = self.contact(&mut errors);

        let tier = match optional(&self.mmb) {
            None => TierCode::default(),
            Some(code) => match code.parse::<TierCode>() {
                Ok(tier) if tier.base.is_dues_bearing() => {
                    errors.add(
                        "mmb",
                        "Paid tiers are set by recording a dues remittance.",
                    );
                    tier
                }
                Ok(tier) => tier,
                Err(_) => {
                    errors.add("mmb", format!("Unknown membership tier '{code}'."));
                    TierCode::default()
                }
            },
        };

        let joined = match optional(&self.joined) {
            None => None,
            Some(value) => {
                let date = parse_date(&value);
                if date.is_none() {
                    errors.add("joined", "Please enter a date as YYYY-MM-DD.");
                } else if tier.base == BaseTier::Vol {
                    errors.add("joined", "Volunteers have no joined date.");
                }
                date
            }
        };

        errors.into_result(
            NewMemberInput {
                contact,
                tier,
                joined,
            },
            "Missing or invalid fields. Failed to create member.",
        )
    }

    /// Validates an edit submission. Tier and joined date are not editable here.
    pub fn validate_update(&self) -> Result<ContactInput> {
        let mut errors = FormErrors::default();
        let contact = self.contact(&mut errors);
        errors.into_result(contact, "Missing or invalid fields. Failed to update member.")
    }
}

/// A partial member edit. `None` keeps the stored value and `"-"` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberEdits {
    pub lname: Option<String>,
    pub fname: Option<String>,
    pub address: Option<String>,
    pub unit: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postalcode: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

fn merged(submitted: Option<String>, stored: Option<&str>) -> String {
    match submitted {
        Some(value) if value.trim() == "-" => String::new(),
        Some(value) => value,
        None => stored.unwrap_or_default().to_string(),
    }
}

impl MemberEdits {
    /// The complete edit form these edits produce over `existing`.
    #[must_use]
    pub fn apply_to(self, existing: &MemberModel) -> MemberFormData {
        MemberFormData {
            lname: merged(self.lname, Some(&existing.last_name)),
            fname: merged(self.fname, Some(&existing.first_name)),
            address: merged(self.address, existing.address.as_deref()),
            unit: merged(self.unit, existing.unit.as_deref()),
            city: merged(self.city, existing.city.as_deref()),
            state: merged(self.state, existing.state.as_deref()),
            postalcode: merged(self.postalcode, existing.postal_code.as_deref()),
            email: merged(self.email, existing.email.as_deref()),
            phone: merged(self.phone, existing.phone.as_deref()),
            ..MemberFormData::default()
        }
    }
}

/// Raw remittance submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemittanceFormData {
    pub memberid: String,
    pub date: String,
    pub duesamount: String,
    pub donationamount: String,
}

/// Validated remittance submission. Zero amounts are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemittanceInput {
    pub member_id: i64,
    pub date: NaiveDate,
    /// Dues amount as submitted, when non-zero
    pub dues: Option<String>,
    /// Donation amount with thousands separators removed, when non-zero
    pub donation: Option<String>,
}

/// `digits.dd`, optionally with `,` between groups of three digits.
fn is_currency(value: &str, allow_separators: bool) -> bool {
    let is_digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
    let Some((whole, cents)) = value.split_once('.') else {
        return false;
    };
    if cents.len() != 2 || !is_digits(cents) {
        return false;
    }
    if !allow_separators || !whole.contains(',') {
        return is_digits(whole);
    }
    let mut groups = whole.split(',');
    groups
        .next()
        .is_some_and(|lead| lead.len() <= 3 && is_digits(lead))
        && groups.all(|group| group.len() == 3 && is_digits(group))
}

fn nonzero_amount(
    value: &str,
    field: &'static str,
    allow_separators: bool,
    errors: &mut FormErrors,
) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if !is_currency(value, allow_separators) {
        errors.add(field, "Please enter an amount like 25.00.");
        return None;
    }
    let normalized = value.replace(',', "");
    let Some(cents) = parse_amount(&normalized).and_then(to_cents) else {
        errors.add(field, "Amount is too large.");
        return None;
    };
    (!cents.is_zero()).then_some(normalized)
}

impl RemittanceFormData {
    /// Validates a remittance for a member currently holding `tier`.
    ///
    /// Lifetime members take no dues, so a dues amount for them is rejected.
    pub fn validate(&self, tier: TierCode) -> Result<RemittanceInput> {
        let mut errors = FormErrors::default();
        let member_id = record_id(&self.memberid, "memberid", "Recording a remittance", &mut errors)?;

        let date = parse_date(&self.date);
        if date.is_none() {
            errors.add("date", "Please enter a date as YYYY-MM-DD.");
        }

        let dues = nonzero_amount(&self.duesamount, "duesamount", false, &mut errors);
        if dues.is_some() && tier.base.is_lifetime() {
            errors.add("duesamount", "Lifetime members do not pay dues.");
        }
        let donation = nonzero_amount(&self.donationamount, "donationamount", true, &mut errors);

        if errors.is_empty() && dues.is_none() && donation.is_none() {
            errors.add("duesamount", "Please enter a dues or donation amount.");
        }

        match (member_id, date) {
            (Some(member_id), Some(date)) => errors.into_result(
                RemittanceInput {
                    member_id,
                    date,
                    dues,
                    donation,
                },
                "Missing or invalid fields. Failed to record remittance.",
            ),
            _ => Err(Error::validation(
                "Missing or invalid fields. Failed to record remittance.",
                errors,
            )),
        }
    }
}

/// Raw note create/edit submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFormData {
    pub memberid: String,
    /// Only used when editing
    pub noteid: String,
    pub date: String,
    pub note: String,
}

/// Validated note fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInput {
    /// Member on create, note on edit
    pub id: i64,
    pub date: NaiveDate,
    pub body: String,
}

impl NoteFormData {
    fn validate_with(
        &self,
        id_value: &str,
        id_field: &'static str,
        operation: &'static str,
    ) -> Result<NoteInput> {
        let mut errors = FormErrors::default();
        let id = record_id(id_value, id_field, operation, &mut errors)?;

        let date = parse_date(&self.date);
        if date.is_none() {
            errors.add("date", "Please enter a date as YYYY-MM-DD.");
        }
        let body = self.note.trim().to_string();
        if body.is_empty() {
            errors.add("note", "Please enter a note.");
        }

        let message = "Missing or invalid fields. Failed to save note.";
        match (id, date) {
            (Some(id), Some(date)) => errors.into_result(NoteInput { id, date, body }, message),
            _ => Err(Error::validation(message, errors)),
        }
    }

    /// Validates a new note; `id` of the result is the member id.
    pub fn validate_new(&self) -> Result<NoteInput> {
        self.validate_with(&self.memberid, "memberid", "Creating a note")
    }

    /// Validates a note edit; `id` of the result is the note id.
    pub fn validate_edit(&self) -> Result<NoteInput> {
        self.validate_with(&self.noteid, "noteid", "Editing a note")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn member_form() -> MemberFormData {
        MemberFormData {
            lname: " smith ".to_string(),
            fname: "jane".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            postalcode: "62701".to_string(),
            email: "jane@example.org".to_string(),
            ..MemberFormData::default()
        }
    }

    fn validation_errors(result: Result<impl fmt::Debug>) -> FormErrors {
        match result {
            Err(Error::Validation { errors, .. }) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_new_member_defaults_to_volunteer() {
        let input = member_form().validate_new().unwrap();
        assert_eq!(input.tier, TierCode::default());
        assert_eq!(input.joined, None);
        assert_eq!(input.contact.last_name, "smith");
        assert_eq!(input.contact.address.unit, None);
        assert!(input.contact.address.is_complete());
    }

    #[test]
    fn test_new_member_lifetime_tier_with_joined() {
        let form = MemberFormData {
            mmb: "HLM".to_string(),
            joined: "1999-04-01".to_string(),
            ..member_form()
        };
        let input = form.validate_new().unwrap();
        assert_eq!(input.tier, TierCode::bare(BaseTier::Hlm));
        assert_eq!(input.joined, NaiveDate::from_ymd_opt(1999, 4, 1));
    }

    #[test]
    fn test_new_member_errors_are_keyed_by_field() {
        let form = MemberFormData {
            lname: "   ".to_string(),
            email: "not-an-email".to_string(),
            mmb: "F26".to_string(),
            ..member_form()
        };
        let errors = validation_errors(form.validate_new());
        assert_eq!(errors.get("lname").len(), 1);
        assert_eq!(errors.get("email").len(), 1);
        assert_eq!(errors.get("mmb").len(), 1);
        assert!(errors.get("fname").is_empty());
    }

    #[test]
    fn test_volunteer_cannot_have_joined_date() {
        let form = MemberFormData {
            joined: "2024-01-01".to_string(),
            ..member_form()
        };
        let errors = validation_errors(form.validate_new());
        assert_eq!(errors.get("joined"), ["Volunteers have no joined date.".to_string()]);
    }

    #[test]
    fn test_email_shapes() {
        assert!(looks_like_email("a@b.org"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.org"));
        assert!(!looks_like_email("a b@c.org"));
        assert!(!looks_like_email("a@@b.org"));
    }

    fn remittance_form(dues: &str, donation: &str) -> RemittanceFormData {
        RemittanceFormData {
            memberid: "7".to_string(),
            date: "2024-06-01".to_string(),
            duesamount: dues.to_string(),
            donationamount: donation.to_string(),
        }
    }

    #[test]
    fn test_remittance_drops_zero_amounts() {
        let input = remittance_form("25.00", "0.00")
            .validate(TierCode::default())
            .unwrap();
        assert_eq!(input.member_id, 7);
        assert_eq!(input.dues.as_deref(), Some("25.00"));
        assert_eq!(input.donation, None);
    }

    #[test]
    fn test_remittance_donation_separators() {
        let input = remittance_form("", "1,250.00")
            .validate(TierCode::default())
            .unwrap();
        assert_eq!(input.donation.as_deref(), Some("1250.00"));
        assert_eq!(input.dues, None);
    }

    #[test]
    fn test_remittance_requires_some_amount() {
        let errors = validation_errors(remittance_form("0.00", "0.00").validate(TierCode::default()));
        assert_eq!(errors.get("duesamount").len(), 1);
    }

    #[test]
    fn test_remittance_amount_pattern() {
        let errors = validation_errors(remittance_form("25", "1,0.5").validate(TierCode::default()));
        assert_eq!(errors.get("duesamount").len(), 1);
        assert_eq!(errors.get("donationamount").len(), 1);

        let errors = validation_errors(remittance_form("1,000.00", "").validate(TierCode::default()));
        assert_eq!(errors.get("duesamount").len(), 1);
    }

    #[test]
    fn test_remittance_separator_grouping() {
        for accepted in ["1,000.00", "12,345,678.90", "999.00"] {
            let input = remittance_form("", accepted)
                .validate(TierCode::default())
                .unwrap();
            assert_eq!(input.donation, Some(accepted.replace(',', "")), "{accepted}");
        }
        for rejected in [",5.00", "1,,,0.00", "1,00.00", "1000,000.00", "1,000,.00", "5,.00"] {
            let errors =
                validation_errors(remittance_form("", rejected).validate(TierCode::default()));
            assert_eq!(errors.get("donationamount").len(), 1, "{rejected}");
        }
    }

    #[test]
    fn test_oversized_amount_is_rejected_not_dropped() {
        let errors = validation_errors(
            remittance_form("99999999999999999999999999999.00", "5.00")
                .validate(TierCode::default()),
        );
        assert_eq!(errors.get("duesamount"), ["Amount is too large.".to_string()]);
        assert!(errors.get("donationamount").is_empty());
    }

    #[test]
    fn test_lifetime_members_take_no_dues() {
        let tier = TierCode::bare(BaseTier::Ben);
        let errors = validation_errors(remittance_form("10.00", "").validate(tier));
        assert_eq!(errors.get("duesamount"), ["Lifetime members do not pay dues.".to_string()]);

        let input = remittance_form("0.00", "50.00").validate(tier).unwrap();
        assert_eq!(input.donation.as_deref(), Some("50.00"));
    }

    #[test]
    fn test_remittance_bad_date() {
        let errors = validation_errors(RemittanceFormData {
            date: "2024-13-01".to_string(),
            ..remittance_form("10.00", "")
        }
        .validate(TierCode::default()));
        assert_eq!(errors.get("date").len(), 1);
    }

    #[test]
    fn test_missing_identifier_is_fatal() {
        let result = RemittanceFormData {
            memberid: "  ".to_string(),
            ..remittance_form("10.00", "")
        }
        .validate(TierCode::default());
        assert!(matches!(result, Err(Error::MissingIdentifier { .. })));

        let result = NoteFormData {
            date: "2024-01-01".to_string(),
            note: "hello".to_string(),
            ..NoteFormData::default()
        }
        .validate_edit();
        assert!(matches!(result, Err(Error::MissingIdentifier { .. })));
    }

    #[test]
    fn test_note_validation() {
        let form = NoteFormData {
            memberid: "3".to_string(),
            noteid: String::new(),
            date: "2024-02-03".to_string(),
            note: "  Called about renewal  ".to_string(),
        };
        let input = form.validate_new().unwrap();
        assert_eq!(input.id, 3);
        assert_eq!(input.body, "Called about renewal");

        let errors = validation_errors(
            NoteFormData {
                note: " ".to_string(),
                ..form
            }
            .validate_new(),
        );
        assert_eq!(errors.get("note").len(), 1);
    }

    #[test]
    fn test_form_errors_display() {
        let mut errors = FormErrors::default();
        errors.add("lname", "Please enter a last name.");
        errors.add("email", "Please enter a valid email address.");
        assert_eq!(
            errors.to_string(),
            "email: Please enter a valid email address.; lname: Please enter a last name."
        );
    }
}
