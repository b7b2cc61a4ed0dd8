//! Contact-validity derivation.
//!
//! Works out a member's postal validity, email validity and newsletter channel from
//! what was on file before an edit and what the edit submits. Blank strings count
//! as absent throughout.

use crate::entities::{EmailStatus, MemberModel, NewsletterType, PostMailStatus};
use serde::{Deserialize, Serialize};

/// Mailing address fields as stored on a member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailingAddress {
    /// Street line
    pub address: Option<String>,
    pub unit: Option<String>,
    pub city: Option<String>,
    /// State or region
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

/// Trims a field, mapping blank values to `None`.
#[must_use]
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl MailingAddress {
    /// The address currently on file for `member`.
    #[must_use]
    pub fn of(member: &MemberModel) -> Self {
        Self {
            address: member.address.clone(),
            unit: member.unit.clone(),
            city: member.city.clone(),
            state: member.state.clone(),
            postal_code: member.postal_code.clone(),
        }
    }

    /// Street, city, state and postal code are all filled in. Unit is optional.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.address, &self.city, &self.state, &self.postal_code]
            .into_iter()
            .all(|field| present(field.as_deref()).is_some())
    }

    fn fields(&self) -> [Option<&str>; 5] {
        [
            present(self.address.as_deref()),
            present(self.unit.as_deref()),
            present(self.city.as_deref()),
            present(self.state.as_deref()),
            present(self.postal_code.as_deref()),
        ]
    }

    /// Whether any field differs from `other`, ignoring surrounding whitespace.
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> bool {
        self.fields() != other.fields()
    }
}

/// The three derived contact columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactStatus {
    pub valid_post_mail: PostMailStatus,
    pub valid_email: EmailStatus,
    pub newsletter_type: NewsletterType,
}

impl ContactStatus {
    /// The statuses currently on file for `member`.
    #[must_use]
    pub const fn of(member: &MemberModel) -> Self {
        Self {
            valid_post_mail: member.valid_post_mail,
            valid_email: member.valid_email,
            newsletter_type: member.newsletter_type,
        }
    }
}

/// Contact details before or after an edit.
#[derive(Debug, Clone, Copy)]
pub struct ContactFields<'a> {
    pub address: &'a MailingAddress,
    pub email: Option<&'a str>,
}

/// Statuses for a newly created member.
#[must_use]
pub fn initial_contact_validity(contact: ContactFields<'_>) -> ContactStatus {
    let valid_post_mail = if contact.address.is_complete() {
        PostMailStatus::Valid
    } else {
        PostMailStatus::Absent
    };
    let valid_email = if present(contact.email).is_some() {
        EmailStatus::Unchecked
    } else {
        EmailStatus::Absent
    };
    let newsletter_type = if valid_email != EmailStatus::Absent {
        NewsletterType::Email
    } else if valid_post_mail == PostMailStatus::Valid {
        NewsletterType::Post
    } else {
        NewsletterType::NoChannel
    };

    ContactStatus {
        valid_post_mail,
        valid_email,
        newsletter_type,
    }
}

/// Statuses after an edit replaces `prior_fields` with `fields`.
#[must_use]
pub fn next_contact_validity(
    prior: ContactStatus,
    prior_fields: ContactFields<'_>,
    fields: ContactFields<'_>,
) -> ContactStatus {
    let address_changed = fields.address.differs_from(prior_fields.address);
    let email = present(fields.email);
    let email_changed = email != present(prior_fields.email);

    let valid_post_mail = next_post_mail(
        prior.valid_post_mail,
        prior_fields.address.is_complete(),
        fields.address.is_complete(),
        address_changed,
    );
    let valid_email = next_email(prior.valid_email, email.is_some(), email_changed);
    let newsletter_type = next_newsletter(
        prior.newsletter_type,
        NewsletterInputs {
            email_present: email.is_some(),
            address_changed,
            address_complete: fields.address.is_complete(),
            valid_post_mail,
            valid_email,
        },
    );

    ContactStatus {
        valid_post_mail,
        valid_email,
        newsletter_type,
    }
}

fn next_post_mail(
    prior: PostMailStatus,
    prior_complete: bool,
    complete: bool,
    changed: bool,
) -> PostMailStatus {
    if !complete {
        return PostMailStatus::Absent;
    }
    match prior {
        PostMailStatus::Absent if !prior_complete || changed => PostMailStatus::Valid,
        PostMailStatus::ReturnedMail if changed => PostMailStatus::Valid,
        unchanged => unchanged,
    }
}

fn next_email(prior: EmailStatus, has_email: bool, changed: bool) -> EmailStatus {
    match (has_email, prior) {
        (false, _) => EmailStatus::Absent,
        (true, EmailStatus::Absent) => EmailStatus::Unchecked,
        (true, _) if changed => EmailStatus::Unchecked,
        (true, unchanged) => unchanged,
    }
}

struct NewsletterInputs {
    email_present: bool,
    address_changed: bool,
    address_complete: bool,
    valid_post_mail: PostMailStatus,
    valid_email: EmailStatus,
}

fn next_newsletter(prior: NewsletterType, inputs: NewsletterInputs) -> NewsletterType {
    match prior {
        NewsletterType::OptedOut => NewsletterType::OptedOut,
        NewsletterType::NoChannel => NewsletterType::NoChannel,
        NewsletterType::Email if inputs.email_present => NewsletterType::Email,
        NewsletterType::Email => {
            if inputs.valid_post_mail == PostMailStatus::Valid {
                NewsletterType::Post
            } else {
                NewsletterType::NoChannel
            }
        }
        NewsletterType::Post if !inputs.address_changed => NewsletterType::Post,
        NewsletterType::Post => {
            if inputs.address_complete {
                NewsletterType::Post
            } else if matches!(
                inputs.valid_email,
                EmailStatus::Verified | EmailStatus::Unchecked
            ) {
                NewsletterType::Email
            } else {
                NewsletterType::NoChannel
            }
        }
    }
}
