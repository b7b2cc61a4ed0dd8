//! Member business logic - create, read, update, delete and list roster members.
//!
//! Contact statuses are re-derived on every create and edit through
//! [`crate::core::contact`]; membership columns are only written here for the
//! initial tier of a new member. Listings take an explicit [`MemberQuery`].

use crate::{
    core::{
        contact::{
            ContactFields, ContactStatus, MailingAddress, initial_contact_validity,
            next_contact_validity,
        },
        forms::{ContactInput, MemberEdits, MemberFormData, NewMemberInput},
        membership::MembershipState,
        query::{MemberQuery, Page, page_count},
        tier::TierCode,
    },
    entities::{Member, Note, Remittance, member, note, remittance},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// Parses the stored tier code of `member`.
pub fn member_tier(member: &member::Model) -> Result<TierCode> {
    member.mmb.parse()
}

/// The membership columns of `member`.
pub fn membership_state(member: &member::Model) -> Result<MembershipState> {
    Ok(MembershipState {
        tier: member_tier(member)?,
        joined: member.joined,
        paid_through: member.paid_through,
    })
}

/// Finds a member by id, returning `None` if there is none.
pub async fn get_member_by_id<C>(db: &C, member_id: i64) -> Result<Option<member::Model>>
where
    C: ConnectionTrait,
{
    Member::find_by_id(member_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a member by id, failing with [`Error::MemberNotFound`] if there is none.
pub async fn require_member<C>(db: &C, member_id: i64) -> Result<member::Model>
where
    C: ConnectionTrait,
{
    get_member_by_id(db, member_id)
        .await?
        .ok_or(Error::MemberNotFound { id: member_id })
}

/// Inserts a validated new member. The record starts active, with statuses from
/// the creation path of the contact derivation.
#[instrument(skip(db, input), fields(last_name = %input.contact.last_name))]
pub async fn create_member(db: &DatabaseConnection, input: NewMemberInput) -> Result<member::Model> {
    let NewMemberInput {
        contact,
        tier,
        joined,
    } = input;
    let status = initial_contact_validity(ContactFields {
        address: &contact.address,
        email: contact.email.as_deref(),
    });

    let model = member::ActiveModel {
        last_name: Set(contact.last_name),
        first_name: Set(contact.first_name),
        address: Set(contact.address.address),
        unit: Set(contact.address.unit),
        city: Set(contact.address.city),
        state: Set(contact.address.state),
        postal_code: Set(contact.address.postal_code),
        email: Set(contact.email),
        phone: Set(contact.phone),
        mmb: Set(tier.to_string()),
        joined: Set(joined),
        paid_through: Set(None),
        is_active: Set(true),
        valid_post_mail: Set(status.valid_post_mail),
        valid_email: Set(status.valid_email),
        newsletter_type: Set(status.newsletter_type),
        last_updated: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    info!(member_id = created.id, "Created member");
    Ok(created)
}

/// Validates a create form and inserts the member.
pub async fn create_member_from_form(
    db: &DatabaseConnection,
    form: &MemberFormData,
) -> Result<member::Model> {
    let input = form.validate_new()?;
    create_member(db, input).await
}

/// Applies validated contact fields to an existing member, re-deriving the
/// postal, email and newsletter statuses from what was on file.
#[instrument(skip(db, contact))]
pub async fn update_member_contact(
    db: &DatabaseConnection,
    member_id: i64,
    contact: ContactInput,
) -> Result<member::Model> {
    let prior = require_member(db, member_id).await?;
    let prior_address = MailingAddress::of(&prior);
    let status = next_contact_validity(
        ContactStatus::of(&prior),
        ContactFields {
            address: &prior_address,
            email: prior.email.as_deref(),
        },
        ContactFields {
            address: &contact.address,
            email: contact.email.as_deref(),
        },
    );
    debug!(?status, "Derived contact statuses");

    let mut model: member::ActiveModel = prior.into();
    model.last_name = Set(contact.last_name);
    model.first_name = Set(contact.first_name);
    model.address = Set(contact.address.address);
    model.unit = Set(contact.address.unit);
    model.city = Set(contact.address.city);
    model.state = Set(contact.address.state);
    model.postal_code = Set(contact.address.postal_code);
    model.email = Set(contact.email);
    model.phone = Set(contact.phone);
    model.valid_post_mail = Set(status.valid_post_mail);
    model.valid_email = Set(status.valid_email);
    model.newsletter_type = Set(status.newsletter_type);
    model.last_updated = Set(chrono::Utc::now());

    model.update(db).await.map_err(Into::into)
}

/// Validates an edit form and applies it to the member `member_id`.
pub async fn update_member(
    db: &DatabaseConnection,
    member_id: Option<i64>,
    form: &MemberFormData,
) -> Result<member::Model> {
    let member_id = member_id.ok_or(Error::MissingIdentifier {
        operation: "Updating a member",
    })?;
    let contact = form.validate_update()?;
    update_member_contact(db, member_id, contact).await
}

/// Applies a partial edit to the member `member_id`. Omitted fields keep their
/// stored value, so the member must exist before the form is validated.
pub async fn edit_member(
    db: &DatabaseConnection,
    member_id: Option<i64>,
    edits: MemberEdits,
) -> Result<member::Model> {
    let member_id = member_id.ok_or(Error::MissingIdentifier {
        operation: "Updating a member",
    })?;
    let existing = require_member(db, member_id).await?;
    update_member(db, Some(member_id), &edits.apply_to(&existing)).await
}

/// Shows or hides a member on the roster.
#[instrument(skip(db))]
pub async fn set_member_active(
    db: &DatabaseConnection,
    member_id: i64,
    is_active: bool,
) -> Result<member::Model> {
    let prior = require_member(db, member_id).await?;
    let mut model: member::ActiveModel = prior.into();
    model.is_active = Set(is_active);
    model.last_updated = Set(chrono::Utc::now());
    model.update(db).await.map_err(Into::into)
}

/// Deletes a member together with their remittances and notes.
///
/// Returns the number of member records removed (0 if the id did not exist).
#[instrument(skip(db))]
pub async fn delete_member(db: &DatabaseConnection, member_id: Option<i64>) -> Result<u64> {
    let member_id = member_id.ok_or(Error::MissingIdentifier {
        operation: "Deleting a member",
    })?;

    let txn = db.begin().await?;
    Remittance::delete_many()
        .filter(remittance::Column::MemberId.eq(member_id))
        .exec(&txn)
        .await?;
    Note::delete_many()
        .filter(note::Column::MemberId.eq(member_id))
        .exec(&txn)
        .await?;
    let result = Member::delete_by_id(member_id).exec(&txn).await?;
    txn.commit().await?;

    info!(rows = result.rows_affected, "Deleted member");
    Ok(result.rows_affected)
}

/// Fetches one page of members matching `query`, with the total match count.
#[instrument(skip(db))]
pub async fn list_members(db: &DatabaseConnection, query: &MemberQuery) -> Result<Page<member::Model>> {
    let limit = query.limit.max(1);
    let page = query.page.max(1);
    let paginator = query.select().paginate(db, limit);
    let total_count = paginator.num_items().await?;
    let data = paginator.fetch_page(page - 1).await?;

    debug!(returned = data.len(), total = total_count, "Fetched member page");
    Ok(Page {
        data,
        total_count,
        page,
        page_count: page_count(total_count, limit),
    })
}

/// Members whose last or first name contains `partial`, for lookups.
pub async fn suggest_members(
    db: &DatabaseConnection,
    partial: &str,
    limit: u64,
) -> Result<Vec<member::Model>> {
    let partial = partial.trim();
    let mut select = Member::find();
    if !partial.is_empty() {
        select = select.filter(
            sea_orm::Condition::any()
                .add(member::Column::LastName.contains(partial))
                .add(member::Column::FirstName.contains(partial)),
        );
    }
    select
        .order_by_asc(member::Column::LastName)
        .order_by_asc(member::Column::FirstName)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}
