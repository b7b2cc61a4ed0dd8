//! Note business logic - dated free-text notes attached to a member.

use crate::{
    core::{forms::NoteFormData, member::require_member},
    entities::{Note, note},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Adds a note to an existing member.
#[instrument(skip(db, body))]
pub async fn create_note(
    db: &DatabaseConnection,
    member_id: i64,
    date: NaiveDate,
    body: String,
) -> Result<note::Model> {
    require_member(db, member_id).await?;

    let created = note::ActiveModel {
        member_id: Set(member_id),
        date: Set(date),
        body: Set(body),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!(note_id = created.id, "Created note");
    Ok(created)
}

/// Validates a new-note form and saves it.
pub async fn create_note_from_form(
    db: &DatabaseConnection,
    form: &NoteFormData,
) -> Result<note::Model> {
    let input = form.validate_new()?;
    create_note(db, input.id, input.date, input.body).await
}

/// Finds a note by id.
pub async fn get_note_by_id(db: &DatabaseConnection, note_id: i64) -> Result<Option<note::Model>> {
    Note::find_by_id(note_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Validates a note edit and rewrites the date and body of the note.
/// The owning member is never changed.
#[instrument(skip(db, form), fields(note = %form.noteid))]
pub async fn edit_note(db: &DatabaseConnection, form: &NoteFormData) -> Result<note::Model> {
    let input = form.validate_edit()?;
    let existing = get_note_by_id(db, input.id)
        .await?
        .ok_or(Error::NoteNotFound { id: input.id })?;

    let mut model: note::ActiveModel = existing.into();
    model.date = Set(input.date);
    model.body = Set(input.body);
    model.update(db).await.map_err(Into::into)
}

/// All notes of a member, newest first.
pub async fn get_notes_for_member(
    db: &DatabaseConnection,
    member_id: i64,
) -> Result<Vec<note::Model>> {
    Note::find()
        .filter(note::Column::MemberId.eq(member_id))
        .order_by_desc(note::Column::Date)
        .order_by_desc(note::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_and_list_notes() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Smith", "Jane").await?;

        create_note(&db, member.id, test_date(2024, 1, 5), "first".to_string()).await?;
        create_note(&db, member.id, test_date(2024, 2, 1), "second".to_string()).await?;
        create_note(&db, member.id, test_date(2024, 1, 5), "third".to_string()).await?;

        let bodies: Vec<_> = get_notes_for_member(&db, member.id)
            .await?
            .into_iter()
            .map(|n| n.body)
            .collect();
        assert_eq!(bodies, ["second", "third", "first"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_note_from_form() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Smith", "Jane").await?;

        let form = NoteFormData {
            memberid: member.id.to_string(),
            date: "2024-04-01".to_string(),
            note: "  Called about renewal ".to_string(),
            ..NoteFormData::default()
        };
        let note = create_note_from_form(&db, &form).await?;
        assert_eq!(note.body, "Called about renewal");
        assert_eq!(note.member_id, member.id);

        let orphan = NoteFormData {
            memberid: "999".to_string(),
            ..form
        };
        let result = create_note_from_form(&db, &orphan).await;
        assert!(matches!(result, Err(Error::MemberNotFound { id: 999 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_note() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Smith", "Jane").await?;
        let note = create_note(&db, member.id, test_date(2024, 1, 5), "draft".to_string()).await?;

        let form = NoteFormData {
            noteid: note.id.to_string(),
            date: "2024-01-06".to_string(),
            note: "final".to_string(),
            ..NoteFormData::default()
        };
        let edited = edit_note(&db, &form).await?;
        assert_eq!(edited.id, note.id);
        assert_eq!(edited.member_id, member.id);
        assert_eq!(edited.date, test_date(2024, 1, 6));
        assert_eq!(edited.body, "final");

        let missing = NoteFormData {
            noteid: "777".to_string(),
            ..form.clone()
        };
        assert!(matches!(
            edit_note(&db, &missing).await,
            Err(Error::NoteNotFound { id: 777 })
        ));

        let blank = NoteFormData {
            noteid: String::new(),
            ..form
        };
        assert!(matches!(
            edit_note(&db, &blank).await,
            Err(Error::MissingIdentifier { .. })
        ));
        Ok(())
    }
}
