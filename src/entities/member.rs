//! Member entity - one person or organization on the roster.
//!
//! Names are stored as entered; case normalization happens only when the roster
//! is rendered. Mailing fields, email and phone are optional. The contact status
//! columns (`valid_post_mail`, `valid_email`, `newsletter_type`) are derived by
//! [`crate::core::contact`] and the membership columns (`mmb`, `joined`,
//! `paid_through`) by [`crate::core::membership`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Postal mail deliverability for a member's mailing address
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PostMailStatus {
    /// Complete address believed deliverable
    #[sea_orm(string_value = "valid")]
    Valid,
    /// No usable address on file
    #[sea_orm(string_value = "none")]
    Absent,
    /// Mail to the address came back
    #[sea_orm(string_value = "returned mail")]
    ReturnedMail,
}

/// Deliverability of a member's email address
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum EmailStatus {
    /// No email on file
    #[sea_orm(string_value = "none")]
    Absent,
    /// Confirmed working
    #[sea_orm(string_value = "verified")]
    Verified,
    /// Messages bounced
    #[sea_orm(string_value = "bounced")]
    Bounced,
    /// Present but never confirmed
    #[sea_orm(string_value = "unchecked")]
    Unchecked,
}

/// Channel the newsletter is delivered through
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum NewsletterType {
    /// Delivered by email
    #[sea_orm(string_value = "email")]
    Email,
    /// Not delivered
    #[sea_orm(string_value = "none")]
    NoChannel,
    /// Delivered by post
    #[sea_orm(string_value = "post")]
    Post,
    /// Member asked not to receive it
    #[sea_orm(string_value = "opted out")]
    OptedOut,
}

/// Member database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    /// Store-assigned identifier, immutable after creation
    #[sea_orm(primary_key)]
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    /// Street line of the mailing address
    pub address: Option<String>,
    pub unit: Option<String>,
    pub city: Option<String>,
    /// State or region
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Membership tier code, e.g. `VOL`, `F26`, `LM`
    pub mmb: String,
    /// Date the member first became a paying or recognized member
    pub joined: Option<Date>,
    /// Last day covered by dues; only set for dues-bearing tiers
    pub paid_through: Option<Date>,
    /// Roster visibility flag
    pub is_active: bool,
    pub valid_post_mail: PostMailStatus,
    pub valid_email: EmailStatus,
    pub newsletter_type: NewsletterType,
    /// When the record was last written
    pub last_updated: DateTimeUtc,
}

/// Defines relationships between Member and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One member has many remittances
    #[sea_orm(has_many = "super::remittance::Entity")]
    Remittances,
    /// One member has many notes
    #[sea_orm(has_many = "super::note::Entity")]
    Notes,
}

impl Related<super::remittance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Remittances.def()
    }
}

impl Related<super::note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
