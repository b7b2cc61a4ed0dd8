//! Remittance entity - one payment event recorded against a member.
//!
//! The amount is kept exactly as the currency string that was submitted
//! (e.g. `"25.00"`). The memo is `dues`, `donation`, or free text.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Memo recorded on dues payments
pub const MEMO_DUES: &str = "dues";
/// Memo recorded on donations
pub const MEMO_DONATION: &str = "donation";

/// Remittance database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "remittances")]
pub struct Model {
    /// Unique identifier, never reused
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Member who made the payment
    pub member_id: i64,
    /// Date of the payment
    pub date: Date,
    /// String-encoded currency amount
    pub amount: String,
    /// `dues`, `donation`, or free text
    pub memo: String,
}

/// Defines relationships between Remittance and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each remittance belongs to one member
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Member,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
