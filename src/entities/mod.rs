//! Entity module - Contains all SeaORM entity definitions for the roster database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod member;
pub mod note;
pub mod remittance;

// Re-export specific types to avoid conflicts
pub use member::{
    Column as MemberColumn, EmailStatus, Entity as Member, Model as MemberModel, NewsletterType,
    PostMailStatus,
};
pub use note::{Column as NoteColumn, Entity as Note, Model as NoteModel};
pub use remittance::{Column as RemittanceColumn, Entity as Remittance, Model as RemittanceModel};
