//! Core business logic - framework-agnostic roster operations.
//!
//! The derivation modules (`dues`, `span`, `membership`, `contact`, `names`)
//! are pure functions over plain values. The record modules (`member`,
//! `remittance`, `note`, `roster`) apply them against the database.

/// Contact-validity derivation for postal mail, email and newsletter channel
pub mod contact;
/// Dues amount classification
pub mod dues;
/// Form submissions and their validation
pub mod forms;
/// Member records
pub mod member;
/// Membership state transitions driven by dues payments
pub mod membership;
/// Name case normalization
pub mod names;
/// Dated member notes
pub mod note;
/// Roster listing filters, ordering and paging
pub mod query;
/// Dues and donation records
pub mod remittance;
/// Roster display rows
pub mod roster;
/// Paid-through date arithmetic
pub mod span;
/// Membership tier codes
pub mod tier;
