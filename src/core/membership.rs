//! Membership state derivation.
//!
//! Given a member's current tier and dates and a new dues remittance, works out the
//! next tier code, joined date and paid-through date. The transition table is keyed
//! on the member's [`Standing`] and the [`Payment`] band the dues amount reaches:
//!
//! | standing \ payment | below minimum | `LM` band | `S`/`I`/`F`/`P` band |
//! |---|---|---|---|
//! | lifetime | unchanged | unchanged | unchanged |
//! | volunteer | unchanged | `LM`, joined today | band + joined year, joined today, new span from today |
//! | paid | unchanged | `LM`, joined kept | band + paid-through year, joined kept, span extended or restarted |
//!
//! Lifetime tiers never carry a paid-through date.

use crate::core::dues;
use crate::core::span::{day_after, end_of_year_span};
use crate::core::tier::{BaseTier, TierCode};
use crate::errors::Result;
use chrono::NaiveDate;
use tracing::debug;

/// The membership columns of a member record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MembershipState {
    /// Tier code (`mmb`)
    pub tier: TierCode,
    /// First became a paying or recognized member
    pub joined: Option<NaiveDate>,
    /// Last day covered by dues
    pub paid_through: Option<NaiveDate>,
}

/// Where a member stands before the payment is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    /// `LM`, `HLM`, `BEN`
    Lifetime,
    /// `VOL`, no dues history
    Volunteer,
    /// Any dues-bearing tier
    Paid,
}

impl Standing {
    /// Standing implied by a tier code.
    #[must_use]
    pub const fn of(tier: TierCode) -> Self {
        if tier.base.is_lifetime() {
            Self::Lifetime
        } else if tier.base.is_dues_bearing() {
            Self::Paid
        } else {
            Self::Volunteer
        }
    }
}

/// What a dues amount pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payment {
    /// Classifies as `VOL`; derives no tier change
    BelowMinimum,
    /// Reaches the lifetime band
    Lifetime,
    /// Reaches one of the dues-bearing bands
    Band(BaseTier),
}

impl Payment {
    /// Classifies a dues amount string.
    #[must_use]
    pub fn classify(amount: &str) -> Self {
        match dues::classify(amount) {
            BaseTier::Vol => Self::BelowMinimum,
            BaseTier::Lm | BaseTier::Hlm | BaseTier::Ben => Self::Lifetime,
            band => Self::Band(band),
        }
    }
}

/// Applies a dues remittance of `dues_amount` made on `remittance_date`.
///
/// Only dues go through here; donations never affect membership.
pub fn next_membership_state(
    current: &MembershipState,
    remittance_date: NaiveDate,
    dues_amount: &str,
) -> Result<MembershipState> {
    let standing = Standing::of(current.tier);
    let payment = Payment::classify(dues_amount);

    let next = match (standing, payment) {
        (Standing::Lifetime, _) | (_, Payment::BelowMinimum) => *current,
        (Standing::Volunteer, Payment::Lifetime) => MembershipState {
            tier: TierCode::bare(BaseTier::Lm),
            joined: Some(remittance_date),
            paid_through: None,
        },
        (Standing::Paid, Payment::Lifetime) => MembershipState {
            tier: TierCode::bare(BaseTier::Lm),
            joined: current.joined,
            paid_through: None,
        },
        (Standing::Volunteer, Payment::Band(band)) => {
            // A first payment is suffixed with the year joined, not the year it runs to.
            let paid_through = end_of_year_span(remittance_date)?;
            MembershipState {
                tier: TierCode::of_year(band, remittance_date),
                joined: Some(remittance_date),
                paid_through: Some(paid_through),
            }
        }
        (Standing::Paid, Payment::Band(band)) => {
            let span_start = match current.paid_through {
                Some(prior) if remittance_date <= prior => day_after(prior)?,
                _ => remittance_date,
            };
            let paid_through = end_of_year_span(span_start)?;
            MembershipState {
                tier: TierCode::of_year(band, paid_through),
                joined: current.joined,
                paid_through: Some(paid_through),
            }
        }
    };

    debug!(
        from = %current.tier,
        to = %next.tier,
        ?standing,
        ?payment,
        "Derived membership state"
    );
    Ok(next)
}
