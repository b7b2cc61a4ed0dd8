//! Dues classification - maps a remittance amount to a membership tier band.
//!
//! The amount is a currency string with two fractional digits (`"25.00"`). It is
//! compared in whole cents against a descending threshold ladder; the first band
//! the amount reaches wins. Anything that does not parse as a number reaches no
//! band and classifies as [`BaseTier::Vol`].

use crate::core::tier::BaseTier;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Threshold ladder in cents, highest first.
const DUES_LADDER: [(i64, BaseTier); 5] = [
    (10_000, BaseTier::Lm),
    (2_500, BaseTier::P),
    (1_000, BaseTier::F),
    (500, BaseTier::I),
    (200, BaseTier::S),
];

/// Parses a currency string into a decimal amount, ignoring surrounding whitespace.
#[must_use]
pub fn parse_amount(amount: &str) -> Option<Decimal> {
    Decimal::from_str(amount.trim()).ok()
}

/// Converts a currency amount to whole cents, truncating sub-cent digits.
///
/// Returns `None` when the amount is too large to scale.
#[must_use]
pub fn to_cents(amount: Decimal) -> Option<Decimal> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|cents| cents.trunc())
}

/// Classifies a dues amount into the tier band it pays for.
#[must_use]
pub fn classify(amount: &str) -> BaseTier {
    let Some(amount) = parse_amount(amount) else {
        return BaseTier::Vol;
    };
    if amount.is_sign_negative() {
        return BaseTier::Vol;
    }
    classify_cents(to_cents(amount).unwrap_or(Decimal::MAX))
}

/// Classifies an amount already expressed in cents.
#[must_use]
pub fn classify_cents(cents: Decimal) -> BaseTier {
    DUES_LADDER
        .iter()
        .find(|(threshold, _)| cents >= Decimal::from(*threshold))
        .map_or(BaseTier::Vol, |(_, tier)| *tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_band_edges() {
        assert_eq!(classify("100.00"), BaseTier::Lm);
        assert_eq!(classify("99.99"), BaseTier::P);
        assert_eq!(classify("25.00"), BaseTier::P);
        assert_eq!(classify("24.99"), BaseTier::F);
        assert_eq!(classify("10.00"), BaseTier::F);
        assert_eq!(classify("9.99"), BaseTier::I);
        assert_eq!(classify("5.00"), BaseTier::I);
        assert_eq!(classify("4.99"), BaseTier::S);
        assert_eq!(classify("2.00"), BaseTier::S);
        assert_eq!(classify("1.99"), BaseTier::Vol);
        assert_eq!(classify("0.00"), BaseTier::Vol);
    }

    #[test]
    fn test_classify_cents_ladder() {
        assert_eq!(classify_cents(Decimal::from(10_000)), BaseTier::Lm);
        assert_eq!(classify_cents(Decimal::from(9_999)), BaseTier::P);
        assert_eq!(classify_cents(Decimal::from(2_500)), BaseTier::P);
        assert_eq!(classify_cents(Decimal::from(2_499)), BaseTier::F);
        assert_eq!(classify_cents(Decimal::from(199)), BaseTier::Vol);
    }

    #[test]
    fn test_classify_is_monotonic() {
        let mut previous = classify_cents(Decimal::from(20_000));
        for cents in (0..20_000).rev() {
            let current = classify_cents(Decimal::from(cents));
            assert!(current.dues_rank() <= previous.dues_rank(), "{cents} cents");
            previous = current;
        }
    }

    #[test]
    fn test_classify_non_numeric_is_vol() {
        assert_eq!(classify("abc"), BaseTier::Vol);
        assert_eq!(classify(""), BaseTier::Vol);
        assert_eq!(classify("NaN"), BaseTier::Vol);
    }

    #[test]
    fn test_classify_negative_and_huge_amounts() {
        assert_eq!(classify("-50.00"), BaseTier::Vol);
        assert_eq!(classify("79228162514264337593543950335"), BaseTier::Lm);
    }

    #[test]
    fn test_classify_trims_whitespace() {
        assert_eq!(classify(" 25.00 "), BaseTier::P);
    }
}
