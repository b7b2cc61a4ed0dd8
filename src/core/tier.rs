//! Membership tier codes (`mmb`).
//!
//! A code is a base tier optionally followed by a two-digit year,
//! e.g. `F26`. Only the dues-bearing bands (`S`, `I`, `F`, `P`) carry a year.

use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base membership category, without the year suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseTier {
    /// Volunteer, no dues
    Vol,
    /// Lowest dues band
    S,
    /// Individual dues band
    I,
    /// Family dues band
    F,
    /// Patron dues band
    P,
    /// Lifetime member
    Lm,
    /// Honorary lifetime member
    Hlm,
    /// Benefactor, shown as lifetime
    Ben,
}

impl BaseTier {
    /// Every base tier, in ascending dues order.
    pub const ALL: [Self; 8] = [
        Self::Vol,
        Self::S,
        Self::I,
        Self::F,
        Self::P,
        Self::Lm,
        Self::Hlm,
        Self::Ben,
    ];

    /// The code as stored, without year.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Vol => "VOL",
            Self::S => "S",
            Self::I => "I",
            Self::F => "F",
            Self::P => "P",
            Self::Lm => "LM",
            Self::Hlm => "HLM",
            Self::Ben => "BEN",
        }
    }

    /// The code as shown on the roster. Benefactors are listed as lifetime members.
    #[must_use]
    pub const fn display_code(self) -> &'static str {
        match self {
            Self::Ben => "LM",
            other => other.code(),
        }
    }

    /// Lifetime and honorary tiers never renew and never take dues.
    #[must_use]
    pub const fn is_lifetime(self) -> bool {
        matches!(self, Self::Lm | Self::Hlm | Self::Ben)
    }

    /// Tiers that expire and therefore carry a paid-through date and year suffix.
    #[must_use]
    pub const fn is_dues_bearing(self) -> bool {
        matches!(self, Self::S | Self::I | Self::F | Self::P)
    }

    /// Position on the dues ladder; higher pays more.
    #[must_use]
    pub const fn dues_rank(self) -> u8 {
        match self {
            Self::Vol => 0,
            Self::S => 1,
            Self::I => 2,
            Self::F => 3,
            Self::P => 4,
            Self::Lm | Self::Hlm | Self::Ben => 5,
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.code() == code)
    }
}

impl fmt::Display for BaseTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A full tier code: base tier plus optional two-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TierCode {
    /// Base category
    pub base: BaseTier,
    /// Last two digits of the year joined (first payment) or paid through (renewal),
    /// for dues-bearing tiers
    pub year: Option<u8>,
}

impl TierCode {
    /// A code with no year suffix.
    #[must_use]
    pub const fn bare(base: BaseTier) -> Self {
        Self { base, year: None }
    }

    /// The code for `base` suffixed with the year of `date`.
    ///
    /// Dues-bearing tiers take the last two digits of the year; all others stay bare.
    #[must_use]
    pub fn of_year(base: BaseTier, date: NaiveDate) -> Self {
        if !base.is_dues_bearing() {
            return Self::bare(base);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let year = date.year().rem_euclid(100) as u8;
        Self {
            base,
            year: Some(year),
        }
    }

    /// Code as shown on the roster (`BEN` appears as `LM`).
    #[must_use]
    pub fn display(&self) -> String {
        match self.year {
            Some(year) => format!("{}{year:02}", self.base.display_code()),
            None => self.base.display_code().to_string(),
        }
    }
}

impl Default for TierCode {
    fn default() -> Self {
        Self::bare(BaseTier::Vol)
    }
}

impl fmt::Display for TierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{}{year:02}", self.base.code()),
            None => f.write_str(self.base.code()),
        }
    }
}

impl FromStr for TierCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_uppercase();
        let invalid = || Error::InvalidTier {
            code: s.to_string(),
        };

        let split = code
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(code.len());
        let (letters, digits) = code.split_at(split);
        let base = BaseTier::from_code(letters).ok_or_else(invalid)?;

        if digits.is_empty() {
            return Ok(Self::bare(base));
        }
        if !base.is_dues_bearing() || digits.len() != 2 {
            return Err(invalid());
        }
        let year = digits.parse::<u8>().map_err(|_| invalid())?;
        Ok(Self {
            base,
            year: Some(year),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!(
            "F26".parse::<TierCode>().unwrap(),
            TierCode {
                base: BaseTier::F,
                year: Some(26)
            }
        );
        assert_eq!("LM".parse::<TierCode>().unwrap(), TierCode::bare(BaseTier::Lm));
        assert_eq!("hlm".parse::<TierCode>().unwrap(), TierCode::bare(BaseTier::Hlm));
        assert_eq!(" VOL ".parse::<TierCode>().unwrap(), TierCode::default());
        assert_eq!(
            "P05".parse::<TierCode>().unwrap().to_string(),
            "P05".to_string()
        );
    }

    #[test]
    fn test_parse_rejects_bad_codes() {
        assert!(matches!(
            "X26".parse::<TierCode>(),
            Err(Error::InvalidTier { .. })
        ));
        assert!("LM26".parse::<TierCode>().is_err());
        assert!("F2026".parse::<TierCode>().is_err());
        assert!("F2".parse::<TierCode>().is_err());
        assert!("".parse::<TierCode>().is_err());
    }

    #[test]
    fn test_year_suffix() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        assert_eq!(TierCode::of_year(BaseTier::F, date).to_string(), "F25");
        assert_eq!(TierCode::of_year(BaseTier::Lm, date).to_string(), "LM");
        let date = NaiveDate::from_ymd_opt(2105, 1, 1).unwrap();
        assert_eq!(TierCode::of_year(BaseTier::S, date).to_string(), "S05");
    }

    #[test]
    fn test_display_benefactor_as_lifetime() {
        assert_eq!(TierCode::bare(BaseTier::Ben).display(), "LM");
        assert_eq!(TierCode::bare(BaseTier::Ben).to_string(), "BEN");
        assert_eq!("I24".parse::<TierCode>().unwrap().display(), "I24");
    }
}
