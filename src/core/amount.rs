//! Native Asset Amounts
//!
//! Ledger amounts are fixed-point integers with 7 decimal places.
//! All arithmetic is integer-only, so amounts hash identically everywhere.
//!
//! ## Format
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  1 unit   = 10_000_000 stroops                              │
//! │  "6"      = 60_000_000                                      │
//! │  "0.5"    =  5_000_000                                      │
//! │  Precision: 1 stroop = 0.0000001 units                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Number of decimal places.
pub const AMOUNT_DECIMALS: u32 = 7;

/// Stroops per whole unit (10^7).
pub const STROOPS_PER_UNIT: i64 = 10_000_000;

/// Native-asset amount in stroops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(i64);

impl Amount {
    /// Zero.
    pub const ZERO: Amount = Amount(0);

    /// Create from raw stroops.
    pub const fn from_stroops(stroops: i64) -> Self {
        Self(stroops)
    }

    /// Create from whole units. Any `i32` fits without overflow.
    pub const fn from_units(units: i32) -> Self {
        Self(units as i64 * STROOPS_PER_UNIT)
    }

    /// Raw stroops.
    pub const fn stroops(self) -> i64 {
        self.0
    }

    /// True for an amount of exactly zero.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// True for a negative amount.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked multiplication by an integer factor.
    pub fn checked_mul(self, factor: i64) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / STROOPS_PER_UNIT as u64;
        let frac = abs % STROOPS_PER_UNIT as u64;
        if frac == 0 {
            write!(f, "{}{}", sign, units)
        } else {
            let digits = format!("{:07}", frac);
            write!(f, "{}{}.{}", sign, units, digits.trim_end_matches('0'))
        }
    }
}

/// Errors from parsing a decimal amount string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Empty input.
    #[error("empty amount")]
    Empty,
    /// Contains something other than digits and one decimal point.
    #[error("invalid amount: {0}")]
    Invalid(String),
    /// More than 7 fractional digits.
    #[error("too many decimal places in {0}")]
    TooPrecise(String),
    /// Does not fit in 64 bits of stroops.
    #[error("amount out of range: {0}")]
    Overflow(String),
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, frac) = match body.split_once('.') {
            Some((w, f)) => (w, f),
            None => (body, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(AmountError::Invalid(s.to_string()));
        }
        if frac.len() > AMOUNT_DECIMALS as usize {
            return Err(AmountError::TooPrecise(s.to_string()));
        }

        let overflow = || AmountError::Overflow(s.to_string());
        let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| overflow())? };
        let frac_stroops: i64 = if frac.is_empty() {
            0
        } else {
            let scale = 10i64.pow(AMOUNT_DECIMALS - frac.len() as u32);
            frac.parse::<i64>().map_err(|_| overflow())? * scale
        };

        let stroops = whole
            .checked_mul(STROOPS_PER_UNIT)
            .and_then(|w| w.checked_add(frac_stroops))
            .ok_or_else(overflow)?;

        Ok(Self(if negative { -stroops } else { stroops }))
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}
