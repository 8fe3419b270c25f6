//! Decimal amounts
//!
//! All multiply/divide steps run on [`rust_decimal::Decimal`], so chains like
//! `0.1 + 0.2` or `0.2490521409 * 1e8` stay exact. Native floats only appear
//! on the way in ([`ToAmount`] for `f64`) and on the way out
//! ([`Amount::to_f64`]).

use crate::error::AmountError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An immutable decimal quantity of BTC, satoshis, fiat or tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Wraps a decimal
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parses a plain or scientific-notation decimal string
    ///
    /// Surrounding whitespace is ignored. Group separators (`,` and `_`)
    /// and currency symbols are rejected.
    pub fn parse(input: &str) -> Result<Self, AmountError> {
        let trimmed = input.trim();
        // `Decimal::from_str` silently skips underscores
        if trimmed.contains('_') {
            return Err(AmountError::Parse(input.to_string()));
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Self)
            .map_err(|_| AmountError::Parse(input.to_string()))
    }

    /// Converts a native float through its shortest round-trip representation
    ///
    /// `0.1_f64` becomes exactly `0.1`, not the binary expansion
    /// `0.1000000000000000055511151231...`. A nonzero value below the
    /// smallest representable decimal (`1e-28`) is rejected rather than
    /// rounded to zero.
    pub fn from_f64(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NonFinite(value.to_string()));
        }
        let amount = Self::parse(&value.to_string())?;
        if amount.is_zero() && value != 0.0 {
            return Err(AmountError::Parse(value.to_string()));
        }
        Ok(amount)
    }

    /// Returns the underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Multiplies two amounts
    pub fn checked_mul(&self, other: Amount) -> Result<Amount, AmountError> {
        self.0
            .checked_mul(other.0)
            .map(Amount)
            .ok_or(AmountError::Overflow)
    }

    /// Divides two amounts, failing on a zero divisor
    pub fn checked_div(&self, divisor: Amount) -> Result<Amount, AmountError> {
        if divisor.0.is_zero() {
            return Err(AmountError::DivisionByZero);
        }
        self.0
            .checked_div(divisor.0)
            .map(Amount)
            .ok_or(AmountError::Overflow)
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Converts to the nearest native float
    pub fn to_f64(&self) -> f64 {
        // Parsing the decimal text is correctly rounded; summing integer and
        // fractional parts as floats is not.
        self.0.normalize().to_string().parse().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.normalize(), f)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Amount> for Decimal {
    fn from(value: Amount) -> Self {
        value.0
    }
}

/// Inputs accepted wherever an amount is expected
///
/// Mirrors the "number or numeric string" surface: integers, floats, decimal
/// strings, [`Decimal`] and [`Amount`] itself.
pub trait ToAmount {
    fn to_amount(self) -> Result<Amount, AmountError>;
}

impl ToAmount for Amount {
    fn to_amount(self) -> Result<Amount, AmountError> {
        Ok(self)
    }
}

impl ToAmount for Decimal {
    fn to_amount(self) -> Result<Amount, AmountError> {
        Ok(Amount(self))
    }
}

impl ToAmount for f64 {
    fn to_amount(self) -> Result<Amount, AmountError> {
        Amount::from_f64(self)
    }
}

impl ToAmount for &str {
    fn to_amount(self) -> Result<Amount, AmountError> {
        Amount::parse(self)
    }
}

impl ToAmount for String {
    fn to_amount(self) -> Result<Amount, AmountError> {
        Amount::parse(&self)
    }
}

impl ToAmount for &String {
    fn to_amount(self) -> Result<Amount, AmountError> {
        Amount::parse(self)
    }
}

macro_rules! int_to_amount {
    ($($t:ty),+) => {
        $(
            impl ToAmount for $t {
                fn to_amount(self) -> Result<Amount, AmountError> {
                    Ok(Amount(Decimal::from(self)))
                }
            }
        )+
    };
}

int_to_amount!(i32, i64, u32, u64);
