//! Decimal to minor-unit conversion.
//!
//! Allocation files carry whole-unit amounts with up to two decimals.
//! Amounts are held as [`Amount`], an exact fixed-point value, so sums do
//! not depend on the order of their terms. Every conversion goes through
//! [`Amount::to_minor_units`]: round to cents once, then scale in integer
//! arithmetic.

use std::fmt;

use crate::error::CoreError;

/// Denomination of the native asset in minor units
pub const NATIVE_DENOM: &str = "umis";

/// Minor units per whole unit
pub const MINOR_UNITS_PER_UNIT: u64 = 1_000_000;

/// Fixed-point steps per whole unit held by [`Amount`]
pub const AMOUNT_SCALE: u128 = 1_000_000_000;

const CENTS_PER_UNIT: f64 = 100.0;
const MINOR_UNITS_PER_CENT: u64 = MINOR_UNITS_PER_UNIT / 100;
const STEPS_PER_CENT: u128 = AMOUNT_SCALE / 100;

/// A non-negative whole-unit amount with nine exact decimal places
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Convert a decimal read from input.
    ///
    /// The integer part is taken exactly and only the fraction is rounded,
    /// to the nearest 10^-9.
    pub fn from_units(amount: f64) -> Result<Self, CoreError> {
        if !amount.is_finite() || amount < 0.0 || amount >= u64::MAX as f64 {
            return Err(CoreError::AmountOutOfRange(amount));
        }

        let whole = amount.trunc();
        let fraction = ((amount - whole) * AMOUNT_SCALE as f64).round() as u128;
        (whole as u128)
            .checked_mul(AMOUNT_SCALE)
            .and_then(|steps| steps.checked_add(fraction))
            .map(Amount)
            .ok_or(CoreError::AmountOutOfRange(amount))
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn saturating_add(self, other: Amount) -> Amount {
        Amount(self.0.saturating_add(other.0))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Nearest `f64`, for diagnostics only
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / AMOUNT_SCALE as f64
    }

    /// Round half up to cents, then scale to minor units
    pub fn to_minor_units(&self) -> Result<u64, CoreError> {
        let cents = (self.0 + STEPS_PER_CENT / 2) / STEPS_PER_CENT;
        u64::try_from(cents)
            .ok()
            .and_then(|c| c.checked_mul(MINOR_UNITS_PER_CENT))
            .ok_or_else(|| CoreError::AmountOutOfRange(self.to_f64()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / AMOUNT_SCALE;
        let fraction = self.0 % AMOUNT_SCALE;
        if fraction == 0 {
            return write!(f, "{}", whole);
        }
        let digits = format!("{:09}", fraction);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}

/// Round to two decimal places, halves away from zero
pub fn round2(x: f64) -> f64 {
    (x * CENTS_PER_UNIT).round() / CENTS_PER_UNIT
}

/// Convert a whole-unit amount to minor units
pub fn to_minor_units(amount: f64) -> Result<u64, CoreError> {
    Amount::from_units(amount)?.to_minor_units()
}

/// Render minor units as a whole-unit decimal string
pub fn format_minor_units(minor: u64) -> String {
    format!(
        "{}.{:06}",
        minor / MINOR_UNITS_PER_UNIT,
        minor % MINOR_UNITS_PER_UNIT
    )
}
