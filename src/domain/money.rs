use crate::error::{CheckoutError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of minor units in one major unit (cents per dollar).
pub const MINOR_PER_MAJOR: i64 = 100;

/// A monetary value counted in minor currency units (cents).
///
/// Integer arithmetic keeps cart totals exact. Conversion to major units only
/// happens at the display edge, through [`MoneyFormatter`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub const fn from_minor(minor_units: i64) -> Self {
        Self(minor_units)
    }

    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Adds `rhs`, failing with [`CheckoutError::InvalidAmount`] instead of
    /// wrapping past the representable range.
    pub fn try_add(self, rhs: Self) -> Result<Self> {
        self.checked_add(rhs).ok_or_else(|| {
            CheckoutError::InvalidAmount(format!("{} + {} is out of range", self.0, rhs.0))
        })
    }

    /// Sums `amounts`, failing on the first overflow.
    pub fn try_sum<I>(amounts: I) -> Result<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |acc, amount| acc.try_add(amount))
    }

    /// Converts a decimal major-unit amount (`9.99`) into minor units (`999`).
    ///
    /// Sub-cent fractions are rounded half away from zero.
    pub fn from_major(amount: Decimal) -> Result<Self> {
        amount
            .checked_mul(Decimal::from(MINOR_PER_MAJOR))
            .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|minor| minor.to_i64())
            .map(Self)
            .ok_or_else(|| CheckoutError::InvalidAmount(format!("{amount} is out of range")))
    }
}

impl From<i64> for Money {
    fn from(minor_units: i64) -> Self {
        Self(minor_units)
    }
}

impl From<i32> for Money {
    fn from(minor_units: i32) -> Self {
        Self(i64::from(minor_units))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&MoneyFormatter::default().format(*self))
    }
}

/// Renders minor-unit amounts as major-unit strings, e.g. `4649` as `"$46.49"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormatter {
    symbol: String,
}

impl Default for MoneyFormatter {
    fn default() -> Self {
        Self::new("$")
    }
}

impl MoneyFormatter {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn format(&self, amount: impl Into<Money>) -> String {
        let minor = amount.into().minor_units();
        let sign = if minor < 0 { "-" } else { "" };
        // unsigned_abs keeps i64::MIN representable
        let magnitude = minor.unsigned_abs();
        let per_major = MINOR_PER_MAJOR.unsigned_abs();
        format!(
            "{sign}{}{}.{:02}",
            self.symbol,
            magnitude / per_major,
            magnitude % per_major
        )
    }
}
