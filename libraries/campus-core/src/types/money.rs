/// Money amounts held as integer cents
use crate::error::{CampusError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Largest absolute amount (in major units) accepted from the wire.
const MAX_MAJOR: f64 = 1e13;

/// A monetary amount stored as a signed number of cents.
///
/// On the wire it is a plain JSON number with two fractional digits
/// (`1234.5` deserializes to 123450 cents). Rounding to cents happens once,
/// when the amount enters the system; all arithmetic afterwards is exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Create an amount from a number of cents
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a major-unit amount, rounding half away from zero to cents
    pub fn from_major(amount: f64) -> Result<Self> {
        if !amount.is_finite() || amount.abs() > MAX_MAJOR {
            return Err(CampusError::invalid_input(format!(
                "amount {} is out of range",
                amount
            )));
        }
        Ok(Self((amount * 100.0).round() as i64))
    }

    /// Number of cents
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Amount in major units
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Whether the amount is strictly greater than zero
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Self::from_major(amount).map_err(serde::de::Error::custom)
    }
}
