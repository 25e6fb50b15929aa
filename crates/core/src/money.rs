//! Money amounts.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Minor units (paise) per rupee.
pub const MINOR_PER_RUPEE: u64 = 100;

/// Non-negative price in the smallest currency unit (paise).
///
/// All listing prices share one currency, so no currency code is carried.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Saturates instead of overflowing for absurd rupee amounts.
    pub const fn from_rupees(rupees: u64) -> Self {
        Self(rupees.saturating_mul(MINOR_PER_RUPEE))
    }

    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Rupee value as a float, for ratios and display.
    pub fn as_rupees_f64(self) -> f64 {
        self.0 as f64 / MINOR_PER_RUPEE as f64
    }

    /// Arithmetic mean, rounded half-up to the nearest paisa. `None` when empty.
    pub fn mean<I: IntoIterator<Item = Price>>(prices: I) -> Option<Price> {
        let (sum, count) = prices
            .into_iter()
            .fold((0u128, 0u128), |(sum, count), p| (sum + p.0 as u128, count + 1));
        if count == 0 {
            return None;
        }
        let mean = (sum + count / 2) / count;
        Some(Price(u64::try_from(mean).unwrap_or(u64::MAX)))
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let rupees = self.0 / MINOR_PER_RUPEE;
        let paise = self.0 % MINOR_PER_RUPEE;
        if paise == 0 {
            write!(f, "₹{rupees}")
        } else {
            write!(f, "₹{rupees}.{paise:02}")
        }
    }
}
