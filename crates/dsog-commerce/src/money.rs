//! Price type for catalog and order amounts.
//!
//! Prices are kept exactly as the catalog reports them: the store trades in
//! a single currency and never rescales amounts into minor units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// Label printed in front of every amount.
pub const CURRENCY_LABEL: &str = "KSh";

/// A monetary amount in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Zero amount.
    pub const ZERO: Price = Price(0.0);

    /// Create a price from a raw amount.
    pub const fn new(amount: f64) -> Self {
        Self(amount)
    }

    /// The raw amount.
    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Multiply by a quantity.
    pub fn multiply(&self, quantity: u32) -> Price {
        Price(self.0 * f64::from(quantity))
    }

    /// Format with the currency label (e.g., "KSh 8999").
    pub fn display(&self) -> String {
        format!("{} {}", CURRENCY_LABEL, self)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, other: Price) -> Price {
        Price(self.0 + other.0)
    }
}

impl Mul<u32> for Price {
    type Output = Price;

    fn mul(self, quantity: u32) -> Price {
        self.multiply(quantity)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, |acc, p| acc + p)
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Price(amount as f64)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Whole amounts print without a fractional part, like the catalog shows them.
        write!(f, "{}", self.0)
    }
}
