//! Naira prices using decimal arithmetic.
//!
//! Amounts are stored as [`Decimal`] so line totals multiply exactly, and
//! serialized as plain JSON numbers so persisted catalogs stay readable by
//! anything that reads the `products` record.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency symbol prefixed to every displayed amount.
pub const NAIRA_SIGN: &str = "₦";

/// Fraction digits kept when displaying an amount.
const MAX_FRACTION_DIGITS: u32 = 3;

/// Errors produced when reading a price from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price is not a number: {0:?}")]
    NotANumber(String),
    #[error("price must not be negative: {0}")]
    Negative(String),
    #[error("price is out of range: {0}")]
    OutOfRange(String),
}

/// A non-negative amount of Naira.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of Naira.
    #[must_use]
    pub fn from_whole(naira: i64) -> Self {
        Self(Decimal::from(naira))
    }

    /// The underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Sum of two prices, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Parse a price typed into a form field.
    ///
    /// Leading and trailing whitespace is ignored. Scientific notation is
    /// accepted. Non-finite and negative values are rejected.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the text is not a finite, non-negative number.
    pub fn parse_input(raw: &str) -> Result<Self, PriceError> {
        let text = raw.trim();
        let float: f64 = text
            .parse()
            .map_err(|_| PriceError::NotANumber(raw.to_string()))?;
        if !float.is_finite() {
            return Err(PriceError::NotANumber(raw.to_string()));
        }
        if float < 0.0 {
            return Err(PriceError::Negative(text.to_string()));
        }

        let amount = Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
            .or_else(|| Decimal::from_f64(float))
            .ok_or_else(|| PriceError::OutOfRange(text.to_string()))?;

        Ok(Self(amount))
    }

    /// Format for display with en-NG grouping, e.g. `₦10,000` or `₦1,234.5`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{NAIRA_SIGN}{}", self.grouped())
    }

    /// The amount with thousands separators and at most three fraction
    /// digits, trailing zeros trimmed.
    #[must_use]
    pub fn grouped(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        let text = rounded.abs().to_string();
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

        let mut out = String::with_capacity(text.len() + whole.len() / 3 + 1);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(digit);
        }
        if !fraction.is_empty() {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::plus)
    }
}
