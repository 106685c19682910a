//! Type-safe USD price representation using decimal arithmetic.
//!
//! The backend exchanges prices as JSON numbers in dollars (not cents), so
//! [`Price`] serializes through `rust_decimal::serde::float`.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`] from user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price is required")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number")]
    NotANumber,
    /// The amount is zero or negative.
    #[error("price must be greater than zero")]
    NotPositive,
    /// The amount has fractions of a cent.
    #[error("price can have at most {max} decimal places")]
    TooPrecise {
        /// Maximum allowed decimal places.
        max: u32,
    },
}

/// A price in US dollars.
///
/// ## Examples
///
/// ```
/// use coffee_stand_core::Price;
///
/// let price = Price::parse("3").unwrap();
/// assert_eq!(price.display(), "$3.00");
/// assert_eq!(price.display_compact(), "$3");
///
/// assert!(Price::parse("0").is_err());
/// assert!(Price::parse("4.999").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Number of decimal places a USD amount may carry.
    pub const MAX_DECIMAL_PLACES: u32 = 2;

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Parse a price typed into a form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty or only whitespace
    /// - Is not a decimal number
    /// - Is zero or negative
    /// - Has more than two decimal places
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount = Decimal::from_str(trimmed).map_err(|_| PriceError::NotANumber)?;

        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }

        if amount.normalize().scale() > Self::MAX_DECIMAL_PLACES {
            return Err(PriceError::TooPrecise {
                max: Self::MAX_DECIMAL_PLACES,
            });
        }

        Ok(Self(amount))
    }

    /// Format with exactly two decimal places (e.g., "$19.99", "$3.00").
    #[must_use]
    pub fn display(&self) -> String {
        let mut amount = self.0.round_dp(Self::MAX_DECIMAL_PLACES);
        amount.rescale(Self::MAX_DECIMAL_PLACES);
        format!("${amount}")
    }

    /// Format without trailing zeros (e.g., "$3", "$3.5").
    #[must_use]
    pub fn display_compact(&self) -> String {
        format!("${}", self.0.normalize())
    }

    /// The raw amount as typed back into a form field ("3", "4.5").
    #[must_use]
    pub fn input_value(&self) -> String {
        self.0.normalize().to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}
