//! Fixed-scale amounts and currency codes
//!
//! Balances in the portfolio domain are stored at the scale configured on the
//! owning product (its minor currency unit digits). Input at a finer scale is
//! rounded half-to-even instead of being rejected, and the stored value always
//! carries exactly the configured number of decimal places.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest number of minor currency unit digits a product may configure
pub const MAX_MINOR_CURRENCY_DIGITS: u32 = 4;

/// Errors that can occur during amount handling
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unsupported scale {0}: at most {max} minor currency digits", max = MAX_MINOR_CURRENCY_DIGITS)]
    UnsupportedScale(u32),
}

/// ISO 4217 style currency code (three upper-case ASCII letters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses a currency code
    pub fn new(code: impl Into<String>) -> Result<Self, MoneyError> {
        let code = code.into();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(MoneyError::InvalidCurrency(code));
        }
        Ok(Self(code))
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> String {
        code.0
    }
}

/// A non-negative amount held at a fixed scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Normalizes `value` to `scale` decimal places using banker's rounding
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or the scale is unsupported
    pub fn fixed(value: Decimal, scale: u32) -> Result<Self, MoneyError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MoneyError::InvalidAmount(format!("{} is negative", value)));
        }
        Ok(Self(fix_scale(value, scale)?))
    }

    /// Returns the zero amount at the given scale
    pub fn zero(scale: u32) -> Result<Self, MoneyError> {
        Self::fixed(Decimal::ZERO, scale)
    }

    /// Returns the underlying decimal value
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the number of decimal places carried
    pub fn scale(&self) -> u32 {
        self.0.scale()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rounds half-to-even to `scale` places and pads to exactly that scale
pub fn fix_scale(value: Decimal, scale: u32) -> Result<Decimal, MoneyError> {
    if scale > MAX_MINOR_CURRENCY_DIGITS {
        return Err(MoneyError::UnsupportedScale(scale));
    }
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(scale);
    // rescale keeps a smaller scale when the integer part leaves no room
    if rounded.scale() != scale {
        return Err(MoneyError::InvalidAmount(format!(
            "{} not representable at scale {}",
            value, scale
        )));
    }
    // -0.00 rounds from tiny negative inputs
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    Ok(rounded)
}
