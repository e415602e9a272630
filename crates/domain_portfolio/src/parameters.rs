//! Case parameters and payment-cycle validation
//!
//! The parameter document travels as JSON between the transport layer and
//! the engine. It is validated structurally here: alignment values must fit
//! the chosen period unit and the initial balance is normalized to the scale
//! configured on the owning product.
//!
//! # Alignment ranges
//!
//! | Unit  | Alignment month | Alignment week | Alignment day              |
//! |-------|-----------------|----------------|----------------------------|
//! | Week  | not allowed     | not allowed    | 1..=7                      |
//! | Month | not allowed     | 1..=5          | 1..=7 with week, else 1..=31 |
//! | Year  | 1..=12          | 1..=5 with month, else 1..=53 | 1..=7 with week, 1..=31 with month, else 1..=366 |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use core_kernel::Amount;

use crate::error::PortfolioError;

/// Calendar unit a payment cycle or term is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodUnit {
    Week,
    Month,
    Year,
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PeriodUnit::Week => "WEEK",
            PeriodUnit::Month => "MONTH",
            PeriodUnit::Year => "YEAR",
        };
        f.write_str(name)
    }
}

/// When payments fall due
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCycle {
    /// Unit of one period
    pub temporal_unit: PeriodUnit,
    /// Payments fall due every `period` units
    pub period: u32,
    /// Day within the period (a weekday when `alignment_week` is set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment_day: Option<u32>,
    /// Week within the period, for monthly or longer cycles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment_week: Option<u32>,
    /// Month within the year, for yearly cycles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment_month: Option<u32>,
}

impl PaymentCycle {
    /// Unaligned cycle paying every `period` units
    pub fn every(temporal_unit: PeriodUnit, period: u32) -> Self {
        Self {
            temporal_unit,
            period,
            alignment_day: None,
            alignment_week: None,
            alignment_month: None,
        }
    }

    /// Unaligned monthly cycle
    pub fn monthly() -> Self {
        Self::every(PeriodUnit::Month, 1)
    }

    pub fn aligned_on_day(mut self, day: u32) -> Self {
        self.alignment_day = Some(day);
        self
    }

    pub fn aligned_on_week(mut self, week: u32) -> Self {
        self.alignment_week = Some(week);
        self
    }

    pub fn aligned_on_month(mut self, month: u32) -> Self {
        self.alignment_month = Some(month);
        self
    }

    /// Valid range for `alignment_day` given the other alignment fields
    pub fn day_range(&self) -> RangeInclusive<u32> {
        if self.alignment_week.is_some() {
            return 1..=7;
        }
        match self.temporal_unit {
            PeriodUnit::Week => 1..=7,
            PeriodUnit::Month => 1..=31,
            PeriodUnit::Year if self.alignment_month.is_some() => 1..=31,
            PeriodUnit::Year => 1..=366,
        }
    }

    /// Valid range for `alignment_week`; `None` when weeks cannot be aligned
    pub fn week_range(&self) -> Option<RangeInclusive<u32>> {
        match self.temporal_unit {
            PeriodUnit::Week => None,
            PeriodUnit::Month => Some(1..=5),
            PeriodUnit::Year if self.alignment_month.is_some() => Some(1..=5),
            PeriodUnit::Year => Some(1..=53),
        }
    }

    /// Checks the cycle for internal consistency
    ///
    /// # Errors
    ///
    /// Returns `Validation` if any alignment value lies outside the range
    /// allowed by the period unit
    pub fn validate(&self) -> Result<(), PortfolioError> {
        if self.period == 0 {
            return Err(PortfolioError::validation("payment cycle period must be at least 1"));
        }

        if let Some(month) = self.alignment_month {
            if self.temporal_unit != PeriodUnit::Year {
                return Err(PortfolioError::validation(format!(
                    "alignment month is only meaningful for yearly cycles, not {}",
                    self.temporal_unit
                )));
            }
            check_range("alignment month", month, 1..=12)?;
        }

        if let Some(week) = self.alignment_week {
            let range = self.week_range().ok_or_else(|| {
                PortfolioError::validation(format!(
                    "alignment week is only meaningful for monthly or longer cycles, not {}",
                    self.temporal_unit
                ))
            })?;
            check_range("alignment week", week, range)?;
        }

        if let Some(day) = self.alignment_day {
            check_range("alignment day", day, self.day_range())?;
        }

        Ok(())
    }
}

/// Longest term a case may run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermRange {
    pub temporal_unit: PeriodUnit,
    pub maximum: u32,
}

/// Parameter document of a case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseParameters {
    /// Customer the case is opened for
    pub customer_identifier: String,
    /// Starting balance, stored at the product's scale
    pub initial_balance: Decimal,
    pub term_range: TermRange,
    pub payment_cycle: PaymentCycle,
}

impl CaseParameters {
    /// Parses the JSON wire document
    pub fn from_json(json: &str) -> Result<Self, PortfolioError> {
        serde_json::from_str(json)
            .map_err(|e| PortfolioError::validation(format!("malformed case parameters: {}", e)))
    }

    /// Renders the JSON wire document
    pub fn to_json(&self) -> Result<String, PortfolioError> {
        serde_json::to_string(self)
            .map_err(|e| PortfolioError::validation(format!("unserializable case parameters: {}", e)))
    }

    /// Checks the document without modifying it
    pub fn validate(&self) -> Result<(), PortfolioError> {
        if self.customer_identifier.trim().is_empty() {
            return Err(PortfolioError::validation("customer identifier must not be empty"));
        }
        if self.initial_balance.is_sign_negative() && !self.initial_balance.is_zero() {
            return Err(PortfolioError::validation(format!(
                "initial balance must not be negative, got {}",
                self.initial_balance
            )));
        }
        if self.term_range.maximum == 0 {
            return Err(PortfolioError::validation("term range maximum must be at least 1"));
        }
        self.payment_cycle.validate()
    }

    /// Validates and rounds the initial balance to `scale` decimal places
    ///
    /// Out-of-scale input is rounded half-to-even, not rejected.
    pub fn normalized(mut self, scale: u32) -> Result<Self, PortfolioError> {
        self.validate()?;
        self.initial_balance = Amount::fixed(self.initial_balance, scale)?.value();
        Ok(self)
    }
}

fn check_range(field: &str, value: u32, range: RangeInclusive<u32>) -> Result<(), PortfolioError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(PortfolioError::validation(format!(
            "{} {} outside {}..={}",
            field,
            value,
            range.start(),
            range.end()
        )))
    }
}
