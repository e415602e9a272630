//! Parameter patterns
//!
//! A pattern describes a family of products: the parameter document its cases
//! carry and the account designators its cases are expected to assign. Every
//! product names the pattern it is built on.

use serde::{Deserialize, Serialize};

/// Package name of the individual lending pattern
pub const INDIVIDUAL_LENDING: &str = "individual-lending.v1";

/// Account designators used by individual lending cases
pub mod designators {
    pub const CUSTOMER_LOAN: &str = "CUSTOMER_LOAN";
    pub const ENTRY: &str = "ENTRY";
    pub const PENDING_DISBURSAL: &str = "PENDING_DISBURSAL";
    pub const LOAN_FUNDS_SOURCE: &str = "LOAN_FUNDS_SOURCE";
    pub const PROCESSING_FEE_INCOME: &str = "PROCESSING_FEE_INCOME";
    pub const ORIGINATION_FEE_INCOME: &str = "ORIGINATION_FEE_INCOME";
    pub const DISBURSEMENT_FEE_INCOME: &str = "DISBURSEMENT_FEE_INCOME";
    pub const INTEREST_INCOME: &str = "INTEREST_INCOME";
    pub const INTEREST_ACCRUAL: &str = "INTEREST_ACCRUAL";
    pub const LATE_FEE_INCOME: &str = "LATE_FEE_INCOME";
    pub const LATE_FEE_ACCRUAL: &str = "LATE_FEE_ACCRUAL";
    pub const ARREARS_ALLOWANCE: &str = "ARREARS_ALLOWANCE";

    pub const ALL: [&str; 12] = [
        CUSTOMER_LOAN,
        ENTRY,
        PENDING_DISBURSAL,
        LOAN_FUNDS_SOURCE,
        PROCESSING_FEE_INCOME,
        ORIGINATION_FEE_INCOME,
        DISBURSEMENT_FEE_INCOME,
        INTEREST_INCOME,
        INTEREST_ACCRUAL,
        LATE_FEE_INCOME,
        LATE_FEE_ACCRUAL,
        ARREARS_ALLOWANCE,
    ];
}

/// A family of products sharing one parameter document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub parameter_package: String,
    pub account_designators: Vec<String>,
}

impl Pattern {
    pub fn individual_lending() -> Self {
        Self {
            parameter_package: INDIVIDUAL_LENDING.to_string(),
            account_designators: designators::ALL.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Returns true if cases of this pattern use `designator`
    pub fn uses_designator(&self, designator: &str) -> bool {
        self.account_designators.iter().any(|d| d == designator)
    }
}

/// All patterns products may be built on
pub fn all_patterns() -> Vec<Pattern> {
    vec![Pattern::individual_lending()]
}

/// Looks up a pattern by package name
pub fn find_pattern(parameter_package: &str) -> Option<Pattern> {
    all_patterns()
        .into_iter()
        .find(|pattern| pattern.parameter_package == parameter_package)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_not_empty() {
        assert!(!all_patterns().is_empty());
    }

    #[test]
    fn test_individual_lending_designators() {
        let pattern = find_pattern(INDIVIDUAL_LENDING).unwrap();
        assert!(pattern.uses_designator(designators::CUSTOMER_LOAN));
        assert!(pattern.uses_designator(designators::ENTRY));
        assert!(!pattern.uses_designator("UNKNOWN"));
    }
}
