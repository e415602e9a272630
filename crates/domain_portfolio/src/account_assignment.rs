//! Account assignments
//!
//! An assignment binds a logical role (a designator such as `CUSTOMER_LOAN`
//! or `ENTRY`) to a concrete ledger account. Within one set every designator
//! appears at most once.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use core_kernel::{AccountIdentifier, MAX_IDENTIFIER_LENGTH};

use crate::error::PortfolioError;

/// Binding of a role designator to a ledger account
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountAssignment {
    #[validate(length(min = 1, max = 32))]
    pub designator: String,
    pub account_identifier: AccountIdentifier,
}

impl AccountAssignment {
    pub fn new(designator: impl Into<String>, account_identifier: AccountIdentifier) -> Self {
        Self {
            designator: designator.into(),
            account_identifier,
        }
    }
}

/// Set of account assignments keyed by designator
///
/// Equality compares contents only; insertion order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AccountAssignment>", into = "Vec<AccountAssignment>")]
pub struct AccountAssignmentSet {
    entries: BTreeMap<String, AccountIdentifier>,
}

impl AccountAssignmentSet {
    /// Builds a set from caller input
    ///
    /// The input is read as a set, not a list. An identical designator and
    /// account pair given more than once collapses into a single entry and
    /// is not an error. Two different accounts for one designator are
    /// rejected with a validation error.
    pub fn from_assignments(
        assignments: impl IntoIterator<Item = AccountAssignment>,
    ) -> Result<Self, PortfolioError> {
        let mut entries = BTreeMap::new();
        for assignment in assignments {
            validate_assignment(&assignment)?;
            match entries.get(&assignment.designator) {
                Some(existing) if existing != &assignment.account_identifier => {
                    return Err(PortfolioError::validation(format!(
                        "designator {} assigned to both {} and {}",
                        assignment.designator, existing, assignment.account_identifier
                    )));
                }
                Some(_) => {}
                None => {
                    entries.insert(assignment.designator, assignment.account_identifier);
                }
            }
        }
        Ok(Self { entries })
    }

    /// Replaces the entire set with `assignments`
    ///
    /// On error the current contents are kept.
    pub fn replace_all(
        &mut self,
        assignments: impl IntoIterator<Item = AccountAssignment>,
    ) -> Result<(), PortfolioError> {
        *self = Self::from_assignments(assignments)?;
        Ok(())
    }

    /// Inserts or replaces the account for `designator`
    ///
    /// Returns the account previously assigned to the designator.
    pub fn assign(
        &mut self,
        assignment: AccountAssignment,
    ) -> Result<Option<AccountIdentifier>, PortfolioError> {
        validate_assignment(&assignment)?;
        Ok(self.entries.insert(assignment.designator, assignment.account_identifier))
    }

    /// Removes the assignment for `designator`
    pub fn remove(&mut self, designator: &str) -> Option<AccountIdentifier> {
        self.entries.remove(designator)
    }

    pub fn get(&self, designator: &str) -> Option<&AccountIdentifier> {
        self.entries.get(designator)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates assignments ordered by designator
    pub fn iter(&self) -> impl Iterator<Item = AccountAssignment> + '_ {
        self.entries
            .iter()
            .map(|(designator, account)| AccountAssignment::new(designator.clone(), account.clone()))
    }

    pub fn to_vec(&self) -> Vec<AccountAssignment> {
        self.iter().collect()
    }
}

fn validate_assignment(assignment: &AccountAssignment) -> Result<(), PortfolioError> {
    assignment.validate().map_err(|e| {
        PortfolioError::validation(format!(
            "designator must be 1..={} characters: {}",
            MAX_IDENTIFIER_LENGTH, e
        ))
    })
}

impl TryFrom<Vec<AccountAssignment>> for AccountAssignmentSet {
    type Error = PortfolioError;

    fn try_from(assignments: Vec<AccountAssignment>) -> Result<Self, Self::Error> {
        Self::from_assignments(assignments)
    }
}

impl From<AccountAssignmentSet> for Vec<AccountAssignment> {
    fn from(set: AccountAssignmentSet) -> Self {
        set.to_vec()
    }
}
