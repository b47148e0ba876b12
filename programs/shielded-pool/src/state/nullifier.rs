use std::collections::HashSet;

use crate::{
    errors::{PrivacyPoolError, Result},
    types::{FieldBytes, ZERO_FIELD},
};

/// Set of spent nullifiers.
///
/// # Lifecycle
///
/// A nullifier is added once, when the note it derives from is spent, and is
/// never removed. Membership is the only query.
///
/// Pool operations check every nullifier with [`Self::ensure_unspent`] before
/// any state changes, then commit with [`Self::mark_all_spent`] once all other
/// checks have passed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NullifierRegistry {
    spent: HashSet<FieldBytes>,
}

impl NullifierRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `nullifier` has been spent.
    pub fn is_spent(&self, nullifier: &FieldBytes) -> bool {
        self.spent.contains(nullifier)
    }

    /// Mark a single nullifier spent.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::DoubleSpend`] if it is already present.
    pub fn mark_spent(&mut self, nullifier: FieldBytes) -> Result<()> {
        if !self.spent.insert(nullifier) {
            return Err(PrivacyPoolError::DoubleSpend);
        }
        Ok(())
    }

    /// Check that none of `nullifiers` is spent and that they are pairwise
    /// distinct.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::DoubleSpend`] on the first conflict.
    pub fn ensure_unspent(&self, nullifiers: &[FieldBytes]) -> Result<()> {
        for (i, nullifier) in nullifiers.iter().enumerate() {
            if self.is_spent(nullifier) || nullifiers[..i].contains(nullifier) {
                return Err(PrivacyPoolError::DoubleSpend);
            }
        }
        Ok(())
    }

    /// Mark every nullifier spent, or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::DoubleSpend`] without modifying the set if
    /// any nullifier conflicts.
    pub fn mark_all_spent(&mut self, nullifiers: &[FieldBytes]) -> Result<()> {
        self.ensure_unspent(nullifiers)?;
        self.spent.extend(nullifiers.iter().copied());
        Ok(())
    }

    /// Number of spent nullifiers.
    pub fn len(&self) -> usize {
        self.spent.len()
    }

    /// Whether nothing has been spent.
    pub fn is_empty(&self) -> bool {
        self.spent.is_empty()
    }
}

/// Nullifiers a two-input proof actually spends: the first always, the second
/// unless it is the zero sentinel of a dummy input.
pub fn spent_nullifiers(nullifier_1: FieldBytes, nullifier_2: FieldBytes) -> Vec<FieldBytes> {
    if nullifier_2 == ZERO_FIELD {
        vec![nullifier_1]
    } else {
        vec![nullifier_1, nullifier_2]
    }
}
