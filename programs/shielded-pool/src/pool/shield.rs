use log::{info, warn};

use super::{PrivacyPool, check_note_encoding};
use crate::{
    errors::{PrivacyPoolError, Result},
    events::ShieldEvent,
    types::{FieldBytes, field_from_bytes_canonical},
};

impl PrivacyPool {
    /// Deposit `amount` and append `commitment` to the tree.
    ///
    /// The caller has already moved `amount` of the pool token into custody;
    /// the engine only records it. No proof is needed: the depositor chooses
    /// the commitment and nothing is spent.
    ///
    /// # Errors
    ///
    /// - [`PrivacyPoolError::PoolPaused`] while paused
    /// - [`PrivacyPoolError::ZeroAmount`] for a zero deposit
    /// - [`PrivacyPoolError::InvalidEncoding`] if `commitment` is not canonical
    /// - [`PrivacyPoolError::TreeFull`] when no leaf is left
    /// - [`PrivacyPoolError::ArithmeticOverflow`] if the balance would overflow
    pub fn shield(
        &mut self,
        amount: u64,
        commitment: &FieldBytes,
        encrypted_note: Vec<u8>,
    ) -> Result<ShieldEvent> {
        self.ensure_active()?;
        check_note_encoding(&[&encrypted_note])?;
        if amount == 0 {
            warn!("{}: rejected shield, zero amount", self.id);
            return Err(PrivacyPoolError::ZeroAmount);
        }
        let commitment = field_from_bytes_canonical(commitment)?;
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(PrivacyPoolError::ArithmeticOverflow)?;
        let staged = self.stage_inserts(&[commitment])?;

        let positions = self.apply_inserts(staged);
        self.balance = balance;
        let event = self.emit_shield(positions[0], &commitment, encrypted_note);

        info!(
            "{}: shield {amount} at position {}",
            self.id, event.position
        );
        Ok(event)
    }
}
