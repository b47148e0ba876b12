use log::info;
use privacy_pool_interface::CircuitKind;

use super::{PrivacyPool, check_note_encoding, check_proof_encoding};
use crate::{
    errors::Result,
    events::{PoolEvent, UnshieldEvent},
    public_inputs::UnshieldPublicInputs,
    types::{Address, field_to_bytes},
};

impl PrivacyPool {
    /// Spend one note and pay `unshield_amount` out to `recipient`.
    ///
    /// A non-zero `change_commitment` is appended as a new leaf and announced
    /// with a shield event carrying `encrypted_change_note`, emitted before
    /// the unshield event. With no change the ciphertext is dropped.
    ///
    /// # Errors
    ///
    /// - [`crate::PrivacyPoolError::PoolPaused`] while paused
    /// - [`crate::PrivacyPoolError::InvalidEncoding`] for a malformed proof or
    ///   non-canonical public input
    /// - [`crate::PrivacyPoolError::InvalidPublicInputLength`] unless
    ///   `public_inputs` is 128 bytes
    /// - [`crate::PrivacyPoolError::StaleRoot`] if the root is outside the window
    /// - [`crate::PrivacyPoolError::DoubleSpend`] if the nullifier is spent
    /// - [`crate::PrivacyPoolError::InvalidProof`] if verification fails
    /// - [`crate::PrivacyPoolError::InsufficientBalance`] if the pool cannot pay
    /// - [`crate::PrivacyPoolError::TreeFull`] if the change note does not fit
    pub fn unshield(
        &mut self,
        proof: &[u8],
        public_inputs: &[u8],
        recipient: Address,
        encrypted_change_note: Vec<u8>,
    ) -> Result<UnshieldEvent> {
        // Structural checks
        self.ensure_active()?;
        check_proof_encoding(proof)?;
        check_note_encoding(&[&encrypted_change_note])?;
        let inputs = UnshieldPublicInputs::decode(public_inputs)?;

        // State checks
        self.ensure_known_root(&inputs.merkle_root)?;
        let nullifier = field_to_bytes(&inputs.nullifier);
        self.ensure_unspent(&[nullifier])?;

        self.verify_proof(CircuitKind::Unshield, public_inputs, proof)?;

        let amount = inputs.unshield_amount;
        self.ensure_balance(amount)?;
        let change: Vec<_> = inputs.change().into_iter().collect();
        let staged = self.stage_inserts(&change)?;

        // Execute
        self.nullifiers.mark_all_spent(&[nullifier])?;
        let positions = self.apply_inserts(staged);
        self.balance -= amount;

        let mut change_position = None;
        if let (Some(commitment), Some(&position)) = (change.first(), positions.first()) {
            self.emit_shield(position, commitment, encrypted_change_note);
            change_position = Some(position);
        }

        let event = UnshieldEvent {
            nullifier,
            recipient,
            amount,
            change_commitment: field_to_bytes(&inputs.change_commitment),
            change_position,
        };
        self.emit(PoolEvent::Unshield(event.clone()));

        info!(
            "{}: unshield {amount} to {}, change at {change_position:?}",
            self.id,
            hex::encode(&recipient[..8])
        );
        Ok(event)
    }
}
