use log::info;
use privacy_pool_interface::CircuitKind;

use super::{PrivacyPool, check_note_encoding, check_proof_encoding};
use crate::{
    errors::Result,
    events::{PoolEvent, TransferEvent},
    public_inputs::TransferPublicInputs,
    state::spent_nullifiers,
    types::field_to_bytes,
};

impl PrivacyPool {
    /// Spend up to two notes and re-commit their value inside the pool.
    ///
    /// `encrypted_notes` pairs with `[output_commitment, change_commitment]`.
    /// A zero `nullifier_2` marks a dummy second input and is not recorded;
    /// a zero `change_commitment` means no change leaf, and its ciphertext is
    /// dropped. The pool balance does not move.
    ///
    /// # Errors
    ///
    /// - [`crate::PrivacyPoolError::PoolPaused`] while paused
    /// - [`crate::PrivacyPoolError::InvalidEncoding`] /
    ///   [`crate::PrivacyPoolError::InvalidPublicInputLength`] for malformed input
    /// - [`crate::PrivacyPoolError::TokenMismatch`] if `token` is not this pool's
    /// - [`crate::PrivacyPoolError::StaleRoot`] if the root is outside the window
    /// - [`crate::PrivacyPoolError::DoubleSpend`] if a nullifier is spent or
    ///   both nullifiers are equal
    /// - [`crate::PrivacyPoolError::InvalidProof`] if verification fails
    /// - [`crate::PrivacyPoolError::TreeFull`] if the new leaves do not fit
    pub fn transfer(
        &mut self,
        proof: &[u8],
        public_inputs: &[u8],
        encrypted_notes: [Vec<u8>; 2],
    ) -> Result<TransferEvent> {
        self.ensure_active()?;
        check_proof_encoding(proof)?;
        check_note_encoding(&[&encrypted_notes[0], &encrypted_notes[1]])?;
        let inputs = TransferPublicInputs::decode(public_inputs)?;
        self.ensure_token(&inputs.token)?;

        self.ensure_known_root(&inputs.merkle_root)?;
        let (nullifier_1, nullifier_2) = inputs.nullifier_bytes();
        let spent = spent_nullifiers(nullifier_1, nullifier_2);
        self.ensure_unspent(&spent)?;

        self.verify_proof(CircuitKind::Transfer, public_inputs, proof)?;

        let [output_note, change_note] = encrypted_notes;
        let mut commitments = vec![inputs.output_commitment];
        let mut notes = vec![output_note];
        if let Some(change) = inputs.change() {
            commitments.push(change);
            notes.push(change_note);
        }
        let staged = self.stage_inserts(&commitments)?;

        self.nullifiers.mark_all_spent(&spent)?;
        let positions = self.apply_inserts(staged);

        let event = TransferEvent {
            spent_nullifiers: spent,
            output_commitments: commitments.iter().map(field_to_bytes).collect(),
            output_positions: positions,
            encrypted_notes: notes,
        };
        self.emit(PoolEvent::Transfer(event.clone()));

        info!(
            "{}: transfer spent {} notes, outputs at {:?}",
            self.id,
            event.spent_nullifiers.len(),
            event.output_positions
        );
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use ark_bn254::Fr;

    use crate::{
        errors::PrivacyPoolError,
        events::PoolEvent,
        public_inputs::TransferPublicInputs,
        test_utils::{AcceptAll, pool_with, proof_bytes},
        types::field_to_bytes,
    };

    fn inputs(token: Fr, root: Fr, nullifiers: (u64, u64), change: u64) -> TransferPublicInputs {
        TransferPublicInputs {
            token,
            merkle_root: root,
            nullifier_1: Fr::from(nullifiers.0),
            nullifier_2: Fr::from(nullifiers.1),
            output_commitment: Fr::from(500u64),
            change_commitment: Fr::from(change),
        }
    }

    fn funded_pool() -> crate::PrivacyPool {
        let (mut pool, _) = pool_with(AcceptAll::shared());
        pool.shield(1_000, &field_to_bytes(&Fr::from(1u64)), vec![])
            .unwrap();
        pool.shield(1_000, &field_to_bytes(&Fr::from(2u64)), vec![])
            .unwrap();
        pool.take_events();
        pool
    }

    #[test]
    fn test_two_input_transfer() {
        let mut pool = funded_pool();
        let token = pool.token().to_field();
        let public = inputs(token, pool.tree().root(), (7, 8), 9).encode();

        let event = pool
            .transfer(&proof_bytes(), &public, [vec![1], vec![2]])
            .unwrap();

        assert_eq!(event.spent_nullifiers.len(), 2);
        assert_eq!(event.output_positions, vec![2, 3]);
        assert_eq!(event.encrypted_notes, vec![vec![1], vec![2]]);
        assert_eq!(pool.nullifiers().len(), 2);
        assert_eq!(pool.balance(), 2_000);
        assert_eq!(pool.take_events(), vec![PoolEvent::Transfer(event)]);
    }

    #[test]
    fn test_dummy_second_input_is_not_recorded() {
        let mut pool = funded_pool();
        let token = pool.token().to_field();
        let public = inputs(token, pool.tree().root(), (7, 0), 0).encode();

        let event = pool
            .transfer(&proof_bytes(), &public, [vec![1], vec![2]])
            .unwrap();

        assert_eq!(event.spent_nullifiers, vec![field_to_bytes(&Fr::from(7u64))]);
        assert_eq!(event.output_positions, vec![2]);
        assert_eq!(event.encrypted_notes, vec![vec![1]]);
        assert_eq!(pool.nullifiers().len(), 1);
    }

    #[test]
    fn test_equal_nullifiers_are_rejected() {
        let mut pool = funded_pool();
        let token = pool.token().to_field();
        let public = inputs(token, pool.tree().root(), (7, 7), 0).encode();
        let result = pool.transfer(&proof_bytes(), &public, [vec![], vec![]]);
        assert_eq!(result, Err(PrivacyPoolError::DoubleSpend));
        assert!(pool.nullifiers().is_empty());
    }

    #[test]
    fn test_token_mismatch_is_rejected() {
        let mut pool = funded_pool();
        let public = inputs(Fr::from(3u64), pool.tree().root(), (7, 8), 0).encode();
        let result = pool.transfer(&proof_bytes(), &public, [vec![], vec![]]);
        assert_eq!(result, Err(PrivacyPoolError::TokenMismatch));
    }

    #[test]
    fn test_spent_second_nullifier_is_rejected() {
        let mut pool = funded_pool();
        let token = pool.token().to_field();
        let root = pool.tree().root();
        pool.transfer(&proof_bytes(), &inputs(token, root, (7, 0), 0).encode(), [vec![], vec![]])
            .unwrap();

        let root = pool.tree().root();
        let result = pool.transfer(
            &proof_bytes(),
            &inputs(token, root, (8, 7), 0).encode(),
            [vec![], vec![]],
        );
        assert_eq!(result, Err(PrivacyPoolError::DoubleSpend));
        assert_eq!(pool.tree().next_index(), 3);
    }
}
