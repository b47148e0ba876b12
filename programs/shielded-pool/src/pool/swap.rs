//! Cross-pool swap.
//!
//! The input pool spends the notes and keeps the change; the output pool
//! receives the new note. The exchange leg runs after every pool-side check
//! has passed, and the two pools are only written once it has returned an
//! acceptable amount.

use std::fmt;

use log::{info, warn};
use privacy_pool_interface::{CircuitKind, ExchangeLeg};

use super::{PrivacyPool, check_note_encoding, check_proof_encoding};
use crate::{
    errors::{PrivacyPoolError, Result},
    events::{PoolEvent, SwapEvent},
    note::swap_data_hash,
    public_inputs::SwapPublicInputs,
    state::spent_nullifiers,
    types::field_to_bytes,
};

/// Caller-supplied swap parameters.
pub struct SwapRequest<'a> {
    /// Encoded Groth16 proof
    pub proof: &'a [u8],
    /// Encoded swap public inputs (256 bytes)
    pub public_inputs: &'a [u8],
    /// Exact amount of the input token sent to the exchange leg
    pub amount_in: u64,
    /// Lowest acceptable amount of the output token
    pub min_amount_out: u64,
    /// Ciphertexts for the output note and the change note
    pub encrypted_notes: [Vec<u8>; 2],
}

impl fmt::Debug for SwapRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwapRequest")
            .field("amount_in", &self.amount_in)
            .field("min_amount_out", &self.min_amount_out)
            .finish_non_exhaustive()
    }
}

impl PrivacyPool {
    /// Spend notes in this pool, exchange `amount_in` through `exchange`, and
    /// commit the proceeds into `output`.
    ///
    /// `amount_in` leaves this pool's balance; the amount returned by the
    /// exchange leg enters `output`'s balance. The resulting [`SwapEvent`] is
    /// pushed onto both pools.
    ///
    /// # Errors
    ///
    /// - [`PrivacyPoolError::PoolPaused`] if either pool is paused
    /// - [`PrivacyPoolError::InvalidEncoding`] /
    ///   [`PrivacyPoolError::InvalidPublicInputLength`] for malformed input
    /// - [`PrivacyPoolError::ZeroAmount`] for a zero `amount_in`
    /// - [`PrivacyPoolError::TokenMismatch`] if `token_in` / `token_out` do not
    ///   match the two pools
    /// - [`PrivacyPoolError::SwapDataMismatch`] if `swap_data_hash` does not
    ///   bind `amount_in` and `min_amount_out`
    /// - [`PrivacyPoolError::StaleRoot`], [`PrivacyPoolError::DoubleSpend`],
    ///   [`PrivacyPoolError::InvalidProof`] as for transfer
    /// - [`PrivacyPoolError::InsufficientBalance`] if this pool cannot cover
    ///   `amount_in`
    /// - [`PrivacyPoolError::TreeFull`] if either new leaf does not fit
    /// - [`PrivacyPoolError::ExchangeFailed`] if the exchange leg errors
    /// - [`PrivacyPoolError::SlippageExceeded`] if it returns less than
    ///   `min_amount_out`
    /// - [`PrivacyPoolError::ArithmeticOverflow`] if the output balance would
    ///   overflow
    pub fn swap(
        &mut self,
        output: &mut PrivacyPool,
        exchange: &mut dyn ExchangeLeg,
        request: SwapRequest<'_>,
    ) -> Result<SwapEvent> {
        let SwapRequest {
            proof,
            public_inputs,
            amount_in,
            min_amount_out,
            encrypted_notes,
        } = request;

        self.ensure_active()?;
        output.ensure_active()?;
        check_proof_encoding(proof)?;
        check_note_encoding(&[&encrypted_notes[0], &encrypted_notes[1]])?;
        let inputs = SwapPublicInputs::decode(public_inputs)?;

        if amount_in == 0 {
            warn!("{}: rejected swap, zero amount", self.id);
            return Err(PrivacyPoolError::ZeroAmount);
        }
        self.ensure_token(&inputs.token_in)?;
        output.ensure_token(&inputs.token_out)?;
        if inputs.swap_data_hash != swap_data_hash(amount_in, min_amount_out)? {
            warn!("{}: rejected swap, swap data hash mismatch", self.id);
            return Err(PrivacyPoolError::SwapDataMismatch);
        }

        self.ensure_known_root(&inputs.merkle_root)?;
        let (nullifier_1, nullifier_2) = inputs.nullifier_bytes();
        let spent = spent_nullifiers(nullifier_1, nullifier_2);
        self.ensure_unspent(&spent)?;

        self.verify_proof(CircuitKind::Swap, public_inputs, proof)?;

        self.ensure_balance(amount_in)?;
        let change: Vec<_> = inputs.change().into_iter().collect();
        let staged_change = self.stage_inserts(&change)?;
        let staged_output = output.stage_inserts(&[inputs.output_commitment])?;
        let change_position = staged_change.positions.first().copied();
        let output_position = staged_output
            .positions
            .first()
            .copied()
            .ok_or(PrivacyPoolError::TreeFull)?;

        let token_in = self.token.to_bytes();
        let token_out = output.token.to_bytes();
        let amount_out = exchange
            .exchange(&token_in, &token_out, amount_in, min_amount_out)
            .inspect_err(|e| warn!("{}: exchange leg failed: {e}", self.id))?;
        if amount_out < min_amount_out {
            warn!(
                "{}: rejected swap, {amount_out} out < minimum {min_amount_out}",
                self.id
            );
            return Err(PrivacyPoolError::SlippageExceeded {
                min: min_amount_out,
                actual: amount_out,
            });
        }
        let output_balance = output
            .balance
            .checked_add(amount_out)
            .ok_or(PrivacyPoolError::ArithmeticOverflow)?;

        // Both pools move together from here
        self.nullifiers.mark_all_spent(&spent)?;
        self.apply_inserts(staged_change);
        output.apply_inserts(staged_output);
        self.balance -= amount_in;
        output.balance = output_balance;

        let [output_note, change_note] = encrypted_notes;
        let mut notes = vec![output_note];
        if change_position.is_some() {
            notes.push(change_note);
        }

        let event = SwapEvent {
            input_pool: self.id.get(),
            output_pool: output.id.get(),
            token_in,
            token_out,
            spent_nullifiers: spent,
            output_commitment: field_to_bytes(&inputs.output_commitment),
            change_commitment: field_to_bytes(&inputs.change_commitment),
            output_position,
            change_position,
            amount_in,
            amount_out,
            encrypted_notes: notes,
        };
        self.emit(PoolEvent::Swap(event.clone()));
        output.emit(PoolEvent::Swap(event.clone()));

        info!(
            "{} -> {}: swap {amount_in} for {amount_out}, output at {output_position}",
            self.id, output.id
        );
        Ok(event)
    }
}
