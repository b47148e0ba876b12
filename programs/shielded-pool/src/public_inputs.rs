//! Public-input layouts for each circuit.
//!
//! The field order here is the byte-level contract with the prover. Every
//! element is 32 bytes little-endian and must be canonical.

use ark_bn254::Fr;
use ark_ff::Zero;
use privacy_pool_interface::CircuitKind;

use crate::{
    codec::{decode_public_inputs, encode_public_inputs},
    errors::{PrivacyPoolError, Result},
    types::{FieldBytes, field_to_bytes, field_to_u64},
};

/// Check the blob length for `kind` and decode it into field elements.
fn decode_for(kind: CircuitKind, bytes: &[u8]) -> Result<Vec<Fr>> {
    if bytes.len() != kind.public_input_len() {
        return Err(PrivacyPoolError::InvalidPublicInputLength {
            expected: kind.public_input_len(),
            actual: bytes.len(),
        });
    }
    Ok(decode_public_inputs(bytes)?)
}

/// Unshield public inputs.
///
/// Layout: `nullifier | merkle_root | change_commitment | unshield_amount`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnshieldPublicInputs {
    /// Nullifier of the spent note
    pub nullifier: Fr,
    /// Root the membership proof was built against
    pub merkle_root: Fr,
    /// Change note commitment, zero for no change
    pub change_commitment: Fr,
    /// Amount paid out
    pub unshield_amount: u64,
}

impl UnshieldPublicInputs {
    /// Decode a 128-byte blob.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::InvalidPublicInputLength`] for a wrong
    /// length and [`PrivacyPoolError::InvalidEncoding`] for non-canonical
    /// elements or an amount above `u64::MAX`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let fields = decode_for(CircuitKind::Unshield, bytes)?;
        Ok(Self {
            nullifier: fields[0],
            merkle_root: fields[1],
            change_commitment: fields[2],
            unshield_amount: field_to_u64(&fields[3])?,
        })
    }

    /// Encode in circuit order.
    pub fn encode(&self) -> Vec<u8> {
        encode_public_inputs(&self.to_fields())
    }

    /// Elements in circuit order.
    pub fn to_fields(&self) -> Vec<Fr> {
        vec![
            self.nullifier,
            self.merkle_root,
            self.change_commitment,
            Fr::from(self.unshield_amount),
        ]
    }

    /// Change commitment, if present.
    pub fn change(&self) -> Option<Fr> {
        non_zero(self.change_commitment)
    }
}

/// Transfer public inputs.
///
/// Layout: `token | merkle_root | nullifier_1 | nullifier_2 | output_commitment | change_commitment`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferPublicInputs {
    /// Token of every note in the transfer
    pub token: Fr,
    /// Root the membership proofs were built against
    pub merkle_root: Fr,
    /// Nullifier of the first input
    pub nullifier_1: Fr,
    /// Nullifier of the second input, zero for a dummy
    pub nullifier_2: Fr,
    /// Recipient note commitment
    pub output_commitment: Fr,
    /// Change note commitment, zero for no change
    pub change_commitment: Fr,
}

impl TransferPublicInputs {
    /// Decode a 192-byte blob.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::InvalidPublicInputLength`] for a wrong
    /// length and [`PrivacyPoolError::InvalidEncoding`] for non-canonical
    /// elements.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let fields = decode_for(CircuitKind::Transfer, bytes)?;
        Ok(Self {
            token: fields[0],
            merkle_root: fields[1],
            nullifier_1: fields[2],
            nullifier_2: fields[3],
            output_commitment: fields[4],
            change_commitment: fields[5],
        })
    }

    /// Encode in circuit order.
    pub fn encode(&self) -> Vec<u8> {
        encode_public_inputs(&self.to_fields())
    }

    /// Elements in circuit order.
    pub fn to_fields(&self) -> Vec<Fr> {
        vec![
            self.token,
            self.merkle_root,
            self.nullifier_1,
            self.nullifier_2,
            self.output_commitment,
            self.change_commitment,
        ]
    }

    /// Nullifiers in wire form.
    pub fn nullifier_bytes(&self) -> (FieldBytes, FieldBytes) {
        (field_to_bytes(&self.nullifier_1), field_to_bytes(&self.nullifier_2))
    }

    /// Change commitment, if present.
    pub fn change(&self) -> Option<Fr> {
        non_zero(self.change_commitment)
    }
}

/// Swap public inputs.
///
/// Layout: `token_in | token_out | merkle_root | nullifier_1 | nullifier_2 |
/// swap_data_hash | output_commitment | change_commitment`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapPublicInputs {
    /// Token spent from the input pool
    pub token_in: Fr,
    /// Token received into the output pool
    pub token_out: Fr,
    /// Input pool root the membership proofs were built against
    pub merkle_root: Fr,
    /// Nullifier of the first input
    pub nullifier_1: Fr,
    /// Nullifier of the second input, zero for a dummy
    pub nullifier_2: Fr,
    /// `H(amount_in, min_amount_out)`
    pub swap_data_hash: Fr,
    /// Note commitment inserted into the output pool
    pub output_commitment: Fr,
    /// Change note commitment for the input pool, zero for no change
    pub change_commitment: Fr,
}

impl SwapPublicInputs {
    /// Decode a 256-byte blob.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::InvalidPublicInputLength`] for a wrong
    /// length and [`PrivacyPoolError::InvalidEncoding`] for non-canonical
    /// elements.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let fields = decode_for(CircuitKind::Swap, bytes)?;
        Ok(Self {
            token_in: fields[0],
            token_out: fields[1],
            merkle_root: fields[2],
            nullifier_1: fields[3],
            nullifier_2: fields[4],
            swap_data_hash: fields[5],
            output_commitment: fields[6],
            change_commitment: fields[7],
        })
    }

    /// Encode in circuit order.
    pub fn encode(&self) -> Vec<u8> {
        encode_public_inputs(&self.to_fields())
    }

    /// Elements in circuit order.
    pub fn to_fields(&self) -> Vec<Fr> {
        vec![
            self.token_in,
            self.token_out,
            self.merkle_root,
            self.nullifier_1,
            self.nullifier_2,
            self.swap_data_hash,
            self.output_commitment,
            self.change_commitment,
        ]
    }

    /// Nullifiers in wire form.
    pub fn nullifier_bytes(&self) -> (FieldBytes, FieldBytes) {
        (field_to_bytes(&self.nullifier_1), field_to_bytes(&self.nullifier_2))
    }

    /// Change commitment, if present.
    pub fn change(&self) -> Option<Fr> {
        non_zero(self.change_commitment)
    }
}

fn non_zero(value: Fr) -> Option<Fr> {
    (!value.is_zero()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CodecError;

    fn unshield() -> UnshieldPublicInputs {
        UnshieldPublicInputs {
            nullifier: Fr::from(1u64),
            merkle_root: Fr::from(2u64),
            change_commitment: Fr::from(3u64),
            unshield_amount: 600_000_000,
        }
    }

    #[test]
    fn test_unshield_layout_order() {
        let bytes = unshield().encode();
        assert_eq!(bytes.len(), 128);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[32], 2);
        assert_eq!(bytes[64], 3);
        assert_eq!(&bytes[96..104], &600_000_000u64.to_le_bytes());
        assert_eq!(UnshieldPublicInputs::decode(&bytes).unwrap(), unshield());
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        let bytes = unshield().encode();
        assert_eq!(
            UnshieldPublicInputs::decode(&bytes[..96]),
            Err(PrivacyPoolError::InvalidPublicInputLength {
                expected: 128,
                actual: 96
            })
        );
        assert_eq!(
            TransferPublicInputs::decode(&bytes),
            Err(PrivacyPoolError::InvalidPublicInputLength {
                expected: 192,
                actual: 128
            })
        );
    }

    #[test]
    fn test_oversized_amount_is_rejected() {
        let mut bytes = unshield().encode();
        bytes[104] = 1;
        assert_eq!(
            UnshieldPublicInputs::decode(&bytes),
            Err(PrivacyPoolError::InvalidEncoding(CodecError::AmountOutOfRange))
        );
    }

    #[test]
    fn test_non_canonical_element_is_rejected() {
        let mut bytes = vec![0u8; 192];
        bytes[32..64].copy_from_slice(&[0xFF; 32]);
        assert_eq!(
            TransferPublicInputs::decode(&bytes),
            Err(PrivacyPoolError::InvalidEncoding(CodecError::NonCanonicalField))
        );
    }

    #[test]
    fn test_zero_change_is_absent() {
        let mut inputs = unshield();
        assert_eq!(inputs.change(), Some(Fr::from(3u64)));
        inputs.change_commitment = Fr::zero();
        assert_eq!(inputs.change(), None);
    }

    #[test]
    fn test_swap_layout_order() {
        let inputs = SwapPublicInputs {
            token_in: Fr::from(1u64),
            token_out: Fr::from(2u64),
            merkle_root: Fr::from(3u64),
            nullifier_1: Fr::from(4u64),
            nullifier_2: Fr::zero(),
            swap_data_hash: Fr::from(6u64),
            output_commitment: Fr::from(7u64),
            change_commitment: Fr::from(8u64),
        };
        let bytes = inputs.encode();
        assert_eq!(bytes.len(), 256);
        for (i, expected) in [1u8, 2, 3, 4, 0, 6, 7, 8].iter().enumerate() {
            assert_eq!(bytes[i * 32], *expected);
        }
        assert_eq!(SwapPublicInputs::decode(&bytes).unwrap(), inputs);
        assert_eq!(inputs.nullifier_bytes().1, [0u8; 32]);
    }
}
