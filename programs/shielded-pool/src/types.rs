//! Byte-level field element helpers.
//!
//! All field elements cross the engine boundary as 32-byte little-endian
//! strings. Inside the engine they are `ark_bn254::Fr`.

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use num_bigint::BigUint;

use crate::errors::CodecError;

/// A BN254 scalar field element in 32-byte little-endian form.
pub type FieldBytes = [u8; 32];

/// Opaque recipient address for unshield payouts.
pub type Address = [u8; 32];

/// The all-zero field element, used as the "absent" sentinel for optional
/// public inputs (second nullifier, change commitment).
pub const ZERO_FIELD: FieldBytes = [0u8; 32];

/// Returns true if `bytes`, read little-endian, is strictly less than the
/// BN254 scalar field modulus.
pub fn is_less_than_bn254_field_size_le(bytes: &FieldBytes) -> bool {
    let value = BigUint::from_bytes_le(bytes);
    value < BigUint::from(Fr::MODULUS)
}

/// Encode a field element as 32 little-endian bytes.
pub fn field_to_bytes(value: &Fr) -> FieldBytes {
    let mut out = [0u8; 32];
    let le = value.into_bigint().to_bytes_le();
    out[..le.len()].copy_from_slice(&le);
    out
}

/// Decode 32 little-endian bytes, silently reducing values >= the modulus.
///
/// Used for caller-supplied secrets (spending keys, note randomness) where
/// any 32-byte string is acceptable input.
pub fn field_from_bytes_reduced(bytes: &FieldBytes) -> Fr {
    Fr::from_le_bytes_mod_order(bytes)
}

/// Decode 32 little-endian bytes, rejecting non-canonical encodings.
///
/// # Errors
///
/// Returns [`CodecError::NonCanonicalField`] if the value is >= the modulus.
pub fn field_from_bytes_canonical(bytes: &FieldBytes) -> Result<Fr, CodecError> {
    if !is_less_than_bn254_field_size_le(bytes) {
        return Err(CodecError::NonCanonicalField);
    }
    Ok(Fr::from_le_bytes_mod_order(bytes))
}

/// Decode a 32-byte slice, rejecting wrong lengths and non-canonical values.
///
/// # Errors
///
/// Returns [`CodecError::InvalidFieldLength`] or [`CodecError::NonCanonicalField`].
pub fn field_from_slice_canonical(bytes: &[u8]) -> Result<Fr, CodecError> {
    let bytes: &FieldBytes = bytes
        .try_into()
        .map_err(|_| CodecError::InvalidFieldLength(bytes.len()))?;
    field_from_bytes_canonical(bytes)
}

/// Interpret a field element as a u64 amount.
///
/// # Errors
///
/// Returns [`CodecError::AmountOutOfRange`] if the element is >= 2^64.
pub fn field_to_u64(value: &Fr) -> Result<u64, CodecError> {
    let bytes = field_to_bytes(value);
    if bytes[8..].iter().any(|b| *b != 0) {
        return Err(CodecError::AmountOutOfRange);
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&bytes[..8]);
    Ok(u64::from_le_bytes(low))
}
