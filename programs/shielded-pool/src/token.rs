//! Token identifiers.
//!
//! A pool holds exactly one token. Its identifier is a field element so it can
//! appear in note commitments and as a circuit public input.

use ark_bn254::Fr;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    errors::CodecError,
    types::{FieldBytes, field_from_bytes_canonical, field_from_bytes_reduced, field_to_bytes},
};

/// Canonical 32-byte little-endian field encoding of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(FieldBytes);

impl TokenId {
    /// Derive a token id from a human-readable symbol: SHA-256 of the UTF-8
    /// bytes, reduced into the scalar field.
    pub fn from_symbol(symbol: &str) -> Self {
        let digest: [u8; 32] = Sha256::digest(symbol.as_bytes()).into();
        Self::from_field(&field_from_bytes_reduced(&digest))
    }

    /// Wrap an already-canonical encoding.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::NonCanonicalField`] if `bytes` is >= the modulus.
    pub fn from_bytes(bytes: FieldBytes) -> Result<Self, CodecError> {
        field_from_bytes_canonical(&bytes)?;
        Ok(Self(bytes))
    }

    /// Token id for a field element.
    pub fn from_field(value: &Fr) -> Self {
        Self(field_to_bytes(value))
    }

    /// Little-endian bytes.
    pub const fn to_bytes(&self) -> FieldBytes {
        self.0
    }

    /// Borrow the little-endian bytes.
    pub const fn as_bytes(&self) -> &FieldBytes {
        &self.0
    }

    /// The token as a field element.
    pub fn to_field(&self) -> Fr {
        // Every constructor guarantees canonical bytes
        field_from_bytes_reduced(&self.0)
    }

    /// Whether the wrapped bytes are canonical.
    ///
    /// Always true for ids built through the constructors; ids deserialized
    /// from untrusted config are checked through this.
    pub fn is_canonical(&self) -> bool {
        field_from_bytes_canonical(&self.0).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_symbol_is_deterministic_and_distinct() {
        assert_eq!(TokenId::from_symbol("USDC"), TokenId::from_symbol("USDC"));
        assert_ne!(TokenId::from_symbol("USDC"), TokenId::from_symbol("SOL"));
    }

    #[test]
    fn test_from_symbol_is_canonical() {
        for symbol in ["USDC", "SOL", "", "a-very-long-token-symbol-for-testing"] {
            assert!(TokenId::from_symbol(symbol).is_canonical(), "{symbol}");
        }
    }

    #[test]
    fn test_field_round_trip() {
        let id = TokenId::from_symbol("USDC");
        assert_eq!(TokenId::from_field(&id.to_field()), id);
    }

    #[test]
    fn test_from_bytes_rejects_non_canonical() {
        assert_eq!(
            TokenId::from_bytes([0xFF; 32]),
            Err(CodecError::NonCanonicalField)
        );
        assert!(TokenId::from_bytes([7u8; 32]).is_ok());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = TokenId::from_bytes([1u8; 32]).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.starts_with('['));
        let back: TokenId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
