use privacy_pool_interface::CircuitKind;

use crate::{codec::Groth16VerifyingKey, errors::Result};

/// Encoded verifying keys, one per circuit.
///
/// Keys are kept in wire form because that is what the verifier consumes.
/// Each is decoded once on the way in so a malformed or mis-sized key is
/// rejected at genesis or rotation, never at proof time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyingKeys {
    unshield: Vec<u8>,
    transfer: Vec<u8>,
    swap: Vec<u8>,
}

impl VerifyingKeys {
    /// Validate and wrap the three keys.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::PrivacyPoolError::InvalidEncoding`] if any key
    /// fails to decode or carries the wrong IC count for its circuit.
    pub fn new(unshield: Vec<u8>, transfer: Vec<u8>, swap: Vec<u8>) -> Result<Self> {
        Groth16VerifyingKey::decode_for(CircuitKind::Unshield, &unshield)?;
        Groth16VerifyingKey::decode_for(CircuitKind::Transfer, &transfer)?;
        Groth16VerifyingKey::decode_for(CircuitKind::Swap, &swap)?;
        Ok(Self {
            unshield,
            transfer,
            swap,
        })
    }

    /// Encoded key for `kind`.
    pub fn get(&self, kind: CircuitKind) -> &[u8] {
        match kind {
            CircuitKind::Unshield => &self.unshield,
            CircuitKind::Transfer => &self.transfer,
            CircuitKind::Swap => &self.swap,
        }
    }

    /// Validate `vk` for `kind` and swap it in, returning the previous key.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::PrivacyPoolError::InvalidEncoding`] and leaves
    /// the current key in place if `vk` is malformed.
    pub fn replace(&mut self, kind: CircuitKind, vk: Vec<u8>) -> Result<Vec<u8>> {
        Groth16VerifyingKey::decode_for(kind, &vk)?;
        let slot = match kind {
            CircuitKind::Unshield => &mut self.unshield,
            CircuitKind::Transfer => &mut self.transfer,
            CircuitKind::Swap => &mut self.swap,
        };
        Ok(std::mem::replace(slot, vk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::{CodecError, PrivacyPoolError},
        test_utils::dummy_vk,
    };

    fn keys() -> VerifyingKeys {
        VerifyingKeys::new(
            dummy_vk(CircuitKind::Unshield, 1),
            dummy_vk(CircuitKind::Transfer, 1),
            dummy_vk(CircuitKind::Swap, 1),
        )
        .unwrap()
    }

    #[test]
    fn test_get_returns_matching_key() {
        let keys = keys();
        for kind in CircuitKind::ALL {
            assert_eq!(keys.get(kind).len(), kind.verifying_key_len());
        }
    }

    #[test]
    fn test_new_rejects_swapped_keys() {
        let result = VerifyingKeys::new(
            dummy_vk(CircuitKind::Transfer, 1),
            dummy_vk(CircuitKind::Transfer, 1),
            dummy_vk(CircuitKind::Swap, 1),
        );
        assert_eq!(
            result,
            Err(PrivacyPoolError::InvalidEncoding(CodecError::InvalidIcLength {
                expected: 5,
                actual: 7
            }))
        );
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut keys = keys();
        let next = dummy_vk(CircuitKind::Swap, 2);
        let previous = keys.replace(CircuitKind::Swap, next.clone()).unwrap();
        assert_eq!(previous, dummy_vk(CircuitKind::Swap, 1));
        assert_eq!(keys.get(CircuitKind::Swap), next.as_slice());
    }

    #[test]
    fn test_replace_rejects_and_keeps_current() {
        let mut keys = keys();
        let before = keys.clone();
        assert!(keys.replace(CircuitKind::Unshield, vec![0u8; 10]).is_err());
        assert_eq!(keys, before);
    }
}
