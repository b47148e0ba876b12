//! Proof verification capability.

/// External Groth16 verification capability.
///
/// Byte layouts:
/// - `vk`: `alpha(32) || beta(64) || gamma(64) || delta(64) || ic_len(8, LE) || ic(32 each)`
/// - `public_inputs`: 32-byte little-endian field elements in circuit order
/// - `proof`: `A(32) || B(64) || C(32)`
///
/// The engine treats the answer as authoritative. Implementations must return
/// `false` for malformed input rather than panic.
pub trait ProofVerifier {
    /// Returns `true` iff `proof` is valid for `public_inputs` under `vk`.
    fn verify(&self, vk: &[u8], public_inputs: &[u8], proof: &[u8]) -> bool;
}

impl<V: ProofVerifier + ?Sized> ProofVerifier for &V {
    fn verify(&self, vk: &[u8], public_inputs: &[u8], proof: &[u8]) -> bool {
        (**self).verify(vk, public_inputs, proof)
    }
}

impl<V: ProofVerifier + ?Sized> ProofVerifier for Box<V> {
    fn verify(&self, vk: &[u8], public_inputs: &[u8], proof: &[u8]) -> bool {
        (**self).verify(vk, public_inputs, proof)
    }
}

impl<V: ProofVerifier + ?Sized> ProofVerifier for std::sync::Arc<V> {
    fn verify(&self, vk: &[u8], public_inputs: &[u8], proof: &[u8]) -> bool {
        (**self).verify(vk, public_inputs, proof)
    }
}
