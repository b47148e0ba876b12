use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, VerifyingKey, prepare_verifying_key};
use log::debug;
use privacy_pool_interface::ProofVerifier;

use crate::{
    codec::{Groth16Proof, Groth16VerifyingKey, decode_public_inputs},
    errors::CodecError,
};

impl From<Groth16VerifyingKey> for VerifyingKey<Bn254> {
    fn from(vk: Groth16VerifyingKey) -> Self {
        VerifyingKey {
            alpha_g1: vk.alpha_g1,
            beta_g2: vk.beta_g2,
            gamma_g2: vk.gamma_g2,
            delta_g2: vk.delta_g2,
            gamma_abc_g1: vk.ic,
        }
    }
}

impl From<Groth16Proof> for Proof<Bn254> {
    fn from(proof: Groth16Proof) -> Self {
        Proof {
            a: proof.a,
            b: proof.b,
            c: proof.c,
        }
    }
}

/// Groth16 verifier over BN254, consuming the compressed wire format.
///
/// Any decoding failure or IC/input count mismatch is a rejection, never a
/// panic.
#[derive(Clone, Copy, Debug, Default)]
pub struct Groth16Verifier;

impl Groth16Verifier {
    /// Create a verifier.
    pub const fn new() -> Self {
        Self
    }

    /// Decode everything and run the pairing check.
    ///
    /// Returns `Ok(false)` for a well-formed proof that does not verify.
    ///
    /// # Errors
    ///
    /// Returns the [`CodecError`] of the first malformed component, or
    /// [`CodecError::InvalidIcLength`] if the key does not fit the input count.
    pub fn verify_encoded(
        &self,
        vk: &[u8],
        public_inputs: &[u8],
        proof: &[u8],
    ) -> Result<bool, CodecError> {
        let vk = Groth16VerifyingKey::decode(vk)?;
        let inputs = decode_public_inputs(public_inputs)?;
        let proof = Groth16Proof::decode(proof)?;

        if inputs.len() + 1 != vk.ic.len() {
            return Err(CodecError::InvalidIcLength {
                expected: inputs.len() + 1,
                actual: vk.ic.len(),
            });
        }

        let pvk: PreparedVerifyingKey<Bn254> = prepare_verifying_key(&vk.into());
        Ok(verify_prepared(&pvk, &proof.into(), &inputs))
    }
}

fn verify_prepared(pvk: &PreparedVerifyingKey<Bn254>, proof: &Proof<Bn254>, inputs: &[Fr]) -> bool {
    match Groth16::<Bn254>::verify_proof(pvk, proof, inputs) {
        Ok(valid) => valid,
        Err(e) => {
            debug!("groth16 verification error: {e}");
            false
        }
    }
}

impl ProofVerifier for Groth16Verifier {
    fn verify(&self, vk: &[u8], public_inputs: &[u8], proof: &[u8]) -> bool {
        match self.verify_encoded(vk, public_inputs, proof) {
            Ok(valid) => valid,
            Err(e) => {
                debug!("groth16 input rejected: {e}");
                false
            }
        }
    }
}
