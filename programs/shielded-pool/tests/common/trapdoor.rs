//! Groth16 keys with a known trapdoor.
//!
//! Knowing the exponents behind every key point lets a test solve the
//! verification equation
//!
//! ```text
//! e(A, B) = e(alpha, beta) * e(L, gamma) * e(C, delta),  L = ic[0] + sum(x_i * ic[i])
//! ```
//!
//! for `C` directly, so the real arkworks verifier accepts the resulting
//! proof for exactly the public inputs it was built for.

use ark_bn254::{Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::Field;
use shielded_pool::{
    CircuitKind, VerifyingKeys,
    codec::{Groth16Proof, Groth16VerifyingKey},
};

pub fn g1(s: Fr) -> G1Affine {
    (G1Affine::generator() * s).into_affine()
}

pub fn g2(s: Fr) -> G2Affine {
    (G2Affine::generator() * s).into_affine()
}

/// Exponents behind a family of verifying keys.
pub struct Trapdoor {
    alpha: Fr,
    beta: Fr,
    gamma: Fr,
    delta: Fr,
    ic_base: Fr,
}

impl Trapdoor {
    pub fn new(seed: u64) -> Self {
        let s = Fr::from(seed) * Fr::from(101u64);
        Self {
            alpha: s + Fr::from(3u64),
            beta: s + Fr::from(5u64),
            gamma: s + Fr::from(7u64),
            delta: s + Fr::from(11u64),
            ic_base: s + Fr::from(13u64),
        }
    }

    fn ic_scalars(&self, kind: CircuitKind) -> Vec<Fr> {
        (0..kind.ic_len() as u64)
            .map(|i| self.ic_base + Fr::from(i))
            .collect()
    }

    /// Encoded verifying key for `kind`.
    pub fn verifying_key(&self, kind: CircuitKind) -> Vec<u8> {
        Groth16VerifyingKey {
            alpha_g1: g1(self.alpha),
            beta_g2: g2(self.beta),
            gamma_g2: g2(self.gamma),
            delta_g2: g2(self.delta),
            ic: self.ic_scalars(kind).into_iter().map(g1).collect(),
        }
        .encode()
    }

    /// Keys for all three circuits.
    pub fn verifying_keys(&self) -> VerifyingKeys {
        VerifyingKeys::new(
            self.verifying_key(CircuitKind::Unshield),
            self.verifying_key(CircuitKind::Transfer),
            self.verifying_key(CircuitKind::Swap),
        )
        .expect("trapdoor keys are well-formed")
    }

    /// Encoded proof accepted for exactly `public_inputs`.
    pub fn prove(&self, kind: CircuitKind, public_inputs: &[Fr]) -> Vec<u8> {
        assert_eq!(public_inputs.len(), kind.public_input_count());
        let ic = self.ic_scalars(kind);
        let l = ic[0]
            + public_inputs
                .iter()
                .zip(&ic[1..])
                .map(|(x, u)| *x * u)
                .sum::<Fr>();

        let (a, b) = (Fr::from(17u64), Fr::from(19u64));
        let delta_inv = self.delta.inverse().expect("delta is non-zero");
        let c = (a * b - self.alpha * self.beta - l * self.gamma) * delta_inv;

        Groth16Proof {
            a: g1(a),
            b: g2(b),
            c: g1(c),
        }
        .encode()
        .to_vec()
    }
}
