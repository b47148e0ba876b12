//! Shared fixtures for unit tests.

use std::sync::Arc;

use ark_bn254::{Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::Field;
use privacy_pool_interface::{CircuitKind, ProofVerifier};

use crate::{
    codec::{Groth16Proof, Groth16VerifyingKey},
    pool::{AdminCap, PrivacyPool, SharedVerifier},
    state::{PoolConfig, VerifyingKeys},
};

/// Verifier that accepts every proof.
pub struct AcceptAll;

impl AcceptAll {
    pub fn shared() -> SharedVerifier {
        Arc::new(Self)
    }
}

impl ProofVerifier for AcceptAll {
    fn verify(&self, _: &[u8], _: &[u8], _: &[u8]) -> bool {
        true
    }
}

/// Verifier that rejects every proof.
pub struct RejectAll;

impl RejectAll {
    pub fn shared() -> SharedVerifier {
        Arc::new(Self)
    }
}

impl ProofVerifier for RejectAll {
    fn verify(&self, _: &[u8], _: &[u8], _: &[u8]) -> bool {
        false
    }
}

pub fn g1(s: Fr) -> G1Affine {
    (G1Affine::generator() * s).into_affine()
}

pub fn g2(s: Fr) -> G2Affine {
    (G2Affine::generator() * s).into_affine()
}

/// Well-formed key for `kind` whose points depend on `seed`.
pub fn dummy_vk(kind: CircuitKind, seed: u64) -> Vec<u8> {
    let s = Fr::from(seed);
    Groth16VerifyingKey {
        alpha_g1: g1(s + Fr::from(1u64)),
        beta_g2: g2(s + Fr::from(2u64)),
        gamma_g2: g2(s + Fr::from(3u64)),
        delta_g2: g2(s + Fr::from(4u64)),
        ic: (0..kind.ic_len() as u64)
            .map(|i| g1(s + Fr::from(10 + i)))
            .collect(),
    }
    .encode()
}

pub fn keys() -> VerifyingKeys {
    VerifyingKeys::new(
        dummy_vk(CircuitKind::Unshield, 1),
        dummy_vk(CircuitKind::Transfer, 1),
        dummy_vk(CircuitKind::Swap, 1),
    )
    .unwrap()
}

pub fn pool_with(verifier: SharedVerifier) -> (PrivacyPool, AdminCap) {
    PrivacyPool::new(PoolConfig::for_symbol("USDC"), keys(), verifier).unwrap()
}

/// A proof that decodes but proves nothing.
pub fn proof_bytes() -> Vec<u8> {
    Groth16Proof {
        a: g1(Fr::from(2u64)),
        b: g2(Fr::from(3u64)),
        c: g1(Fr::from(4u64)),
    }
    .encode()
    .to_vec()
}

/// Key and proof built from known exponents so that
/// `e(A, B) = e(alpha, beta) * e(L, gamma) * e(C, delta)` holds for `inputs`.
pub fn trapdoor_fixture(inputs: &[Fr]) -> (Vec<u8>, Vec<u8>) {
    let (alpha, beta, gamma, delta) = (
        Fr::from(3u64),
        Fr::from(5u64),
        Fr::from(7u64),
        Fr::from(11u64),
    );
    let ic: Vec<Fr> = (0..=inputs.len() as u64).map(|i| Fr::from(13 + i)).collect();
    let l = ic[0]
        + inputs
            .iter()
            .zip(&ic[1..])
            .map(|(x, u)| *x * u)
            .sum::<Fr>();
    let (a, b) = (Fr::from(17u64), Fr::from(19u64));
    let c = (a * b - alpha * beta - l * gamma) * delta.inverse().unwrap();

    let vk = Groth16VerifyingKey {
        alpha_g1: g1(alpha),
        beta_g2: g2(beta),
        gamma_g2: g2(gamma),
        delta_g2: g2(delta),
        ic: ic.iter().map(|u| g1(*u)).collect(),
    };
    let proof = Groth16Proof {
        a: g1(a),
        b: g2(b),
        c: g1(c),
    };
    (vk.encode(), proof.encode().to_vec())
}
