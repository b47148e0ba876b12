//! Proof verifiers for engine tests.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use shielded_pool::{ProofVerifier, SharedVerifier};

/// Verifier returning a fixed answer.
pub struct MockVerifier(pub bool);

impl MockVerifier {
    /// Shared verifier that accepts everything
    pub fn accept() -> SharedVerifier {
        Arc::new(Self(true))
    }

    /// Shared verifier that rejects everything
    pub fn reject() -> SharedVerifier {
        Arc::new(Self(false))
    }
}

impl ProofVerifier for MockVerifier {
    fn verify(&self, _vk: &[u8], _public_inputs: &[u8], _proof: &[u8]) -> bool {
        self.0
    }
}

/// Accepting verifier that records how often it was consulted.
#[derive(Default)]
pub struct CountingVerifier {
    calls: AtomicUsize,
}

impl CountingVerifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ProofVerifier for CountingVerifier {
    fn verify(&self, _vk: &[u8], _public_inputs: &[u8], _proof: &[u8]) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        true
    }
}
