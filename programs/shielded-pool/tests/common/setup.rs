//! Pool construction and note fixtures.

use ark_bn254::Fr;
use shielded_pool::{
    AdminCap, Groth16Verifier, Note, PoolConfig, PrivacyPool, SharedVerifier, ShieldedKeys,
    TokenId, VerifyingKeys,
};
use std::sync::Arc;

use super::trapdoor::Trapdoor;

/// One whole token at nine decimals
pub const ONE: u64 = 1_000_000_000;

/// Recipient used by unshield tests
pub const RECIPIENT: [u8; 32] = [0x5A; 32];

/// Trapdoor keys usable wherever the verifier does not look at them.
pub fn placeholder_keys() -> VerifyingKeys {
    Trapdoor::new(0).verifying_keys()
}

/// Pool for `symbol` with default depth and history.
pub fn new_pool(symbol: &str, verifier: SharedVerifier) -> (PrivacyPool, AdminCap) {
    new_pool_with(PoolConfig::for_symbol(symbol), verifier)
}

/// Pool from an explicit config.
pub fn new_pool_with(config: PoolConfig, verifier: SharedVerifier) -> (PrivacyPool, AdminCap) {
    PrivacyPool::new(config, placeholder_keys(), verifier).expect("pool creation")
}

/// Pool checked by the real Groth16 verifier against `trapdoor`'s keys.
pub fn groth16_pool(symbol: &str, trapdoor: &Trapdoor) -> (PrivacyPool, AdminCap) {
    PrivacyPool::new(
        PoolConfig::for_symbol(symbol),
        trapdoor.verifying_keys(),
        Arc::new(Groth16Verifier::new()),
    )
    .expect("pool creation")
}

/// Deterministic owner keys.
pub fn owner() -> ShieldedKeys {
    ShieldedKeys::new(Fr::from(0x5EC2E7u64), Fr::from(0x4E11u64))
}

/// Note owned by [`owner`].
pub fn owned_note(token: TokenId, value: u64, random: u64) -> Note {
    let mpk = owner().master_public_key().expect("mpk");
    Note::new(&mpk, token, value, Fr::from(random)).expect("note")
}
