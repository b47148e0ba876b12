//! Shielded-note privacy pool engine.
//!
//! A pool holds one token. Value enters with [`PrivacyPool::shield`], moves
//! privately between notes with [`PrivacyPool::transfer`], crosses into
//! another pool with [`PrivacyPool::swap`] and leaves with
//! [`PrivacyPool::unshield`]. Only note commitments and nullifiers are ever
//! visible to the engine; ownership and value conservation are proven by
//! Groth16 proofs checked through a [`ProofVerifier`].
//!
//! # Layout
//!
//! - [`note`] / [`poseidon`]: key, note, commitment and nullifier derivation
//! - [`merkle_tree`]: incremental commitment tree
//! - [`state`]: nullifier registry, root history, config, verifying keys
//! - [`codec`] / [`public_inputs`]: proof, key and public-input wire formats
//! - [`groth16`]: arkworks-backed [`ProofVerifier`]
//! - [`pool`]: the state machine; [`shared`]: its thread-safe handle
//! - [`events`]: records emitted by every accepted operation

pub mod codec;
pub mod errors;
pub mod events;
pub mod groth16;
pub mod merkle_tree;
pub mod note;
pub mod pool;
pub mod poseidon;
pub mod public_inputs;
pub mod shared;
pub mod state;
pub mod token;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use errors::{CodecError, PrivacyPoolError, Result};
pub use groth16::Groth16Verifier;
pub use merkle_tree::CommitmentTree;
pub use note::{Note, ShieldedKeys};
pub use pool::{AdminCap, PoolId, PrivacyPool, SharedVerifier, SwapRequest};
pub use privacy_pool_interface::{CircuitKind, ExchangeError, ExchangeLeg, ProofVerifier};
pub use shared::SharedPool;
pub use state::{PoolConfig, VerifyingKeys};
pub use token::TokenId;
