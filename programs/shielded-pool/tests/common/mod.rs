//! Shared test helpers organized by domain.
//!
//! This module provides common utilities for all shielded-pool tests:
//! - `setup`: Pool construction and note fixtures
//! - `verifiers`: Mock and counting proof verifiers
//! - `exchange`: Exchange legs for swap tests
//! - `trapdoor`: Groth16 keys with a known trapdoor, for real proofs without a circuit

#![allow(dead_code)]

pub mod exchange;
pub mod setup;
pub mod trapdoor;
pub mod verifiers;

// Re-export commonly used items
pub use exchange::*;
pub use setup::*;
pub use trapdoor::*;
pub use verifiers::*;
