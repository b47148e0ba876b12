//! Privacy Pool Interface
//!
//! Shared types for communication between the privacy pool engine and the
//! collaborators it delegates to.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  shielded-pool (engine)                      │
//! │  • Commitment tree / nullifier registry                      │
//! │  • Root-freshness window                                     │
//! │  • shield / unshield / transfer / swap state machine         │
//! └─────────────────────────────────────────────────────────────┘
//!               │                           │
//!               ▼                           ▼
//! ┌─────────────────────────┐   ┌─────────────────────────┐
//! │     ProofVerifier       │   │      ExchangeLeg        │
//! │  • verify(vk, pi, π)    │   │  • amount_in → out      │
//! │  • pairing arithmetic   │   │  • external liquidity   │
//! └─────────────────────────┘   └─────────────────────────┘
//! ```
//!
//! The engine never performs pairing arithmetic or price discovery itself.
//! Both concerns sit behind the traits in this crate so that hosts can plug
//! in a native verifier, a precompile, or a test double.
//!
//! # Modules
//!
//! - [`types`]: Circuit kinds and wire sizes shared with provers
//! - [`verifier`]: The proof verification capability
//! - [`exchange`]: The swap exchange leg and its error type

mod exchange;
mod types;
mod verifier;

pub use exchange::*;
pub use types::*;
pub use verifier::*;
