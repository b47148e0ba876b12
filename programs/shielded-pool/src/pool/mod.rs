//! Privacy pool state machine.
//!
//! One [`PrivacyPool`] holds one token: its commitment tree, spent-nullifier
//! registry, balance, root history window and the three verifying keys.
//!
//! # Validation & Execution Flow
//!
//! Every operation runs in two phases. Nothing is written until every check
//! has passed, so a failed operation leaves the pool exactly as it was.
//!
//! ```text
//! operation(proof, public_inputs, ...)
//! │
//! ├─── VALIDATION PHASE ───────────────────────────────────────────────────────
//! │
//! ├──► 1. pool not paused                                  → PoolPaused
//! ├──► 2. proof decodes (128 bytes, points on curve),      → InvalidEncoding
//! │       note lengths fit the event's u32 prefix
//! ├──► 3. public inputs: exact length, canonical elements  → InvalidPublicInputLength
//! │                                                          / InvalidEncoding
//! ├──► 4. token / swap data bound to this pool             → TokenMismatch
//! │                                                          / SwapDataMismatch
//! ├──► 5. merkle_root ∈ {current root} ∪ root_history      → StaleRoot
//! ├──► 6. nullifiers unspent and pairwise distinct         → DoubleSpend
//! ├──► 7. verifier.verify(vk, public_inputs, proof)        → InvalidProof
//! ├──► 8. balance covers payout                            → InsufficientBalance
//! ├──► 9. new leaves appended to a copy of the tree        → TreeFull
//! │
//! ├─── EXECUTION PHASE ────────────────────────────────────────────────────────
//! │
//! ├──► 10. mark nullifiers spent
//! ├──► 11. install the staged tree, historizing each superseded root
//! ├──► 12. move balance
//! └──► 13. push events
//! ```

mod admin;
mod shield;
mod swap;
mod transfer;
mod unshield;

pub use admin::AdminCap;
pub use swap::SwapRequest;

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use ark_bn254::Fr;
use ark_ff::Zero;
use log::{debug, info, warn};
use privacy_pool_interface::{CircuitKind, ProofVerifier};

use crate::{
    codec::Groth16Proof,
    errors::{PrivacyPoolError, Result},
    events::{PoolEvent, ShieldEvent, encrypted_note_len},
    merkle_tree::CommitmentTree,
    state::{NullifierRegistry, PoolConfig, RootHistory, VerifyingKeys},
    token::TokenId,
    types::{FieldBytes, field_to_bytes},
};

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique pool identifier, used to bind admin capabilities and to
/// order locks across pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoolId(u64);

impl PoolId {
    fn next() -> Self {
        Self(NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool-{}", self.0)
    }
}

/// Shared proof verifier handle.
pub type SharedVerifier = Arc<dyn ProofVerifier + Send + Sync>;

/// A single-token shielded pool.
pub struct PrivacyPool {
    id: PoolId,
    token: TokenId,
    balance: u64,
    tree: CommitmentTree,
    nullifiers: NullifierRegistry,
    root_history: RootHistory,
    verifying_keys: VerifyingKeys,
    verifier: SharedVerifier,
    paused: bool,
    events: Vec<PoolEvent>,
}

impl PrivacyPool {
    /// Create a pool at genesis and the admin capability bound to it.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::InvalidConfig`] for an out-of-range config.
    pub fn new(
        config: PoolConfig,
        verifying_keys: VerifyingKeys,
        verifier: SharedVerifier,
    ) -> Result<(Self, AdminCap)> {
        config.validate()?;
        let tree = CommitmentTree::new(config.tree_depth)?;
        let id = PoolId::next();

        info!(
            "{id}: created (depth {}, root history {})",
            config.tree_depth, config.root_history_size
        );

        let pool = Self {
            id,
            token: config.token,
            balance: 0,
            tree,
            nullifiers: NullifierRegistry::new(),
            root_history: RootHistory::new(config.root_history_size),
            verifying_keys,
            verifier,
            paused: false,
            events: Vec::new(),
        };
        Ok((pool, AdminCap::new(id)))
    }

    /// Pool identifier.
    pub const fn id(&self) -> PoolId {
        self.id
    }

    /// Token held by the pool.
    pub const fn token(&self) -> TokenId {
        self.token
    }

    /// Public balance backing all unspent notes.
    pub const fn balance(&self) -> u64 {
        self.balance
    }

    /// Commitment tree.
    pub const fn tree(&self) -> &CommitmentTree {
        &self.tree
    }

    /// Spent-nullifier registry.
    pub const fn nullifiers(&self) -> &NullifierRegistry {
        &self.nullifiers
    }

    /// Superseded roots still accepted.
    pub const fn root_history(&self) -> &RootHistory {
        &self.root_history
    }

    /// Current root in wire form.
    pub fn root(&self) -> FieldBytes {
        self.tree.root_bytes()
    }

    /// Encoded verifying key for `kind`.
    pub fn verifying_key(&self, kind: CircuitKind) -> &[u8] {
        self.verifying_keys.get(kind)
    }

    /// Whether user operations are suspended.
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether a nullifier has been spent here.
    pub fn is_spent(&self, nullifier: &FieldBytes) -> bool {
        self.nullifiers.is_spent(nullifier)
    }

    /// Whether `root` is the current root or in the history window.
    /// The zero root is never known.
    pub fn is_known_root(&self, root: &Fr) -> bool {
        if root.is_zero() {
            return false;
        }
        *root == self.tree.root() || self.root_history.contains(root)
    }

    /// Events emitted since the last drain.
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// Drain emitted events.
    pub fn take_events(&mut self) -> Vec<PoolEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------------
    // Shared validation steps
    // ------------------------------------------------------------------------

    fn ensure_active(&self) -> Result<()> {
        if self.paused {
            debug!("{}: rejected, pool paused", self.id);
            return Err(PrivacyPoolError::PoolPaused);
        }
        Ok(())
    }

    fn ensure_known_root(&self, root: &Fr) -> Result<()> {
        if !self.is_known_root(root) {
            warn!("{}: rejected, stale root", self.id);
            return Err(PrivacyPoolError::StaleRoot);
        }
        Ok(())
    }

    fn ensure_token(&self, token: &Fr) -> Result<()> {
        if *token != self.token.to_field() {
            warn!("{}: rejected, token mismatch", self.id);
            return Err(PrivacyPoolError::TokenMismatch);
        }
        Ok(())
    }

    fn ensure_unspent(&self, nullifiers: &[FieldBytes]) -> Result<()> {
        self.nullifiers.ensure_unspent(nullifiers).inspect_err(|_| {
            warn!("{}: rejected, nullifier already spent", self.id);
        })
    }

    fn ensure_balance(&self, amount: u64) -> Result<()> {
        if self.balance < amount {
            warn!(
                "{}: rejected, balance {} < {}",
                self.id, self.balance, amount
            );
            return Err(PrivacyPoolError::InsufficientBalance);
        }
        Ok(())
    }

    /// Run the verifier for `kind` against this pool's key.
    fn verify_proof(&self, kind: CircuitKind, public_inputs: &[u8], proof: &[u8]) -> Result<()> {
        let vk = self.verifying_keys.get(kind);
        if !self.verifier.verify(vk, public_inputs, proof) {
            warn!("{}: rejected, {kind} proof invalid", self.id);
            return Err(PrivacyPoolError::InvalidProof);
        }
        Ok(())
    }

    /// Append `commitments` to a copy of the tree.
    ///
    /// Nothing in the pool changes; [`Self::apply_inserts`] swaps the copy in
    /// once every other check has passed.
    fn stage_inserts(&self, commitments: &[Fr]) -> Result<StagedInserts> {
        let mut tree = self.tree.clone();
        let mut superseded = Vec::with_capacity(commitments.len());
        let mut positions = Vec::with_capacity(commitments.len());
        for commitment in commitments {
            superseded.push(tree.root());
            let position = tree.insert(*commitment).inspect_err(|_| {
                warn!("{}: rejected, cannot insert {} leaves", self.id, commitments.len());
            })?;
            positions.push(position);
        }
        Ok(StagedInserts {
            tree,
            superseded,
            positions,
        })
    }

    // ------------------------------------------------------------------------
    // Execution steps
    // ------------------------------------------------------------------------

    /// Install a staged tree, historizing each root it superseded.
    fn apply_inserts(&mut self, staged: StagedInserts) -> Vec<u64> {
        self.tree = staged.tree;
        for root in staged.superseded {
            self.root_history.push(root);
        }
        staged.positions
    }

    /// Record the shield event for a leaf that has been applied.
    fn emit_shield(
        &mut self,
        position: u64,
        commitment: &Fr,
        encrypted_note: Vec<u8>,
    ) -> ShieldEvent {
        let event = ShieldEvent::new(position, field_to_bytes(commitment), encrypted_note);
        self.emit(PoolEvent::Shield(event.clone()));
        event
    }

    fn emit(&mut self, event: PoolEvent) {
        debug!("{}: emit {}", self.id, event.name());
        self.events.push(event);
    }
}

/// Tree with new leaves appended, not yet installed in the pool.
struct StagedInserts {
    tree: CommitmentTree,
    superseded: Vec<Fr>,
    positions: Vec<u64>,
}

/// Decode the proof up front so malformed bytes fail as `InvalidEncoding`
/// before any state lookup or verification.
fn check_proof_encoding(proof: &[u8]) -> Result<()> {
    Groth16Proof::decode(proof)?;
    Ok(())
}

/// Ciphertexts must fit the shield event's length prefix.
fn check_note_encoding(notes: &[&[u8]]) -> Result<()> {
    for note in notes {
        encrypted_note_len(note.len())?;
    }
    Ok(())
}

impl fmt::Debug for PrivacyPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivacyPool")
            .field("id", &self.id)
            .field("token", &self.token)
            .field("balance", &self.balance)
            .field("next_index", &self.tree.next_index())
            .field("spent", &self.nullifiers.len())
            .field("paused", &self.paused)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{AcceptAll, pool_with};

    #[test]
    fn test_genesis_state() {
        let (pool, cap) = pool_with(AcceptAll::shared());
        assert_eq!(pool.balance(), 0);
        assert_eq!(pool.tree().next_index(), 0);
        assert!(pool.nullifiers().is_empty());
        assert!(pool.root_history().is_empty());
        assert!(!pool.is_paused());
        assert_eq!(cap.pool_id(), pool.id());
    }

    #[test]
    fn test_oversized_history_is_rejected_at_genesis() {
        let config = PoolConfig::for_symbol("USDC")
            .with_root_history_size(usize::MAX);
        let result = PrivacyPool::new(config, crate::test_utils::keys(), AcceptAll::shared());
        assert!(matches!(result, Err(PrivacyPoolError::InvalidConfig(_))));
    }

    #[test]
    fn test_note_encoding_accepts_prefixable_lengths() {
        assert!(check_note_encoding(&[&[], &[0xEE; 64]]).is_ok());
    }

    #[test]
    fn test_pool_ids_are_unique() {
        let (a, _) = pool_with(AcceptAll::shared());
        let (b, _) = pool_with(AcceptAll::shared());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_current_root_is_known() {
        let (pool, _) = pool_with(AcceptAll::shared());
        assert!(pool.is_known_root(&pool.tree().root()));
        assert!(!pool.is_known_root(&Fr::from(12345u64)));
        assert!(!pool.is_known_root(&Fr::from(0u64)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PoolConfig::for_symbol("USDC").with_tree_depth(0);
        let result = PrivacyPool::new(config, crate::test_utils::keys(), AcceptAll::shared());
        assert!(matches!(result, Err(PrivacyPoolError::InvalidConfig(_))));
    }

    #[test]
    fn test_debug_omits_verifier() {
        let (pool, _) = pool_with(AcceptAll::shared());
        let rendered = format!("{pool:?}");
        assert!(rendered.starts_with("PrivacyPool {"));
        assert!(rendered.contains("balance: 0"));
    }
}
