use ark_bn254::Fr;
use ark_ff::Zero;
use log::debug;

use crate::{
    errors::{PrivacyPoolError, Result},
    poseidon,
    types::{FieldBytes, field_to_bytes},
};

/// Deepest tree the engine accepts (2^32 leaves).
pub const MAX_TREE_DEPTH: u8 = 32;

/// Default tree depth (2^16 = 65,536 leaves).
pub const DEFAULT_TREE_DEPTH: u8 = 16;

/// Append-only incremental merkle tree of note commitments.
///
/// Only the rightmost filled subtree at each level is stored, so an insert is
/// `depth` hashes and the tree never holds its leaves.
///
/// # Index Semantics
///
/// - `next_index = 0` for an empty tree
/// - The first commitment is inserted at index 0
/// - Capacity is `2^depth`
///
/// # Empty Subtrees
///
/// `zeros[0] = H(0)` is the empty-leaf hash and `zeros[i+1] = H(zeros[i], zeros[i])`.
/// The empty tree's root is `zeros[depth]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitmentTree {
    depth: u8,
    next_index: u64,
    root: Fr,
    filled_subtrees: Vec<Fr>,
    zeros: Vec<Fr>,
}

impl CommitmentTree {
    /// Create an empty tree of `depth` levels.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::InvalidConfig`] if `depth` is 0 or above
    /// [`MAX_TREE_DEPTH`].
    pub fn new(depth: u8) -> Result<Self> {
        if depth == 0 || depth > MAX_TREE_DEPTH {
            return Err(PrivacyPoolError::InvalidConfig(format!(
                "tree depth must be in 1..={MAX_TREE_DEPTH}, got {depth}"
            )));
        }

        let zeros = Self::zero_hashes(depth)?;
        let filled_subtrees = zeros[..depth as usize].to_vec();
        let root = zeros[depth as usize];

        Ok(Self {
            depth,
            next_index: 0,
            root,
            filled_subtrees,
            zeros,
        })
    }

    /// Empty-subtree hashes `zeros[0..=depth]`.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::HashFailure`] if Poseidon fails.
    pub fn zero_hashes(depth: u8) -> Result<Vec<Fr>> {
        let mut zeros = Vec::with_capacity(depth as usize + 1);
        let mut current = poseidon::hash(&[Fr::zero()])?;
        zeros.push(current);
        for _ in 0..depth {
            current = poseidon::hash_pair(&current, &current)?;
            zeros.push(current);
        }
        Ok(zeros)
    }

    /// Tree depth.
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Index the next leaf will be written to.
    pub const fn next_index(&self) -> u64 {
        self.next_index
    }

    /// Current root.
    pub const fn root(&self) -> Fr {
        self.root
    }

    /// Current root in wire form.
    pub fn root_bytes(&self) -> FieldBytes {
        field_to_bytes(&self.root)
    }

    /// Empty-subtree hash at `level`, if within the tree.
    pub fn zero_at(&self, level: usize) -> Option<&Fr> {
        self.zeros.get(level)
    }

    /// Total number of leaves, `2^depth`.
    pub const fn capacity(&self) -> u64 {
        1u64 << self.depth
    }

    /// Leaves still available.
    pub const fn remaining_capacity(&self) -> u64 {
        self.capacity() - self.next_index
    }

    /// Whether no leaf is free.
    pub const fn is_full(&self) -> bool {
        self.next_index >= self.capacity()
    }

    /// Append `leaf` and return its position.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::TreeFull`] when no leaf is free. The tree
    /// is untouched on error.
    pub fn insert(&mut self, leaf: Fr) -> Result<u64> {
        self.append(leaf).map(|(index, _)| index)
    }

    /// Append `leaf`, returning its position and its authentication path
    /// against the new root.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::TreeFull`] when no leaf is free. The tree
    /// is untouched on error.
    pub fn append(&mut self, leaf: Fr) -> Result<(u64, Vec<Fr>)> {
        if self.is_full() {
            return Err(PrivacyPoolError::TreeFull);
        }

        let height = self.depth as usize;
        let leaf_index = self.next_index;
        let mut current_index = leaf_index;
        let mut current_level_hash = leaf;
        let mut proof = Vec::with_capacity(height);
        // Subtree writes are staged so a hash failure leaves the tree intact
        let mut staged = Vec::with_capacity(height);

        for i in 0..height {
            let (left, right) = if current_index.is_multiple_of(2) {
                staged.push((i, current_level_hash));
                proof.push(self.zeros[i]);
                (current_level_hash, self.zeros[i])
            } else {
                proof.push(self.filled_subtrees[i]);
                (self.filled_subtrees[i], current_level_hash)
            };
            current_level_hash = poseidon::hash_pair(&left, &right)?;
            current_index /= 2;
        }

        for (i, subtree) in staged {
            self.filled_subtrees[i] = subtree;
        }
        self.root = current_level_hash;
        self.next_index += 1;

        debug!("commitment inserted at index {leaf_index}");
        Ok((leaf_index, proof))
    }

    /// Fold `leaf` up `siblings` from position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::HashFailure`] if Poseidon fails.
    pub fn compute_root(leaf: &Fr, index: u64, siblings: &[Fr]) -> Result<Fr> {
        let mut current_index = index;
        let mut current = *leaf;
        for sibling in siblings {
            current = if current_index.is_multiple_of(2) {
                poseidon::hash_pair(&current, sibling)?
            } else {
                poseidon::hash_pair(sibling, &current)?
            };
            current_index /= 2;
        }
        Ok(current)
    }

    /// Check an authentication path against the current root.
    pub fn verify_proof(&self, leaf: &Fr, index: u64, siblings: &[Fr]) -> bool {
        if siblings.len() != self.depth as usize || index >= self.capacity() {
            return false;
        }
        matches!(Self::compute_root(leaf, index, siblings), Ok(root) if root == self.root)
    }
}
