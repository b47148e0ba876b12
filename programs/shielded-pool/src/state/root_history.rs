use std::collections::VecDeque;

use ark_bn254::Fr;
use ark_ff::Zero;

/// Default size of the root history window.
pub const ROOT_HISTORY_SIZE: usize = 100;

/// Largest root history window a pool may be configured with.
pub const MAX_ROOT_HISTORY_SIZE: usize = 4096;

/// Bounded window of superseded commitment-tree roots.
///
/// A root is pushed here just before the insert that replaces it, so proofs
/// generated against any of the last `capacity` roots stay acceptable while
/// the tree keeps growing. Oldest entries are evicted first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootHistory {
    roots: VecDeque<Fr>,
    capacity: usize,
}

impl RootHistory {
    /// Create an empty window holding at most `capacity` roots.
    ///
    /// Storage is reserved up front only up to [`MAX_ROOT_HISTORY_SIZE`].
    pub fn new(capacity: usize) -> Self {
        Self {
            roots: VecDeque::with_capacity(capacity.min(MAX_ROOT_HISTORY_SIZE)),
            capacity,
        }
    }

    /// Record a superseded root, evicting the oldest one when full.
    pub fn push(&mut self, root: Fr) {
        if self.capacity == 0 {
            return;
        }
        if self.roots.len() == self.capacity {
            self.roots.pop_front();
        }
        self.roots.push_back(root);
    }

    /// Whether `root` is in the window. The zero root is never known.
    pub fn contains(&self, root: &Fr) -> bool {
        if root.is_zero() {
            return false;
        }
        // Search newest first; recent roots are the common case
        self.roots.iter().rev().any(|r| r == root)
    }

    /// Roots currently held.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Maximum number of roots held.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Roots from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &Fr> {
        self.roots.iter().rev()
    }
}

impl Default for RootHistory {
    fn default() -> Self {
        Self::new(ROOT_HISTORY_SIZE)
    }
}
