//! Transfer event definition.

use super::{BorshEvent, EventType};
use crate::types::FieldBytes;
use borsh::{BorshDeserialize, BorshSerialize};

/// Event emitted when notes are spent and re-committed in the same pool.
///
/// `output_commitments`, `output_positions` and `encrypted_notes` are
/// parallel: the recipient output first, then change if any. A dummy second
/// input contributes no entry to `spent_nullifiers`.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TransferEvent {
    /// Nullifiers marked spent
    pub spent_nullifiers: Vec<FieldBytes>,
    /// Commitments inserted
    pub output_commitments: Vec<FieldBytes>,
    /// Leaf index of each inserted commitment
    pub output_positions: Vec<u64>,
    /// Ciphertext for each inserted commitment
    pub encrypted_notes: Vec<Vec<u8>>,
}

impl BorshEvent for TransferEvent {
    const EVENT_TYPE: EventType = EventType::Transfer;
}
