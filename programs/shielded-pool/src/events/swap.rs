//! Swap event definition.

use super::{BorshEvent, EventType};
use crate::types::FieldBytes;
use borsh::{BorshDeserialize, BorshSerialize};

/// Event emitted when notes are spent in one pool and value is re-committed
/// in another.
///
/// The same event is pushed onto both pools' logs. `output_position` indexes
/// the output pool's tree; `change_position` indexes the input pool's tree.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SwapEvent {
    /// Pool the value left
    pub input_pool: u64,
    /// Pool the value entered
    pub output_pool: u64,
    /// Token spent
    pub token_in: FieldBytes,
    /// Token received
    pub token_out: FieldBytes,
    /// Nullifiers marked spent in the input pool
    pub spent_nullifiers: Vec<FieldBytes>,
    /// Commitment inserted into the output pool
    pub output_commitment: FieldBytes,
    /// Change commitment inserted into the input pool, all-zero for none
    pub change_commitment: FieldBytes,
    /// Leaf index of the output commitment in the output pool
    pub output_position: u64,
    /// Leaf index of the change commitment in the input pool
    pub change_position: Option<u64>,
    /// Exact amount sent through the exchange leg
    pub amount_in: u64,
    /// Amount the exchange leg returned
    pub amount_out: u64,
    /// Ciphertexts: output note, then the change note if one was inserted
    pub encrypted_notes: Vec<Vec<u8>>,
}

impl BorshEvent for SwapEvent {
    const EVENT_TYPE: EventType = EventType::Swap;
}
