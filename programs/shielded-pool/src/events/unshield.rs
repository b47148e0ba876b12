//! Unshield event definition.

use super::{BorshEvent, EventType};
use crate::types::{Address, FieldBytes};
use borsh::{BorshDeserialize, BorshSerialize};

/// Event emitted when a note is spent and value leaves the pool.
///
/// When the unshield leaves change, a [`super::ShieldEvent`] for the change
/// note is emitted first and `change_position` points at it.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct UnshieldEvent {
    /// Nullifier of the spent note
    pub nullifier: FieldBytes,
    /// Payout recipient
    pub recipient: Address,
    /// Amount paid out
    pub amount: u64,
    /// Change commitment, all-zero for no change
    pub change_commitment: FieldBytes,
    /// Leaf index of the change commitment, if one was inserted
    pub change_position: Option<u64>,
}

impl BorshEvent for UnshieldEvent {
    const EVENT_TYPE: EventType = EventType::Unshield;
}
