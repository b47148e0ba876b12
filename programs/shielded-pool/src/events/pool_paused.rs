//! Pool pause changed event definition.

use super::{BorshEvent, EventType};
use borsh::{BorshDeserialize, BorshSerialize};

/// Event emitted when the pool's paused state is changed.
///
/// Emitted for both pausing AND unpausing; check `is_paused` for the new
/// state. While paused, shield, unshield, transfer and swap are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct PoolPauseChangedEvent {
    /// New state
    pub is_paused: bool,
}

impl BorshEvent for PoolPauseChangedEvent {
    const EVENT_TYPE: EventType = EventType::PoolPauseChanged;
}
