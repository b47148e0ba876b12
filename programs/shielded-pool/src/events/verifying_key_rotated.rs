//! Verifying key rotation event definition.

use super::{BorshEvent, EventType};
use borsh::{BorshDeserialize, BorshSerialize};

/// Event emitted when the admin replaces a circuit's verifying key.
///
/// Carries a SHA-256 digest of the new encoded key rather than the key
/// itself, so indexers can match it against a published key set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct VerifyingKeyRotatedEvent {
    /// Circuit discriminant (0 = unshield, 1 = transfer, 2 = swap)
    pub circuit: u8,
    /// SHA-256 of the new encoded verifying key
    pub vk_hash: [u8; 32],
}

impl BorshEvent for VerifyingKeyRotatedEvent {
    const EVENT_TYPE: EventType = EventType::VerifyingKeyRotated;
}
