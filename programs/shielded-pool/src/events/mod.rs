//! Event definitions for the privacy pool engine.
//!
//! Every successful operation pushes its events onto the pool's log, where
//! hosts drain them with [`crate::PrivacyPool::take_events`] and forward the
//! serialized bytes to indexers and wallets.
//!
//! # Event Types
//!
//! ## Core Events (1-15)
//! - [`ShieldEvent`] - A commitment entered the tree with its encrypted note
//!   (shield deposits and unshield change)
//! - [`UnshieldEvent`] - A note was spent and value left the pool
//! - [`TransferEvent`] - Notes were spent and re-committed inside the pool
//! - [`SwapEvent`] - Notes were spent in one pool and value re-committed in another
//!
//! ## Admin Events (48-63)
//! - [`VerifyingKeyRotatedEvent`] - A circuit's verifying key was replaced
//! - [`PoolPauseChangedEvent`] - The pool was paused or unpaused
//!
//! # Wire Format
//!
//! `[discriminator: 8 bytes LE][body]`. The shield body is a Pod header
//! followed by the ciphertext; every other body is borsh.

mod pool_paused;
mod shield;
mod swap;
mod transfer;
mod unshield;
mod verifying_key_rotated;

pub use pool_paused::*;
pub use shield::*;
pub use swap::*;
pub use transfer::*;
pub use unshield::*;
pub use verifying_key_rotated::*;

use std::io;

use borsh::{BorshDeserialize, BorshSerialize};

/// Event type discriminators for identifying event types in logs.
///
/// Each event type has a unique u64 discriminator prepended to its serialized data.
///
/// # Ranges
/// - **1-15**: Core events (shield, unshield, transfer, swap)
/// - **48-63**: Admin events
#[repr(u64)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
pub enum EventType {
    // =========================================================================
    // Core Events (1-15)
    // =========================================================================
    /// Commitment inserted with its encrypted note
    Shield = 1,
    /// Note spent and value paid out
    Unshield = 2,
    /// Notes spent and re-committed in the same pool
    Transfer = 3,
    /// Notes spent in one pool, value re-committed in another
    Swap = 4,
    // Reserved: 5-15

    // =========================================================================
    // Admin Events (48-63)
    // =========================================================================
    /// Verifying key replaced for one circuit
    VerifyingKeyRotated = 48,
    /// Pool paused state changed (emitted for both pause and unpause)
    PoolPauseChanged = 49,
    // Reserved: 50-63
}

impl EventType {
    /// Map a wire discriminator back to an event type.
    pub const fn from_discriminator(discriminator: u64) -> Option<Self> {
        match discriminator {
            1 => Some(Self::Shield),
            2 => Some(Self::Unshield),
            3 => Some(Self::Transfer),
            4 => Some(Self::Swap),
            48 => Some(Self::VerifyingKeyRotated),
            49 => Some(Self::PoolPauseChanged),
            _ => None,
        }
    }

    /// Wire discriminator.
    pub const fn discriminator(self) -> u64 {
        self as u64
    }
}

/// Borsh-bodied event with a fixed discriminator.
pub trait BorshEvent: BorshSerialize + BorshDeserialize + Sized {
    /// Discriminator written ahead of the body.
    const EVENT_TYPE: EventType;

    /// `[discriminator: 8 bytes LE][borsh body]`.
    ///
    /// # Errors
    ///
    /// Propagates borsh serialization errors.
    fn to_event_bytes(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(64);
        bytes.extend_from_slice(&Self::EVENT_TYPE.discriminator().to_le_bytes());
        self.serialize(&mut bytes)?;
        Ok(bytes)
    }

    /// Parse event bytes, checking the discriminator.
    fn parse(data: &[u8]) -> Option<Self> {
        let (discriminator, body) = split_discriminator(data)?;
        if discriminator != Self::EVENT_TYPE.discriminator() {
            return None;
        }
        borsh::from_slice(body).ok()
    }
}

fn split_discriminator(data: &[u8]) -> Option<(u64, &[u8])> {
    let (head, body) = data.split_first_chunk::<8>()?;
    Some((u64::from_le_bytes(*head), body))
}

/// Any event the engine emits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolEvent {
    /// See [`ShieldEvent`]
    Shield(ShieldEvent),
    /// See [`UnshieldEvent`]
    Unshield(UnshieldEvent),
    /// See [`TransferEvent`]
    Transfer(TransferEvent),
    /// See [`SwapEvent`]
    Swap(SwapEvent),
    /// See [`VerifyingKeyRotatedEvent`]
    VerifyingKeyRotated(VerifyingKeyRotatedEvent),
    /// See [`PoolPauseChangedEvent`]
    PoolPauseChanged(PoolPauseChangedEvent),
}

impl PoolEvent {
    /// Discriminator of the wrapped event.
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::Shield(_) => EventType::Shield,
            Self::Unshield(_) => EventType::Unshield,
            Self::Transfer(_) => EventType::Transfer,
            Self::Swap(_) => EventType::Swap,
            Self::VerifyingKeyRotated(_) => EventType::VerifyingKeyRotated,
            Self::PoolPauseChanged(_) => EventType::PoolPauseChanged,
        }
    }

    /// Event name for logs.
    pub fn name(&self) -> &'static str {
        self.event_type().into()
    }

    /// Serialize with the discriminator prepended.
    ///
    /// # Errors
    ///
    /// Propagates borsh serialization errors, and reports a shield
    /// ciphertext too long for its length prefix as
    /// [`io::ErrorKind::InvalidData`].
    pub fn to_event_bytes(&self) -> io::Result<Vec<u8>> {
        match self {
            Self::Shield(event) => event
                .to_event_bytes()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Self::Unshield(event) => event.to_event_bytes(),
            Self::Transfer(event) => event.to_event_bytes(),
            Self::Swap(event) => event.to_event_bytes(),
            Self::VerifyingKeyRotated(event) => event.to_event_bytes(),
            Self::PoolPauseChanged(event) => event.to_event_bytes(),
        }
    }

    /// Parse any event from its wire bytes.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let (discriminator, _) = split_discriminator(data)?;
        match EventType::from_discriminator(discriminator)? {
            EventType::Shield => parse_shield_event(data).map(Self::Shield),
            EventType::Unshield => UnshieldEvent::parse(data).map(Self::Unshield),
            EventType::Transfer => TransferEvent::parse(data).map(Self::Transfer),
            EventType::Swap => SwapEvent::parse(data).map(Self::Swap),
            EventType::VerifyingKeyRotated => {
                VerifyingKeyRotatedEvent::parse(data).map(Self::VerifyingKeyRotated)
            }
            EventType::PoolPauseChanged => {
                PoolPauseChangedEvent::parse(data).map(Self::PoolPauseChanged)
            }
        }
    }
}
