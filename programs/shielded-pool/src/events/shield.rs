//! Shield event definition.
//!
//! # Event Format
//!
//! This event uses a hybrid encoding for variable-length data:
//! - Fixed-size header (Pod-compatible, zero-copy accessible)
//! - Variable-length body (encrypted note)
//!
//! Wire format: `[discriminator: 8 bytes][header: 48 bytes][encrypted_note: variable]`
//!
//! Wallets scan every shield event, so the header stays zero-copy readable.

use super::EventType;
use crate::{errors::CodecError, types::FieldBytes};
use bytemuck::{Pod, Zeroable};

/// Size of the fixed header portion of ShieldEvent.
/// Layout: position (8) + commitment (32) + encrypted_note_len (4) + _padding (4) = 48 bytes
pub const SHIELD_HEADER_SIZE: usize = 48;

/// Fixed-size header for ShieldEvent.
///
/// # Wire Format
/// ```text
/// [discriminator: 8 bytes][header: 48 bytes][encrypted_note: variable]
///                         ^^^^^^^^^^^^^^^^
///                         This struct
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct ShieldHeader {
    /// Leaf index of the commitment
    pub position: u64,
    /// The commitment (32 bytes, little-endian)
    pub commitment: FieldBytes,
    /// Length of the encrypted note that follows
    pub encrypted_note_len: u32,
    /// Padding for 8-byte alignment
    pub _padding: [u8; 4],
}

impl ShieldHeader {
    /// Event discriminator (EventType::Shield = 1)
    pub const DISCRIMINATOR: u64 = EventType::Shield as u64;
}

/// Length prefix for an encrypted note of `len` bytes.
///
/// # Errors
///
/// Returns [`CodecError::EncryptedNoteTooLong`] if `len` exceeds `u32::MAX`.
pub fn encrypted_note_len(len: usize) -> Result<u32, CodecError> {
    u32::try_from(len).map_err(|_| CodecError::EncryptedNoteTooLong(len))
}

/// Event emitted when a commitment enters the tree together with its
/// encrypted note.
///
/// Emitted by shield, and by unshield for its change note.
///
/// # Parsing
///
/// ```ignore
/// let discriminator = u64::from_le_bytes(data[0..8]);
/// let header: &ShieldHeader = bytemuck::from_bytes(&data[8..56]);
/// let encrypted_note = &data[56..56 + header.encrypted_note_len as usize];
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShieldEvent {
    /// Leaf index of the commitment
    pub position: u64,
    /// The commitment
    pub commitment: FieldBytes,
    /// Ciphertext for the note owner, opaque to the engine
    pub encrypted_note: Vec<u8>,
}

impl ShieldEvent {
    /// Create a shield event.
    pub fn new(position: u64, commitment: FieldBytes, encrypted_note: Vec<u8>) -> Self {
        Self {
            position,
            commitment,
            encrypted_note,
        }
    }

    /// Fixed header for this event.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EncryptedNoteTooLong`] if the ciphertext length
    /// does not fit the header's u32 field.
    pub fn header(&self) -> Result<ShieldHeader, CodecError> {
        Ok(ShieldHeader {
            position: self.position,
            commitment: self.commitment,
            encrypted_note_len: encrypted_note_len(self.encrypted_note.len())?,
            _padding: [0u8; 4],
        })
    }

    /// Serialize the event to bytes with discriminator prepended.
    ///
    /// Returns: `[discriminator: 8 bytes][header: 48 bytes][encrypted_note: variable]`
    ///
    /// # Errors
    ///
    /// As for [`Self::header`].
    pub fn to_event_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let header = self.header()?;
        let total_size = 8 + SHIELD_HEADER_SIZE + self.encrypted_note.len();
        let mut bytes = Vec::with_capacity(total_size);

        bytes.extend_from_slice(&ShieldHeader::DISCRIMINATOR.to_le_bytes());
        bytes.extend_from_slice(bytemuck::bytes_of(&header));
        bytes.extend_from_slice(&self.encrypted_note);

        Ok(bytes)
    }
}

/// Parse a ShieldEvent from raw event bytes.
///
/// Returns `None` if the data is too short, the discriminator does not match,
/// or the declared ciphertext length runs past the end.
pub fn parse_shield_event(data: &[u8]) -> Option<ShieldEvent> {
    const MIN_SIZE: usize = 8 + SHIELD_HEADER_SIZE;

    if data.len() < MIN_SIZE {
        return None;
    }

    let (discriminator, rest) = data.split_first_chunk::<8>()?;
    if u64::from_le_bytes(*discriminator) != ShieldHeader::DISCRIMINATOR {
        return None;
    }

    // Event bytes are not guaranteed to be 8-byte aligned
    let header: ShieldHeader = bytemuck::pod_read_unaligned(&rest[..SHIELD_HEADER_SIZE]);

    let note_end = MIN_SIZE.checked_add(header.encrypted_note_len as usize)?;
    let encrypted_note = data.get(MIN_SIZE..note_end)?;

    Some(ShieldEvent {
        position: header.position,
        commitment: header.commitment,
        encrypted_note: encrypted_note.to_vec(),
    })
}
