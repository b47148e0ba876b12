//! Circuit kinds and wire sizes.
//!
//! These constants are the byte-level contract between off-chain provers,
//! the engine, and the external verifier. Any change here breaks proof
//! compatibility.

/// Size of one encoded field element (little-endian).
pub const FIELD_ELEMENT_SIZE: usize = 32;

/// Size of a compressed G1 point.
pub const G1_COMPRESSED_SIZE: usize = 32;

/// Size of a compressed G2 point.
pub const G2_COMPRESSED_SIZE: usize = 64;

/// Size of an encoded proof: `A(32) || B(64) || C(32)`.
pub const PROOF_SIZE: usize = G1_COMPRESSED_SIZE + G2_COMPRESSED_SIZE + G1_COMPRESSED_SIZE;

/// Fixed prefix of an encoded verifying key before the IC points:
/// `alpha(32) || beta(64) || gamma(64) || delta(64) || ic_len(8)`.
pub const VERIFYING_KEY_HEADER_SIZE: usize =
    G1_COMPRESSED_SIZE + 3 * G2_COMPRESSED_SIZE + core::mem::size_of::<u64>();

/// Circuits whose proofs the engine accepts.
///
/// Each kind has its own verifying key and a fixed public-input layout.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CircuitKind {
    /// `nullifier | merkle_root | change_commitment | unshield_amount`
    Unshield = 0,
    /// `token | merkle_root | nullifier_1 | nullifier_2 | output_commitment | change_commitment`
    Transfer = 1,
    /// `token_in | token_out | merkle_root | nullifier_1 | nullifier_2 | swap_data_hash |
    /// output_commitment | change_commitment`
    Swap = 2,
}

impl CircuitKind {
    /// All circuit kinds, in discriminant order.
    pub const ALL: [CircuitKind; 3] = [Self::Unshield, Self::Transfer, Self::Swap];

    /// Number of public field elements the circuit exposes.
    pub const fn public_input_count(self) -> usize {
        match self {
            Self::Unshield => 4,
            Self::Transfer => 6,
            Self::Swap => 8,
        }
    }

    /// Encoded length of the public inputs in bytes.
    pub const fn public_input_len(self) -> usize {
        self.public_input_count() * FIELD_ELEMENT_SIZE
    }

    /// Number of IC points a matching verifying key must carry.
    pub const fn ic_len(self) -> usize {
        self.public_input_count() + 1
    }

    /// Expected encoded verifying key length in bytes.
    pub const fn verifying_key_len(self) -> usize {
        VERIFYING_KEY_HEADER_SIZE + self.ic_len() * G1_COMPRESSED_SIZE
    }
}
