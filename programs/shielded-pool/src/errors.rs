//! Error types for the privacy pool engine.
//!
//! # Error Code Ranges
//!
//! | Range | Category | Description |
//! |-------|----------|-------------|
//! | 0-9 | Core | Proof, root, nullifier and balance checks |
//! | 10-19 | Pool | Configuration, pause state, arithmetic, exchange leg |
//! | 100-110 | Codec | Wire-format decoding failures |
//!
//! # Error Code Reference
//!
//! ## Core Errors (0-9)
//! - 0: Unauthorized
//! - 1: TreeFull
//! - 2: DoubleSpend
//! - 3: InvalidProof
//! - 4: StaleRoot
//! - 5: InsufficientBalance
//! - 6: InvalidPublicInputLength
//! - 7: ZeroAmount
//! - 8: SlippageExceeded
//! - 9: InvalidEncoding
//!
//! ## Pool Errors (10-19)
//! - 10: TokenMismatch
//! - 11: SwapDataMismatch
//! - 12: PoolPaused
//! - 13: ArithmeticOverflow
//! - 14: ExchangeFailed
//! - 15: InvalidConfig
//! - 16: HashFailure
//!
//! ## Codec Errors (100-110)
//! - 100: InvalidG1Length
//! - 101: InvalidG2Length
//! - 102: InvalidFieldLength
//! - 103: NonCanonicalField
//! - 104: InvalidG1
//! - 105: InvalidG2
//! - 106: InvalidProofLength
//! - 107: InvalidVerifyingKeyLength
//! - 108: InvalidIcLength
//! - 109: AmountOutOfRange
//! - 110: EncryptedNoteTooLong

use privacy_pool_interface::ExchangeError;

/// Wire-format decoding errors raised by the proof codec.
///
/// Every variant maps onto [`PrivacyPoolError::InvalidEncoding`] at the engine
/// boundary; the finer split is kept for debugging provers.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum CodecError {
    /// Compressed G1 input is not 32 bytes
    #[error("compressed G1 point must be 32 bytes, got {0}")]
    InvalidG1Length(usize),
    /// Compressed G2 input is not 64 bytes
    #[error("compressed G2 point must be 64 bytes, got {0}")]
    InvalidG2Length(usize),
    /// Field element input is not 32 bytes (or not a multiple of 32)
    #[error("field element encoding must be 32 bytes per element, got {0}")]
    InvalidFieldLength(usize),
    /// Field element is not strictly below the modulus
    #[error("field element is not canonical (>= modulus)")]
    NonCanonicalField,
    /// G1 point is not on the curve or carries invalid flags
    #[error("invalid G1 point")]
    InvalidG1,
    /// G2 point is not on the curve, not in the subgroup, or carries invalid flags
    #[error("invalid G2 point")]
    InvalidG2,
    /// Proof is not exactly 128 bytes
    #[error("proof must be 128 bytes, got {0}")]
    InvalidProofLength(usize),
    /// Verifying key length does not match its declared IC count
    #[error("verifying key length {actual} does not match expected {expected}")]
    InvalidVerifyingKeyLength {
        /// Length implied by the header
        expected: usize,
        /// Length supplied
        actual: usize,
    },
    /// Verifying key carries the wrong number of IC points for its circuit
    #[error("verifying key has {actual} IC points, circuit requires {expected}")]
    InvalidIcLength {
        /// IC points required by the circuit
        expected: usize,
        /// IC points present in the key
        actual: usize,
    },
    /// Field element used as an amount does not fit in a u64
    #[error("amount field element does not fit in u64")]
    AmountOutOfRange,
    /// Encrypted note length does not fit the u32 length prefix
    #[error("encrypted note of {0} bytes exceeds the u32 length prefix")]
    EncryptedNoteTooLong(usize),
}

impl CodecError {
    /// Stable numeric code (100-110).
    pub const fn code(&self) -> u32 {
        match self {
            Self::InvalidG1Length(_) => 100,
            Self::InvalidG2Length(_) => 101,
            Self::InvalidFieldLength(_) => 102,
            Self::NonCanonicalField => 103,
            Self::InvalidG1 => 104,
            Self::InvalidG2 => 105,
            Self::InvalidProofLength(_) => 106,
            Self::InvalidVerifyingKeyLength { .. } => 107,
            Self::InvalidIcLength { .. } => 108,
            Self::AmountOutOfRange => 109,
            Self::EncryptedNoteTooLong(_) => 110,
        }
    }
}

/// Errors surfaced by pool operations.
///
/// All of these are detected before any state mutation: an operation that
/// returns one of them leaves the pool exactly as it found it.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum PrivacyPoolError {
    /// Admin capability does not belong to this pool
    #[error("admin capability does not match this pool")]
    Unauthorized,
    /// Commitment tree has no free leaf
    #[error("commitment tree is full")]
    TreeFull,
    /// Nullifier has already been spent
    #[error("nullifier already spent")]
    DoubleSpend,
    /// Verifier rejected the proof
    #[error("proof verification failed")]
    InvalidProof,
    /// Claimed Merkle root is neither current nor in the history window
    #[error("merkle root is not current or recent")]
    StaleRoot,
    /// Pool balance cannot cover the payout
    #[error("insufficient pool balance")]
    InsufficientBalance,
    /// Public input blob has the wrong byte length for the circuit
    #[error("public inputs must be {expected} bytes, got {actual}")]
    InvalidPublicInputLength {
        /// Length required by the circuit layout
        expected: usize,
        /// Length supplied
        actual: usize,
    },
    /// Shield amount is zero
    #[error("amount must be greater than zero")]
    ZeroAmount,
    /// Exchange leg returned less than the floor
    #[error("slippage exceeded: wanted at least {min}, got {actual}")]
    SlippageExceeded {
        /// Floor requested by the caller
        min: u64,
        /// Amount returned by the exchange leg
        actual: u64,
    },
    /// A proof, key, point or field element failed to decode
    #[error("invalid encoding: {0}")]
    InvalidEncoding(#[from] CodecError),
    /// Public-input token does not match the pool's token
    #[error("token does not match pool")]
    TokenMismatch,
    /// Swap data hash does not bind the submitted swap parameters
    #[error("swap data hash does not match amount_in / min_amount_out")]
    SwapDataMismatch,
    /// Pool is paused by its admin
    #[error("pool is paused")]
    PoolPaused,
    /// Balance arithmetic overflowed
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    /// Exchange leg failed
    #[error("exchange leg failed: {0}")]
    ExchangeFailed(#[from] ExchangeError),
    /// Pool configuration is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Poseidon parameters rejected the input arity
    #[error("poseidon hash failed")]
    HashFailure,
}

impl PrivacyPoolError {
    /// Stable numeric code, see the module-level table.
    pub const fn code(&self) -> u32 {
        match self {
            Self::Unauthorized => 0,
            Self::TreeFull => 1,
            Self::DoubleSpend => 2,
            Self::InvalidProof => 3,
            Self::StaleRoot => 4,
            Self::InsufficientBalance => 5,
            Self::InvalidPublicInputLength { .. } => 6,
            Self::ZeroAmount => 7,
            Self::SlippageExceeded { .. } => 8,
            Self::InvalidEncoding(_) => 9,
            Self::TokenMismatch => 10,
            Self::SwapDataMismatch => 11,
            Self::PoolPaused => 12,
            Self::ArithmeticOverflow => 13,
            Self::ExchangeFailed(_) => 14,
            Self::InvalidConfig(_) => 15,
            Self::HashFailure => 16,
        }
    }

    /// Whether the failure is structural (cheap, checked before any crypto).
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::InvalidPublicInputLength { .. } | Self::InvalidEncoding(_)
        )
    }
}

/// Result alias used throughout the engine.
pub type Result<T, E = PrivacyPoolError> = core::result::Result<T, E>;
