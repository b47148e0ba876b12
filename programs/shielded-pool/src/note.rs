//! Note cryptography.
//!
//! Key and note derivations, all Poseidon over BN254:
//!
//! ```text
//! mpk        = H(spending_key, nullifying_key)
//! npk        = H(mpk, random)
//! commitment = H(npk, token, value)
//! nullifier  = H(nullifying_key, leaf_index)
//! ```
//!
//! Inputs supplied as raw bytes are reduced into the field; callers never see
//! an error for a secret that happens to exceed the modulus.

use core::fmt;

use ark_bn254::Fr;
use ark_ff::Zero;
use rand::{RngCore, rngs::OsRng};

use crate::{
    errors::Result,
    poseidon,
    token::TokenId,
    types::{FieldBytes, field_from_bytes_reduced, field_to_bytes},
};

/// Master public key: `H(spending_key, nullifying_key)`.
///
/// # Errors
///
/// Returns [`crate::errors::PrivacyPoolError::HashFailure`] if Poseidon fails.
pub fn master_public_key(spending_key: &Fr, nullifying_key: &Fr) -> Result<Fr> {
    poseidon::hash(&[*spending_key, *nullifying_key])
}

/// Note public key: `H(mpk, random)`.
///
/// # Errors
///
/// Returns [`crate::errors::PrivacyPoolError::HashFailure`] if Poseidon fails.
pub fn note_public_key(master_public_key: &Fr, random: &Fr) -> Result<Fr> {
    poseidon::hash(&[*master_public_key, *random])
}

/// Note commitment: `H(npk, token, value)`.
///
/// # Errors
///
/// Returns [`crate::errors::PrivacyPoolError::HashFailure`] if Poseidon fails.
pub fn note_commitment(note_public_key: &Fr, token: &TokenId, value: u64) -> Result<Fr> {
    poseidon::hash(&[*note_public_key, token.to_field(), Fr::from(value)])
}

/// Nullifier: `H(nullifying_key, leaf_index)`.
///
/// # Errors
///
/// Returns [`crate::errors::PrivacyPoolError::HashFailure`] if Poseidon fails.
pub fn nullifier(nullifying_key: &Fr, leaf_index: u64) -> Result<Fr> {
    poseidon::hash(&[*nullifying_key, Fr::from(leaf_index)])
}

/// Binds the public swap parameters into the swap proof: `H(amount_in, min_amount_out)`.
///
/// # Errors
///
/// Returns [`crate::errors::PrivacyPoolError::HashFailure`] if Poseidon fails.
pub fn swap_data_hash(amount_in: u64, min_amount_out: u64) -> Result<Fr> {
    poseidon::hash(&[Fr::from(amount_in), Fr::from(min_amount_out)])
}

/// A user's secret key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct ShieldedKeys {
    spending_key: Fr,
    nullifying_key: Fr,
}

impl ShieldedKeys {
    /// Build from field elements.
    pub const fn new(spending_key: Fr, nullifying_key: Fr) -> Self {
        Self {
            spending_key,
            nullifying_key,
        }
    }

    /// Build from raw bytes; values >= the modulus are reduced.
    pub fn from_bytes(spending_key: &FieldBytes, nullifying_key: &FieldBytes) -> Self {
        Self::new(
            field_from_bytes_reduced(spending_key),
            field_from_bytes_reduced(nullifying_key),
        )
    }

    /// Sample fresh keys from `rng`.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::new(random_field(rng), random_field(rng))
    }

    /// Sample fresh keys from the OS RNG.
    pub fn generate() -> Self {
        Self::random(&mut OsRng)
    }

    /// Spending key.
    pub const fn spending_key(&self) -> &Fr {
        &self.spending_key
    }

    /// Nullifying key.
    pub const fn nullifying_key(&self) -> &Fr {
        &self.nullifying_key
    }

    /// Master public key for these keys.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::PrivacyPoolError::HashFailure`] if Poseidon fails.
    pub fn master_public_key(&self) -> Result<Fr> {
        master_public_key(&self.spending_key, &self.nullifying_key)
    }

    /// Nullifier for the note stored at `leaf_index`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::PrivacyPoolError::HashFailure`] if Poseidon fails.
    pub fn nullifier(&self, leaf_index: u64) -> Result<Fr> {
        nullifier(&self.nullifying_key, leaf_index)
    }
}

impl fmt::Debug for ShieldedKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShieldedKeys").finish_non_exhaustive()
    }
}

/// A shielded note and its commitment.
#[derive(Clone, PartialEq, Eq)]
pub struct Note {
    note_public_key: Fr,
    token: TokenId,
    value: u64,
    random: Fr,
    commitment: Fr,
}

impl Note {
    /// Create a note owned by `master_public_key`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::PrivacyPoolError::HashFailure`] if Poseidon fails.
    pub fn new(master_public_key: &Fr, token: TokenId, value: u64, random: Fr) -> Result<Self> {
        let note_public_key = note_public_key(master_public_key, &random)?;
        let commitment = note_commitment(&note_public_key, &token, value)?;
        Ok(Self {
            note_public_key,
            token,
            value,
            random,
            commitment,
        })
    }

    /// Create a note with fresh randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::PrivacyPoolError::HashFailure`] if Poseidon fails.
    pub fn random<R: RngCore + ?Sized>(
        rng: &mut R,
        master_public_key: &Fr,
        token: TokenId,
        value: u64,
    ) -> Result<Self> {
        Self::new(master_public_key, token, value, random_field(rng))
    }

    /// Zero-value note with zero randomness, used to pad the second input of
    /// a two-input circuit.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::PrivacyPoolError::HashFailure`] if Poseidon fails.
    pub fn dummy(master_public_key: &Fr, token: TokenId) -> Result<Self> {
        Self::new(master_public_key, token, 0, Fr::zero())
    }

    /// Whether this is a zero-value padding note.
    pub fn is_dummy(&self) -> bool {
        self.value == 0
    }

    /// Note public key.
    pub const fn note_public_key(&self) -> &Fr {
        &self.note_public_key
    }

    /// Token.
    pub const fn token(&self) -> TokenId {
        self.token
    }

    /// Value.
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Randomness.
    pub const fn randomness(&self) -> &Fr {
        &self.random
    }

    /// Commitment as a field element.
    pub const fn commitment(&self) -> &Fr {
        &self.commitment
    }

    /// Commitment in wire form.
    pub fn commitment_bytes(&self) -> FieldBytes {
        field_to_bytes(&self.commitment)
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("token", &self.token)
            .field("value", &self.value)
            .field("commitment", &self.commitment)
            .finish_non_exhaustive()
    }
}

fn random_field<R: RngCore + ?Sized>(rng: &mut R) -> Fr {
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes);
    field_from_bytes_reduced(&bytes)
}
