//! Poseidon over BN254 with circom-compatible parameters.

use ark_bn254::Fr;
use light_poseidon::{Poseidon, PoseidonHasher};
use log::error;

use crate::errors::{PrivacyPoolError, Result};

/// Hash `inputs` with the circom parameter set for `inputs.len()`.
///
/// # Errors
///
/// Returns [`PrivacyPoolError::HashFailure`] if no parameter set exists for
/// the arity (zero inputs or more than 12).
pub fn hash(inputs: &[Fr]) -> Result<Fr> {
    let mut hasher = Poseidon::<Fr>::new_circom(inputs.len()).map_err(|e| {
        error!("poseidon init failed for arity {}: {}", inputs.len(), e);
        PrivacyPoolError::HashFailure
    })?;
    hasher.hash(inputs).map_err(|e| {
        error!("poseidon hash failed: {}", e);
        PrivacyPoolError::HashFailure
    })
}

/// Two-to-one compression used by the commitment tree.
///
/// # Errors
///
/// See [`hash`].
#[inline]
pub fn hash_pair(left: &Fr, right: &Fr) -> Result<Fr> {
    hash(&[*left, *right])
}
