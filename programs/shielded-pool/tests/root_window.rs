//! Root-freshness window tests.
//!
//! A proof may reference the current root or any of the last R superseded
//! roots. Roots are superseded one per inserted leaf.

mod common;

use ark_bn254::Fr;
use common::*;
use shielded_pool::{
    CircuitKind, PoolConfig, PrivacyPool, PrivacyPoolError, public_inputs::UnshieldPublicInputs,
    types::field_to_bytes,
};
use test_case::test_case;

const R: usize = 4;

fn windowed_pool() -> PrivacyPool {
    let config = PoolConfig::for_symbol("USDC").with_root_history_size(R);
    let (mut pool, _) = new_pool_with(config, MockVerifier::accept());
    pool.shield(ONE, &field_to_bytes(&Fr::from(1u64)), vec![])
        .unwrap();
    pool
}

fn unshield_against(
    pool: &mut PrivacyPool,
    root: Fr,
    nullifier: u64,
) -> Result<(), PrivacyPoolError> {
    let inputs = UnshieldPublicInputs {
        nullifier: Fr::from(nullifier),
        merkle_root: root,
        change_commitment: Fr::from(0u64),
        unshield_amount: 1,
    };
    let proof = Trapdoor::new(0).prove(CircuitKind::Unshield, &inputs.to_fields());
    pool.unshield(&proof, &inputs.encode(), RECIPIENT, vec![])
        .map(|_| ())
}

#[test_case(0 ; "current root")]
#[test_case(1 ; "one insert ago")]
#[test_case(R as u64 ; "exactly R inserts ago")]
fn test_root_inside_window_is_accepted(inserts_since: u64) {
    let mut pool = windowed_pool();
    let root = pool.tree().root();
    for i in 0..inserts_since {
        pool.shield(1, &field_to_bytes(&Fr::from(100 + i)), vec![])
            .unwrap();
    }
    assert_eq!(unshield_against(&mut pool, root, 7), Ok(()));
}

#[test_case(R as u64 + 1 ; "R plus one inserts ago")]
#[test_case(3 * R as u64 ; "long evicted")]
fn test_root_outside_window_is_stale(inserts_since: u64) {
    let mut pool = windowed_pool();
    let root = pool.tree().root();
    for i in 0..inserts_since {
        pool.shield(1, &field_to_bytes(&Fr::from(100 + i)), vec![])
            .unwrap();
    }
    assert_eq!(
        unshield_against(&mut pool, root, 7),
        Err(PrivacyPoolError::StaleRoot)
    );
}

/// Change leaves supersede roots exactly like shields do.
#[test]
fn test_change_insert_advances_window() {
    let mut pool = windowed_pool();
    let root = pool.tree().root();

    for n in 0..=R as u64 {
        let inputs = UnshieldPublicInputs {
            nullifier: Fr::from(1_000 + n),
            merkle_root: pool.tree().root(),
            change_commitment: Fr::from(2_000 + n),
            unshield_amount: 1,
        };
        let proof = Trapdoor::new(0).prove(CircuitKind::Unshield, &inputs.to_fields());
        pool.unshield(&proof, &inputs.encode(), RECIPIENT, vec![])
            .unwrap();
    }

    assert_eq!(
        unshield_against(&mut pool, root, 7),
        Err(PrivacyPoolError::StaleRoot)
    );
}

#[test]
fn test_zero_root_is_never_known() {
    let mut pool = windowed_pool();
    assert_eq!(
        unshield_against(&mut pool, Fr::from(0u64), 7),
        Err(PrivacyPoolError::StaleRoot)
    );
}
