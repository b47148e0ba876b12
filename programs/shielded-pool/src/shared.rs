//! Thread-safe pool handle.
//!
//! [`PrivacyPool`] is a single-writer state machine. Hosts that serve it from
//! several threads wrap it in a [`SharedPool`], which runs every operation
//! inside one critical section. Swaps touch two pools and take both locks in
//! pool id order, so two swaps running in opposite directions cannot
//! deadlock.

use std::sync::Arc;

use log::warn;
use parking_lot::{Mutex, MutexGuard};
use privacy_pool_interface::{CircuitKind, ExchangeLeg};

use crate::{
    errors::{PrivacyPoolError, Result},
    events::{
        PoolEvent, PoolPauseChangedEvent, ShieldEvent, SwapEvent, TransferEvent, UnshieldEvent,
        VerifyingKeyRotatedEvent,
    },
    pool::{AdminCap, PoolId, PrivacyPool, SwapRequest},
    types::{Address, FieldBytes},
};

/// Cloneable handle to a pool behind a mutex.
#[derive(Clone, Debug)]
pub struct SharedPool {
    id: PoolId,
    inner: Arc<Mutex<PrivacyPool>>,
}

impl SharedPool {
    /// Wrap a pool.
    pub fn new(pool: PrivacyPool) -> Self {
        Self {
            id: pool.id(),
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// Id of the wrapped pool, readable without locking.
    pub const fn id(&self) -> PoolId {
        self.id
    }

    /// Lock the pool for reads or a sequence of operations.
    pub fn lock(&self) -> MutexGuard<'_, PrivacyPool> {
        self.inner.lock()
    }

    /// See [`PrivacyPool::shield`].
    ///
    /// # Errors
    ///
    /// As for [`PrivacyPool::shield`].
    pub fn shield(
        &self,
        amount: u64,
        commitment: &FieldBytes,
        encrypted_note: Vec<u8>,
    ) -> Result<ShieldEvent> {
        self.lock().shield(amount, commitment, encrypted_note)
    }

    /// See [`PrivacyPool::unshield`].
    ///
    /// # Errors
    ///
    /// As for [`PrivacyPool::unshield`].
    pub fn unshield(
        &self,
        proof: &[u8],
        public_inputs: &[u8],
        recipient: Address,
        encrypted_change_note: Vec<u8>,
    ) -> Result<UnshieldEvent> {
        self.lock()
            .unshield(proof, public_inputs, recipient, encrypted_change_note)
    }

    /// See [`PrivacyPool::transfer`].
    ///
    /// # Errors
    ///
    /// As for [`PrivacyPool::transfer`].
    pub fn transfer(
        &self,
        proof: &[u8],
        public_inputs: &[u8],
        encrypted_notes: [Vec<u8>; 2],
    ) -> Result<TransferEvent> {
        self.lock().transfer(proof, public_inputs, encrypted_notes)
    }

    /// Swap out of `self` into `output`, holding both locks for the whole
    /// operation.
    ///
    /// # Errors
    ///
    /// As for [`PrivacyPool::swap`]. Swapping a pool into itself fails with
    /// [`PrivacyPoolError::TokenMismatch`].
    pub fn swap(
        &self,
        output: &SharedPool,
        exchange: &mut dyn ExchangeLeg,
        request: SwapRequest<'_>,
    ) -> Result<SwapEvent> {
        if self.id == output.id {
            warn!("{}: rejected swap into the same pool", self.id);
            return Err(PrivacyPoolError::TokenMismatch);
        }

        let (mut input_guard, mut output_guard) = if self.id < output.id {
            let input_guard = self.lock();
            (input_guard, output.lock())
        } else {
            let output_guard = output.lock();
            (self.lock(), output_guard)
        };
        input_guard.swap(&mut output_guard, exchange, request)
    }

    /// See [`PrivacyPool::rotate_verifying_key`].
    ///
    /// # Errors
    ///
    /// As for [`PrivacyPool::rotate_verifying_key`].
    pub fn rotate_verifying_key(
        &self,
        cap: &AdminCap,
        kind: CircuitKind,
        vk: Vec<u8>,
    ) -> Result<VerifyingKeyRotatedEvent> {
        self.lock().rotate_verifying_key(cap, kind, vk)
    }

    /// See [`PrivacyPool::set_paused`].
    ///
    /// # Errors
    ///
    /// As for [`PrivacyPool::set_paused`].
    pub fn set_paused(&self, cap: &AdminCap, paused: bool) -> Result<PoolPauseChangedEvent> {
        self.lock().set_paused(cap, paused)
    }

    /// Drain emitted events.
    pub fn take_events(&self) -> Vec<PoolEvent> {
        self.lock().take_events()
    }

    /// Current root in wire form.
    pub fn root(&self) -> FieldBytes {
        self.lock().root()
    }

    /// Current balance.
    pub fn balance(&self) -> u64 {
        self.lock().balance()
    }
}
