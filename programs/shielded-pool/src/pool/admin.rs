//! Admin surface: verifying key rotation and the pause switch.
//!
//! Both operations take an [`AdminCap`] minted alongside the pool. The
//! capability is bound to one pool id and cannot be cloned, so holding it is
//! the only way to administer that pool.

use log::{info, warn};
use privacy_pool_interface::CircuitKind;
use sha2::{Digest, Sha256};

use super::{PoolId, PrivacyPool};
use crate::{
    errors::{PrivacyPoolError, Result},
    events::{PoolEvent, PoolPauseChangedEvent, VerifyingKeyRotatedEvent},
};

/// Authorization token for one pool's admin operations.
#[derive(Debug, PartialEq, Eq)]
pub struct AdminCap {
    pool_id: PoolId,
}

impl AdminCap {
    pub(crate) const fn new(pool_id: PoolId) -> Self {
        Self { pool_id }
    }

    /// Pool this capability administers.
    pub const fn pool_id(&self) -> PoolId {
        self.pool_id
    }
}

impl PrivacyPool {
    fn ensure_admin(&self, cap: &AdminCap) -> Result<()> {
        if cap.pool_id != self.id {
            warn!("{}: unauthorized admin call from {}", self.id, cap.pool_id);
            return Err(PrivacyPoolError::Unauthorized);
        }
        Ok(())
    }

    /// Replace the verifying key for `kind`.
    ///
    /// Tree, registry and balance are untouched. Allowed while paused.
    ///
    /// # Errors
    ///
    /// - [`PrivacyPoolError::Unauthorized`] if `cap` belongs to another pool
    /// - [`PrivacyPoolError::InvalidEncoding`] if `vk` is malformed or has the
    ///   wrong IC count for `kind`
    pub fn rotate_verifying_key(
        &mut self,
        cap: &AdminCap,
        kind: CircuitKind,
        vk: Vec<u8>,
    ) -> Result<VerifyingKeyRotatedEvent> {
        self.ensure_admin(cap)?;

        let vk_hash: [u8; 32] = Sha256::digest(&vk).into();
        self.verifying_keys.replace(kind, vk)?;

        info!(
            "{}: rotated {kind} verifying key ({})",
            self.id,
            hex::encode(&vk_hash[..8])
        );

        let event = VerifyingKeyRotatedEvent {
            circuit: kind as u8,
            vk_hash,
        };
        self.emit(PoolEvent::VerifyingKeyRotated(event.clone()));
        Ok(event)
    }

    /// Suspend or resume shield, unshield, transfer and swap.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::Unauthorized`] if `cap` belongs to another pool.
    pub fn set_paused(&mut self, cap: &AdminCap, paused: bool) -> Result<PoolPauseChangedEvent> {
        self.ensure_admin(cap)?;

        self.paused = paused;
        info!("{}: paused = {paused}", self.id);

        let event = PoolPauseChangedEvent { is_paused: paused };
        self.emit(PoolEvent::PoolPauseChanged(event.clone()));
        Ok(event)
    }
}
