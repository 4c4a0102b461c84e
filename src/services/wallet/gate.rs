//! Issuance gate
//!
//! An async counting gate in front of credential generation. With the
//! default capacity of 1 it admits exactly one holder at a time; callers
//! that find it full suspend until a holder releases.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};

use super::IssuanceError;
use crate::models::wallet::GateState;

/// Shared gate controlling entry into the generation critical section
///
/// Clones share the same underlying semaphore, so the gate is constructed
/// once and handed to every component that issues credentials.
#[derive(Debug, Clone)]
pub struct IssuanceGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl IssuanceGate {
    /// Create a gate admitting at most `capacity` concurrent holders
    pub fn new(capacity: usize) -> Result<Self, IssuanceError> {
        if capacity == 0 || capacity > Semaphore::MAX_PERMITS {
            return Err(IssuanceError::InvalidCapacity(capacity));
        }

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        })
    }

    /// Create a single-holder gate
    pub fn binary() -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
            capacity: 1,
        }
    }

    /// Acquire the gate, suspending until a slot is free
    pub async fn acquire(&self) -> Result<IssuanceGateGuard, IssuanceError> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| IssuanceError::GateClosed)?;

        Ok(self.guard(permit))
    }

    /// Acquire the gate, giving up after `timeout`
    ///
    /// A caller that times out never held the gate, so nothing is released.
    pub async fn acquire_timeout(
        &self,
        timeout: Duration,
    ) -> Result<IssuanceGateGuard, IssuanceError> {
        match tokio::time::timeout(timeout, self.acquire()).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    "Timed out after {:?} waiting for issuance gate ({} of {} held)",
                    timeout,
                    self.held_count(),
                    self.capacity
                );
                Err(IssuanceError::GateTimeout(timeout))
            }
        }
    }

    /// Try to acquire the gate once (non-blocking)
    pub fn try_acquire(&self) -> Result<IssuanceGateGuard, IssuanceError> {
        match self.semaphore.clone().try_acquire_owned() {
            Ok(permit) => Ok(self.guard(permit)),
            Err(TryAcquireError::NoPermits) => Err(IssuanceError::GateBusy),
            Err(TryAcquireError::Closed) => Err(IssuanceError::GateClosed),
        }
    }

    fn guard(&self, permit: OwnedSemaphorePermit) -> IssuanceGateGuard {
        tracing::debug!(
            "Acquired issuance gate ({} of {} held)",
            self.held_count(),
            self.capacity
        );
        IssuanceGateGuard {
            permit,
            acquired_at: Instant::now(),
        }
    }

    /// Number of holders currently inside the critical section
    pub fn held_count(&self) -> usize {
        self.capacity
            .saturating_sub(self.semaphore.available_permits())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn state(&self) -> GateState {
        if self.held_count() == 0 {
            GateState::Free
        } else {
            GateState::Held
        }
    }

    pub fn is_held(&self) -> bool {
        self.state() == GateState::Held
    }

    /// Stop admitting new holders. Current holders keep their slot until
    /// they release; waiters and later callers get `GateClosed`.
    pub fn close(&self) {
        tracing::info!("Closing issuance gate");
        self.semaphore.close();
    }

    pub fn is_closed(&self) -> bool {
        self.semaphore.is_closed()
    }
}

/// RAII guard that releases its gate slot when dropped
#[derive(Debug)]
pub struct IssuanceGateGuard {
    permit: OwnedSemaphorePermit,
    acquired_at: Instant,
}

impl IssuanceGateGuard {
    /// How long this guard has held the gate
    pub fn held_for(&self) -> Duration {
        self.acquired_at.elapsed()
    }

    /// Explicitly release the gate
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for IssuanceGateGuard {
    fn drop(&mut self) {
        // The permit field is dropped right after this body runs
        tracing::debug!(
            "Releasing issuance gate after {:?}",
            self.acquired_at.elapsed()
        );
    }
}
