//! Gate-guarded wallet issuance
//!
//! `WalletIssuer` runs the credential generator inside the issuance gate.
//! The gate slot is released before the result (or the generator's error)
//! is handed back, and it is also released if the caller drops the future
//! mid-generation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::Instrument;

use super::{
    CredentialGenerator, IssuanceError, IssuanceGate, IssuanceGateGuard, LocalKeyGenerator,
};
use crate::models::wallet::{CredentialPair, IssuerConfig};

/// Counters of finished generations
#[derive(Debug, Default)]
struct IssuanceStats {
    issued: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time copy of the issuance counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IssuanceStatsSnapshot {
    pub issued: u64,
    pub failed: u64,
}

/// Issues fresh credential pairs one gate slot at a time
pub struct WalletIssuer {
    gate: IssuanceGate,
    generator: Arc<dyn CredentialGenerator>,
    stats: IssuanceStats,
}

impl WalletIssuer {
    /// Create an issuer from an existing gate and generator
    pub fn new(gate: IssuanceGate, generator: Arc<dyn CredentialGenerator>) -> Self {
        Self {
            gate,
            generator,
            stats: IssuanceStats::default(),
        }
    }

    /// Create an issuer with a local key generator and a new gate
    pub fn from_config(config: &IssuerConfig) -> Result<Self, IssuanceError> {
        let gate = IssuanceGate::new(config.gate_capacity)?;
        let generator = LocalKeyGenerator::with_chain_id(config.chain_id);

        tracing::info!(
            "Wallet issuer configured: gate capacity {}, acquire timeout {:?}, chain ID {:?}",
            config.gate_capacity,
            config.acquire_timeout,
            config.chain_id
        );

        Ok(Self::new(gate, Arc::new(generator)))
    }

    /// Issue a new credential pair, waiting as long as needed for the gate
    pub async fn issue_new_credential_pair(&self) -> Result<CredentialPair, IssuanceError> {
        let guard = self.gate.acquire().await?;
        self.generate_within(guard).await
    }

    /// Issue a new credential pair, giving up if the gate is not admitted
    /// within `timeout`
    pub async fn issue_with_timeout(
        &self,
        timeout: Duration,
    ) -> Result<CredentialPair, IssuanceError> {
        let guard = self.gate.acquire_timeout(timeout).await?;
        self.generate_within(guard).await
    }

    async fn generate_within(
        &self,
        guard: IssuanceGateGuard,
    ) -> Result<CredentialPair, IssuanceError> {
        let issuance_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("issuance", %issuance_id);

        let result = self.generator.generate().instrument(span).await;
        let held_for = guard.held_for();
        guard.release();

        match &result {
            Ok(pair) => {
                self.stats.issued.fetch_add(1, Ordering::Relaxed);
                tracing::info!(
                    "Issued wallet {} (issuance {}, gate held {:?})",
                    pair.address(),
                    issuance_id,
                    held_for
                );
            }
            Err(e) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                tracing::error!("Wallet generation failed (issuance {}): {}", issuance_id, e);
            }
        }

        result.map_err(IssuanceError::from)
    }

    pub fn gate(&self) -> &IssuanceGate {
        &self.gate
    }

    pub fn stats(&self) -> IssuanceStatsSnapshot {
        IssuanceStatsSnapshot {
            issued: self.stats.issued.load(Ordering::Relaxed),
            failed: self.stats.failed.load(Ordering::Relaxed),
        }
    }
}
