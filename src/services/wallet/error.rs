//! Error types for wallet issuance

use std::time::Duration;
use thiserror::Error;

/// Failure of the underlying credential generation step
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Generated credential pair is missing its {0}")]
    Unpopulated(&'static str),
}

/// Errors surfaced by the issuance gate and the wallet issuer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssuanceError {
    #[error("Issuance gate capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    #[error("Issuance gate is fully held")]
    GateBusy,

    #[error("Issuance gate is closed")]
    GateClosed,

    #[error("Timed out after {0:?} waiting for the issuance gate")]
    GateTimeout(Duration),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl IssuanceError {
    /// Whether the failure happened before generation ran, i.e. the caller
    /// never entered the critical section.
    pub fn is_gate_error(&self) -> bool {
        !matches!(self, Self::Generation(_))
    }
}
