//! Wallet issuance service
//!
//! This module provides serialized generation of new wallet credentials:
//! - IssuanceGate: async gate admitting a bounded number of holders
//! - CredentialGenerator: source of fresh (address, private key) pairs
//! - WalletIssuer: runs the generator inside the gate
//! - MockCredentialGenerator: deterministic, instrumented generator for tests

pub mod error;
pub mod gate;
pub mod generator;
pub mod issuer;
pub mod mock;

pub use error::{GenerationError, IssuanceError};
pub use gate::{IssuanceGate, IssuanceGateGuard};
pub use generator::{CredentialGenerator, LocalKeyGenerator};
pub use issuer::{IssuanceStatsSnapshot, WalletIssuer};
pub use mock::{GenerationWindow, MockCredentialGenerator};

// Re-export model types for convenience
pub use crate::models::wallet::{CredentialPair, GateState, IssuerConfig};
