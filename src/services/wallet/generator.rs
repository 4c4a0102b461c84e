//! Credential generation
//!
//! The issuer only needs "something that returns a fresh (address, private
//! key) pair". `LocalKeyGenerator` produces a random secp256k1 key and its
//! Ethereum address.

use alloy::signers::Signer;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;

use super::GenerationError;
use crate::models::wallet::CredentialPair;

/// Source of fresh wallet credentials
#[async_trait]
pub trait CredentialGenerator: Send + Sync {
    /// Generate a new address and its private key
    async fn generate(&self) -> Result<CredentialPair, GenerationError>;
}

/// Generates random local Ethereum keys
#[derive(Debug, Clone, Default)]
pub struct LocalKeyGenerator {
    chain_id: Option<u64>,
}

impl LocalKeyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag generated keys with a chain ID (EIP-155)
    pub fn with_chain_id(chain_id: Option<u64>) -> Self {
        Self { chain_id }
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }
}

#[async_trait]
impl CredentialGenerator for LocalKeyGenerator {
    async fn generate(&self) -> Result<CredentialPair, GenerationError> {
        let signer = PrivateKeySigner::random().with_chain_id(self.chain_id);
        let pair = CredentialPair::new(signer.address(), signer.to_bytes())?;

        tracing::debug!(
            "Generated local key for {} (chain ID: {:?})",
            pair.address(),
            signer.chain_id()
        );

        Ok(pair)
    }
}
