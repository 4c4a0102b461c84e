use alloy::primitives::{Address, B256};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::services::wallet::GenerationError;

/// A freshly generated wallet: address and private key, always together.
///
/// The pair is handed to the caller by value and nothing else keeps a copy.
/// `Debug` output omits the private key.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialPair {
    address: Address,
    private_key: B256,
    issued_at: u64,
}

impl CredentialPair {
    /// Build a pair, rejecting a zero address or an all-zero key
    pub fn new(address: Address, private_key: B256) -> Result<Self, GenerationError> {
        if address == Address::ZERO {
            return Err(GenerationError::Unpopulated("address"));
        }
        if private_key == B256::ZERO {
            return Err(GenerationError::Unpopulated("private key"));
        }

        let issued_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        Ok(Self {
            address,
            private_key,
            issued_at,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn private_key(&self) -> &B256 {
        &self.private_key
    }

    /// Unix timestamp (seconds) of generation
    pub fn issued_at(&self) -> u64 {
        self.issued_at
    }

    /// EIP-55 checksummed address
    pub fn address_string(&self) -> String {
        self.address.to_checksum(None)
    }

    /// `0x`-prefixed lowercase hex of the private key
    pub fn private_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.private_key))
    }

    pub fn into_parts(self) -> (Address, B256) {
        (self.address, self.private_key)
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Observable state of the issuance gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum GateState {
    /// No holder inside the critical section
    Free,
    /// At least one holder inside the critical section
    Held,
}

/// Configuration for the wallet issuer service
#[derive(Debug, Clone)]
pub struct IssuerConfig {
    /// Bearer token required on authenticated routes
    pub access_token: String,
    /// Maximum number of concurrent generations (1 = strict mutual exclusion)
    pub gate_capacity: usize,
    /// How long a caller may wait for the gate; `None` waits indefinitely
    pub acquire_timeout: Option<Duration>,
    /// Chain ID recorded alongside issued wallets in logs
    pub chain_id: Option<u64>,
}

impl IssuerConfig {
    pub const DEFAULT_GATE_CAPACITY: usize = 1;

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let access_token = std::env::var("WALLET_ISSUER_ACCESS_TOKEN")
            .map_err(|_| "WALLET_ISSUER_ACCESS_TOKEN environment variable not set")?;

        let gate_capacity = match std::env::var("ISSUANCE_GATE_CAPACITY") {
            Ok(s) => s
                .trim()
                .parse::<usize>()
                .map_err(|e| format!("Invalid ISSUANCE_GATE_CAPACITY '{s}': {e}"))?,
            Err(_) => Self::DEFAULT_GATE_CAPACITY,
        };
        if gate_capacity == 0 {
            return Err("ISSUANCE_GATE_CAPACITY must be at least 1".to_string());
        }

        let acquire_timeout = match std::env::var("ISSUANCE_ACQUIRE_TIMEOUT_MS") {
            Ok(s) => Some(Duration::from_millis(s.trim().parse::<u64>().map_err(
                |e| format!("Invalid ISSUANCE_ACQUIRE_TIMEOUT_MS '{s}': {e}"),
            )?)),
            Err(_) => None,
        };

        let chain_id = std::env::var("CHAIN_ID")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        Ok(Self {
            access_token,
            gate_capacity,
            acquire_timeout,
            chain_id,
        })
    }
}
