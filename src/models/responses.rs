use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::wallet::{CredentialPair, GateState};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IssueWalletResponse {
    pub address: String,     // EIP-55 checksummed address
    pub private_key: String, // 0x-prefixed hex, returned once and never stored
    pub issued_at: u64,      // Unix seconds
}

impl From<CredentialPair> for IssueWalletResponse {
    fn from(pair: CredentialPair) -> Self {
        Self {
            address: pair.address_string(),
            private_key: pair.private_key_hex(),
            issued_at: pair.issued_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GateStatusResponse {
    pub state: GateState,
    pub held: usize,
    pub capacity: usize,
    pub closed: bool,
    pub issued: u64,
    pub failed: u64,
}
