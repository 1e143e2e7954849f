//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Request for POST /api/siwe/message
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    pub eth_account: String,
    pub chain_id: u64,
}

/// Response for POST /api/siwe/message
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    /// The exact text the wallet must sign
    pub message: String,
    pub nonce: String,
}

/// Request for POST /api/siwe/signature
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRequest {
    /// The exact text that was signed
    pub message: String,
    /// Hex-encoded 65-byte signature
    pub signature: String,
    /// Optional ENS-style display name, echoed back unverified
    #[serde(default)]
    pub ens: Option<String>,
}

/// Response for POST /api/siwe/signature
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedResponse {
    /// Checksum-form address of the verified signer
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ens: Option<String>,
}
