//! # Gateway Context
//!
//! The `ccip.context` text record: `"<signerAddress> <endpointURL>"`.
//! An owner publishes it to authorize `signer` to answer off-chain lookups
//! for the subtree below the node; an empty record disables off-chain.

use super::errors::RecordStoreError;
use shared_types::{checksum_address, parse_address, Address};
use std::fmt;
use std::str::FromStr;

/// Text key the context is stored under.
pub const CONTEXT_KEY: &str = "ccip.context";

/// Committed signer/endpoint binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayContext {
    pub signer: Address,
    pub endpoint: String,
}

impl GatewayContext {
    pub fn new(signer: Address, endpoint: impl Into<String>) -> Self {
        Self {
            signer,
            endpoint: endpoint.into(),
        }
    }

    /// Parse a stored text value. Empty text means "no context".
    pub fn from_record(text: &str) -> Result<Option<Self>, RecordStoreError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        text.parse().map(Some)
    }
}

impl FromStr for GatewayContext {
    type Err = RecordStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(signer), Some(endpoint), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(RecordStoreError::MalformedContext(s.to_string()));
        };
        let signer = parse_address(signer)
            .map_err(|e| RecordStoreError::MalformedContext(e.to_string()))?;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(RecordStoreError::MalformedContext(format!(
                "endpoint must be http(s): {endpoint}"
            )));
        }
        Ok(Self::new(signer, endpoint))
    }
}

impl fmt::Display for GatewayContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", checksum_address(&self.signer), self.endpoint)
    }
}
