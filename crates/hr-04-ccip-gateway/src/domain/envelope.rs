//! JSON request/response bodies and the signed response payload.

use super::abi::{self, Decoder, Token};
use super::errors::GatewayError;
use serde::{Deserialize, Serialize};
use shared_types::U256;

/// `POST /` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CcipRequest {
    /// Resolver that raised the lookup (hex address).
    pub sender: String,
    /// Request calldata (hex).
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CcipResponse {
    /// ABI-encoded [`SignedResponse`] (hex).
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CcipErrorBody {
    pub message: String,
}

/// `abi.encode(bytes result, uint64 expires, bytes signature)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedResponse {
    pub result: Vec<u8>,
    pub expires: u64,
    pub signature: Vec<u8>,
}

impl SignedResponse {
    pub fn encode(&self) -> Vec<u8> {
        abi::encode(&[
            Token::Bytes(self.result.clone()),
            Token::Uint(U256::from(self.expires)),
            Token::Bytes(self.signature.clone()),
        ])
    }

    pub fn decode(data: &[u8]) -> Result<Self, GatewayError> {
        let decoder = Decoder::new(data);
        Ok(Self {
            result: decoder.bytes(0)?,
            expires: decoder.uint64(1)?,
            signature: decoder.bytes(2)?,
        })
    }
}
