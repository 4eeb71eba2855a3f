//! # Core Entities
//!
//! Fixed-width identifiers and their textual forms.
//!
//! Addresses are rendered with the EIP-55 mixed-case checksum so that the
//! strings published in `ccip.context` records compare byte-for-byte with
//! what wallets produce; parsing accepts any case.

use crate::errors::ParseError;
use crate::naming::keccak256;

// Re-export U256 from primitive-types (coin types are 256-bit integers)
pub use primitive_types::U256;

/// A 32-byte keccak hash (node ids, label hashes, request digests).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// The all-zero hash; doubles as the id of the root node.
pub const ZERO_HASH: Hash = [0u8; 32];

/// The all-zero address ("no resolver").
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Encode bytes as a `0x`-prefixed lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode a hex string, with or without a `0x` prefix.
pub fn from_hex(s: &str) -> Result<Vec<u8>, ParseError> {
    let trimmed = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(trimmed).map_err(|e| ParseError::InvalidHex(e.to_string()))
}

/// Parse a hex address (checksum is not enforced).
pub fn parse_address(s: &str) -> Result<Address, ParseError> {
    let bytes = from_hex(s)?;
    if bytes.len() != 20 {
        return Err(ParseError::InvalidLength {
            expected: 20,
            actual: bytes.len(),
        });
    }
    let mut address = [0u8; 20];
    address.copy_from_slice(&bytes);
    Ok(address)
}

/// Parse a 32-byte hex word.
pub fn parse_hash(s: &str) -> Result<Hash, ParseError> {
    let bytes = from_hex(s)?;
    if bytes.len() != 32 {
        return Err(ParseError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        });
    }
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&bytes);
    Ok(hash)
}

/// Render an address with the EIP-55 checksum.
pub fn checksum_address(address: &Address) -> String {
    let lower = hex::encode(address);
    let digest = keccak256(lower.as_bytes());
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (digest[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Current unix time in seconds.
pub fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        // Clock before Unix epoch - return 0 rather than panic
        .unwrap_or(0)
}
