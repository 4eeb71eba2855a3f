//! # Fallback Pointer
//!
//! An `addr` record at a reserved coin type that steers resolution of a
//! node's unset fields elsewhere. The payload length selects the variant:
//!
//! | Length | Variant |
//! |---|---|
//! | 0 | `Unset` (implicit `_` child fallback applies) |
//! | 32 | `Node` alias (namehash of another node) |
//! | 20 | `Resolver` alias (another resolver instance, same node id) |
//! | other | `Disabled` (e.g. the single byte `0xFF`) |
//!
//! Malformed lengths never error; they disable the fallback.

use super::fields::FieldKey;
use shared_types::{Address, Hash, U256};

/// Reserved coin type holding the fallback pointer.
pub const FALLBACK_COIN_TYPE_HEX: &str =
    "0xb32cdf4d3c016cb0f079f205ad61c36b1a837fb3e95c70a94bdedfca0518a010";

/// Reserved coin type holding the fallback pointer, as an integer.
pub const FALLBACK_COIN_TYPE: U256 = U256([
    0x4bde_dfca_0518_a010,
    0x1a83_7fb3_e95c_70a9,
    0xf079_f205_ad61_c36b,
    0xb32c_df4d_3c01_6cb0,
]);

/// Field key of the fallback pointer record.
pub fn fallback_field() -> FieldKey {
    FieldKey::Addr(FALLBACK_COIN_TYPE)
}

/// Byte written to explicitly disable the fallback.
pub const DISABLED_SENTINEL: u8 = 0xFF;

/// Decoded fallback pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPointer {
    Unset,
    Disabled,
    Node(Hash),
    Resolver(Address),
}

impl FallbackPointer {
    pub fn decode(bytes: &[u8]) -> Self {
        match bytes.len() {
            0 => Self::Unset,
            32 => {
                let mut node = [0u8; 32];
                node.copy_from_slice(bytes);
                Self::Node(node)
            }
            20 => {
                let mut resolver = [0u8; 20];
                resolver.copy_from_slice(bytes);
                Self::Resolver(resolver)
            }
            _ => Self::Disabled,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Unset => Vec::new(),
            Self::Disabled => vec![DISABLED_SENTINEL],
            Self::Node(node) => node.to_vec(),
            Self::Resolver(resolver) => resolver.to_vec(),
        }
    }

    /// Stored bytes had a length no variant claims.
    pub fn is_malformed(bytes: &[u8]) -> bool {
        !matches!(bytes.len(), 0 | 20 | 32) && bytes != [DISABLED_SENTINEL]
    }
}
