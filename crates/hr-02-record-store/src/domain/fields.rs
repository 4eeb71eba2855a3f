//! # Field Keys and Values
//!
//! A field key names one record slot of a node; the value kind is fixed by
//! the key:
//!
//! | Key | Value |
//! |---|---|
//! | `text:<key>` | UTF-8 text |
//! | `addr:<coinType>` | opaque bytes |
//! | `contenthash` | opaque bytes |
//! | `pubkey` | two 32-byte words |
//! | `name` | UTF-8 text |

use super::errors::RecordStoreError;
use shared_types::{to_hex, Hash, U256, ZERO_HASH};
use std::fmt;
use std::str::FromStr;

/// SLIP-44 coin type of Ether; `addr(bytes32)` reads this slot.
pub const COIN_TYPE_ETH: u64 = 60;

/// A queryable record slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Text(String),
    Addr(U256),
    Contenthash,
    Pubkey,
    Name,
}

impl FieldKey {
    pub fn text(key: impl Into<String>) -> Self {
        Self::Text(key.into())
    }

    pub fn addr(coin_type: impl Into<U256>) -> Self {
        Self::Addr(coin_type.into())
    }

    /// The "unset" value for this field.
    pub fn empty_value(&self) -> RecordValue {
        match self {
            Self::Text(_) | Self::Name => RecordValue::Text(String::new()),
            Self::Addr(_) | Self::Contenthash => RecordValue::Bytes(Vec::new()),
            Self::Pubkey => RecordValue::Pubkey {
                x: ZERO_HASH,
                y: ZERO_HASH,
            },
        }
    }

    /// Whether `value` has the kind this field stores.
    pub fn accepts(&self, value: &RecordValue) -> bool {
        matches!(
            (self, value),
            (Self::Text(_) | Self::Name, RecordValue::Text(_))
                | (Self::Addr(_) | Self::Contenthash, RecordValue::Bytes(_))
                | (Self::Pubkey, RecordValue::Pubkey { .. })
        )
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(key) => write!(f, "text:{key}"),
            Self::Addr(coin) => write!(f, "addr:{coin}"),
            Self::Contenthash => f.write_str("contenthash"),
            Self::Pubkey => f.write_str("pubkey"),
            Self::Name => f.write_str("name"),
        }
    }
}

impl FromStr for FieldKey {
    type Err = RecordStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RecordStoreError::MalformedFieldKey(s.to_string());
        match s {
            "contenthash" => return Ok(Self::Contenthash),
            "pubkey" => return Ok(Self::Pubkey),
            "name" => return Ok(Self::Name),
            _ => {}
        }
        if let Some(key) = s.strip_prefix("text:") {
            return Ok(Self::Text(key.to_string()));
        }
        if let Some(coin) = s.strip_prefix("addr:") {
            let coin = match coin.strip_prefix("0x") {
                Some(hex) if !hex.is_empty() => U256::from_str_radix(hex, 16).ok(),
                None if !coin.is_empty() => U256::from_dec_str(coin).ok(),
                _ => None,
            };
            return coin.map(Self::Addr).ok_or_else(malformed);
        }
        Err(malformed())
    }
}

/// A record value. Empty means unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValue {
    Text(String),
    Bytes(Vec<u8>),
    Pubkey { x: Hash, y: Hash },
}

impl RecordValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Bytes(b) => b.is_empty(),
            Self::Pubkey { x, y } => *x == ZERO_HASH && *y == ZERO_HASH,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Bytes(b) => f.write_str(&to_hex(b)),
            Self::Pubkey { x, y } => write!(f, "({}, {})", to_hex(x), to_hex(y)),
        }
    }
}

impl From<&str> for RecordValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RecordValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<u8>> for RecordValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}
