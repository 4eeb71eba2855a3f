//! # Record Calls
//!
//! Resolver function schemas understood by the gateway, keyed by selector.
//!
//! | Selector | Function | Returns |
//! |---|---|---|
//! | `0x59d1d43c` | `text(bytes32,string)` | `string` |
//! | `0x3b3b57de` | `addr(bytes32)` | `address` |
//! | `0xf1cb7e06` | `addr(bytes32,uint256)` | `bytes` |
//! | `0xbc1c58d1` | `contenthash(bytes32)` | `bytes` |
//! | `0xc8690233` | `pubkey(bytes32)` | `(bytes32,bytes32)` |
//! | `0x691f3431` | `name(bytes32)` | `string` |
//! | `0xac9650d8` | `multicall(bytes[])` | `bytes[]` |

use super::abi::{self, split_selector, Decoder, Token};
use super::errors::GatewayError;
use hr_02_record_store::{FieldKey, RecordValue, COIN_TYPE_ETH};
use shared_types::{to_hex, Hash, U256, ZERO_HASH};

pub const RESOLVE_SELECTOR: [u8; 4] = [0x90, 0x61, 0xb9, 0x23];
pub const TEXT_SELECTOR: [u8; 4] = [0x59, 0xd1, 0xd4, 0x3c];
pub const ADDR_SELECTOR: [u8; 4] = [0x3b, 0x3b, 0x57, 0xde];
pub const ADDR_COIN_SELECTOR: [u8; 4] = [0xf1, 0xcb, 0x7e, 0x06];
pub const CONTENTHASH_SELECTOR: [u8; 4] = [0xbc, 0x1c, 0x58, 0xd1];
pub const PUBKEY_SELECTOR: [u8; 4] = [0xc8, 0x69, 0x02, 0x33];
pub const NAME_SELECTOR: [u8; 4] = [0x69, 0x1f, 0x34, 0x31];
pub const MULTICALL_SELECTOR: [u8; 4] = [0xac, 0x96, 0x50, 0xd8];

/// `resolve(bytes name, bytes data)`: the outer request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    /// DNS wire-format name.
    pub dns_name: Vec<u8>,
    /// Inner resolver call.
    pub call: Vec<u8>,
}

impl ResolveRequest {
    pub fn encode(&self) -> Vec<u8> {
        abi::encode_call(
            RESOLVE_SELECTOR,
            &[
                Token::Bytes(self.dns_name.clone()),
                Token::Bytes(self.call.clone()),
            ],
        )
    }

    /// Decode from calldata whose selector has already been checked.
    pub fn decode_args(args: &[u8]) -> Result<Self, GatewayError> {
        let decoder = Decoder::new(args);
        Ok(Self {
            dns_name: decoder.bytes(0)?,
            call: decoder.bytes(1)?,
        })
    }

    pub fn decode(calldata: &[u8]) -> Result<Self, GatewayError> {
        let (selector, args) = split_selector(calldata)?;
        if selector != RESOLVE_SELECTOR {
            return Err(GatewayError::UnsupportedSelector(to_hex(&selector)));
        }
        Self::decode_args(args)
    }
}

/// One decoded resolver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordCall {
    Text { node: Hash, key: String },
    /// Legacy `addr(bytes32)`, an Ether address.
    Addr { node: Hash },
    AddrCoin { node: Hash, coin_type: U256 },
    Contenthash { node: Hash },
    Pubkey { node: Hash },
    Name { node: Hash },
    Multicall(Vec<Vec<u8>>),
}

impl RecordCall {
    /// Call that reads `field` at `node`.
    pub fn for_field(node: &Hash, field: &FieldKey) -> Self {
        let node = *node;
        match field {
            FieldKey::Text(key) => Self::Text {
                node,
                key: key.clone(),
            },
            FieldKey::Addr(coin_type) => Self::AddrCoin {
                node,
                coin_type: *coin_type,
            },
            FieldKey::Contenthash => Self::Contenthash { node },
            FieldKey::Pubkey => Self::Pubkey { node },
            FieldKey::Name => Self::Name { node },
        }
    }

    pub fn decode(calldata: &[u8]) -> Result<Self, GatewayError> {
        let (selector, args) = split_selector(calldata)?;
        let decoder = Decoder::new(args);
        let call = match selector {
            TEXT_SELECTOR => Self::Text {
                node: decoder.word(0)?,
                key: decoder.string(1)?,
            },
            ADDR_SELECTOR => Self::Addr {
                node: decoder.word(0)?,
            },
            ADDR_COIN_SELECTOR => Self::AddrCoin {
                node: decoder.word(0)?,
                coin_type: decoder.uint(1)?,
            },
            CONTENTHASH_SELECTOR => Self::Contenthash {
                node: decoder.word(0)?,
            },
            PUBKEY_SELECTOR => Self::Pubkey {
                node: decoder.word(0)?,
            },
            NAME_SELECTOR => Self::Name {
                node: decoder.word(0)?,
            },
            MULTICALL_SELECTOR => Self::Multicall(decoder.bytes_array(0)?),
            other => return Err(GatewayError::UnsupportedSelector(to_hex(&other))),
        };
        Ok(call)
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Text { node, key } => abi::encode_call(
                TEXT_SELECTOR,
                &[Token::Word(*node), Token::String(key.clone())],
            ),
            Self::Addr { node } => abi::encode_call(ADDR_SELECTOR, &[Token::Word(*node)]),
            Self::AddrCoin { node, coin_type } => abi::encode_call(
                ADDR_COIN_SELECTOR,
                &[Token::Word(*node), Token::Uint(*coin_type)],
            ),
            Self::Contenthash { node } => {
                abi::encode_call(CONTENTHASH_SELECTOR, &[Token::Word(*node)])
            }
            Self::Pubkey { node } => abi::encode_call(PUBKEY_SELECTOR, &[Token::Word(*node)]),
            Self::Name { node } => abi::encode_call(NAME_SELECTOR, &[Token::Word(*node)]),
            Self::Multicall(calls) => {
                abi::encode_call(MULTICALL_SELECTOR, &[Token::BytesArray(calls.clone())])
            }
        }
    }

    /// Record field this call reads; `None` for `multicall`.
    pub fn field(&self) -> Option<FieldKey> {
        match self {
            Self::Text { key, .. } => Some(FieldKey::text(key.clone())),
            Self::Addr { .. } => Some(FieldKey::addr(COIN_TYPE_ETH)),
            Self::AddrCoin { coin_type, .. } => Some(FieldKey::Addr(*coin_type)),
            Self::Contenthash { .. } => Some(FieldKey::Contenthash),
            Self::Pubkey { .. } => Some(FieldKey::Pubkey),
            Self::Name { .. } => Some(FieldKey::Name),
            Self::Multicall(_) => None,
        }
    }

    /// ABI-encode `value` as this call's return data.
    pub fn encode_result(&self, value: &RecordValue) -> Vec<u8> {
        match (self, value) {
            (Self::Addr { .. }, RecordValue::Bytes(bytes)) if bytes.len() == 20 => {
                let mut word = [0u8; 32];
                word[12..].copy_from_slice(bytes);
                word.to_vec()
            }
            (Self::Addr { .. }, _) => ZERO_HASH.to_vec(),
            (Self::Pubkey { .. }, RecordValue::Pubkey { x, y }) => {
                abi::encode(&[Token::Word(*x), Token::Word(*y)])
            }
            (Self::Pubkey { .. }, _) => abi::encode(&[Token::Word(ZERO_HASH), Token::Word(ZERO_HASH)]),
            (_, RecordValue::Text(text)) => abi::encode(&[Token::String(text.clone())]),
            (Self::Text { .. } | Self::Name { .. }, _) => abi::encode(&[Token::String(String::new())]),
            (_, RecordValue::Bytes(bytes)) => abi::encode(&[Token::Bytes(bytes.clone())]),
            (_, _) => abi::encode(&[Token::Bytes(Vec::new())]),
        }
    }

    /// Decode return data produced by `encode_result`.
    pub fn decode_result(&self, data: &[u8]) -> Result<RecordValue, GatewayError> {
        let decoder = Decoder::new(data);
        let value = match self {
            Self::Text { .. } | Self::Name { .. } => RecordValue::Text(decoder.string(0)?),
            Self::Addr { .. } => {
                let address = decoder.address(0)?;
                if address == [0u8; 20] {
                    RecordValue::Bytes(Vec::new())
                } else {
                    RecordValue::Bytes(address.to_vec())
                }
            }
            Self::AddrCoin { .. } | Self::Contenthash { .. } => {
                RecordValue::Bytes(decoder.bytes(0)?)
            }
            Self::Pubkey { .. } => RecordValue::Pubkey {
                x: decoder.word(0)?,
                y: decoder.word(1)?,
            },
            Self::Multicall(_) => {
                return Err(GatewayError::InvalidRequest(
                    "multicall results decode per inner call".into(),
                ))
            }
        };
        Ok(value)
    }
}
