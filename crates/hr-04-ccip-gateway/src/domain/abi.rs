//! # ABI Codec
//!
//! The subset of the Solidity ABI the lookup protocol needs: static words
//! plus `bytes`, `string` and `bytes[]` in a single top-level tuple.
//!
//! Dynamic values are encoded as an offset word in the head pointing to a
//! length-prefixed, zero-padded tail.

use super::errors::GatewayError;
use shared_types::{Address, Hash, U256};

const WORD: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(Hash),
    Uint(U256),
    Address(Address),
    Bytes(Vec<u8>),
    String(String),
    BytesArray(Vec<Vec<u8>>),
}

impl Token {
    fn is_dynamic(&self) -> bool {
        matches!(self, Token::Bytes(_) | Token::String(_) | Token::BytesArray(_))
    }
}

pub fn uint_word(value: U256) -> Hash {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

pub fn address_word(address: &Address) -> Hash {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address);
    word
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

fn push_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&uint_word(U256::from(bytes.len())));
    out.extend_from_slice(bytes);
    out.resize(out.len() + padded_len(bytes.len()) - bytes.len(), 0);
}

fn encode_tail(token: &Token) -> Vec<u8> {
    let mut tail = Vec::new();
    match token {
        Token::Bytes(bytes) => push_bytes(&mut tail, bytes),
        Token::String(text) => push_bytes(&mut tail, text.as_bytes()),
        Token::BytesArray(items) => {
            tail.extend_from_slice(&uint_word(U256::from(items.len())));
            let mut offset = items.len() * WORD;
            let mut bodies = Vec::new();
            for item in items {
                tail.extend_from_slice(&uint_word(U256::from(offset)));
                let before = bodies.len();
                push_bytes(&mut bodies, item);
                offset += bodies.len() - before;
            }
            tail.extend_from_slice(&bodies);
        }
        Token::Word(_) | Token::Uint(_) | Token::Address(_) => {}
    }
    tail
}

/// Encode `tokens` as one tuple (function arguments or return values).
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let mut head = Vec::with_capacity(tokens.len() * WORD);
    let mut tail = Vec::new();
    for token in tokens {
        match token {
            Token::Word(word) => head.extend_from_slice(word),
            Token::Uint(value) => head.extend_from_slice(&uint_word(*value)),
            Token::Address(address) => head.extend_from_slice(&address_word(address)),
            dynamic => {
                debug_assert!(dynamic.is_dynamic());
                let offset = tokens.len() * WORD + tail.len();
                head.extend_from_slice(&uint_word(U256::from(offset)));
                tail.extend_from_slice(&encode_tail(dynamic));
            }
        }
    }
    head.extend_from_slice(&tail);
    head
}

/// `selector ‖ encode(tokens)`.
pub fn encode_call(selector: [u8; 4], tokens: &[Token]) -> Vec<u8> {
    let mut out = selector.to_vec();
    out.extend_from_slice(&encode(tokens));
    out
}

/// Positional reader over an encoded tuple.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    data: &'a [u8],
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn slice(&self, start: usize, len: usize) -> Result<&'a [u8], GatewayError> {
        start
            .checked_add(len)
            .and_then(|end| self.data.get(start..end))
            .ok_or_else(|| {
                GatewayError::Abi(format!(
                    "read of {len} bytes at {start} exceeds {} byte payload",
                    self.data.len()
                ))
            })
    }

    fn word_at(&self, offset: usize) -> Result<Hash, GatewayError> {
        let mut word = [0u8; 32];
        word.copy_from_slice(self.slice(offset, WORD)?);
        Ok(word)
    }

    fn usize_at(&self, offset: usize) -> Result<usize, GatewayError> {
        let value = U256::from_big_endian(&self.word_at(offset)?);
        if value > U256::from(self.data.len()) {
            return Err(GatewayError::Abi(format!("offset/length {value} out of range")));
        }
        Ok(value.as_usize())
    }

    fn bytes_at(&self, offset: usize) -> Result<Vec<u8>, GatewayError> {
        let len = self.usize_at(offset)?;
        Ok(self.slice(offset + WORD, len)?.to_vec())
    }

    /// Head word `index`.
    pub fn word(&self, index: usize) -> Result<Hash, GatewayError> {
        self.word_at(index * WORD)
    }

    pub fn uint(&self, index: usize) -> Result<U256, GatewayError> {
        Ok(U256::from_big_endian(&self.word(index)?))
    }

    pub fn uint64(&self, index: usize) -> Result<u64, GatewayError> {
        let value = self.uint(index)?;
        if value > U256::from(u64::MAX) {
            return Err(GatewayError::Abi(format!("{value} overflows uint64")));
        }
        Ok(value.as_u64())
    }

    pub fn address(&self, index: usize) -> Result<Address, GatewayError> {
        let word = self.word(index)?;
        if word[..12].iter().any(|b| *b != 0) {
            return Err(GatewayError::Abi("dirty address word".into()));
        }
        let mut address = [0u8; 20];
        address.copy_from_slice(&word[12..]);
        Ok(address)
    }

    pub fn bytes(&self, index: usize) -> Result<Vec<u8>, GatewayError> {
        let offset = self.usize_at(index * WORD)?;
        self.bytes_at(offset)
    }

    pub fn string(&self, index: usize) -> Result<String, GatewayError> {
        String::from_utf8(self.bytes(index)?)
            .map_err(|_| GatewayError::Abi("string is not UTF-8".into()))
    }

    pub fn bytes_array(&self, index: usize) -> Result<Vec<Vec<u8>>, GatewayError> {
        let offset = self.usize_at(index * WORD)?;
        let count = self.usize_at(offset)?;
        let inner = Decoder::new(self.slice(offset + WORD, self.data.len() - offset - WORD)?);
        (0..count)
            .map(|i| {
                let item = inner.usize_at(i * WORD)?;
                inner.bytes_at(item)
            })
            .collect()
    }
}

/// Split calldata into selector and argument tuple.
pub fn split_selector(calldata: &[u8]) -> Result<([u8; 4], &[u8]), GatewayError> {
    if calldata.len() < 4 {
        return Err(GatewayError::InvalidRequest(format!(
            "calldata too short: {} bytes",
            calldata.len()
        )));
    }
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&calldata[..4]);
    Ok((selector, &calldata[4..]))
}
