//! # Name Hashing
//!
//! ENS-compatible node identifiers and DNS wire-format names.
//!
//! - `labelhash(label) = keccak256(label)`
//! - `namehash("") = 0x00..00`
//! - `namehash(label.rest) = keccak256(namehash(rest) || labelhash(label))`
//!
//! DNS wire format is the sequence of length-prefixed labels terminated by a
//! zero byte; it is how names travel inside `resolve(bytes,bytes)` calls.

use crate::entities::{Hash, ZERO_HASH};
use crate::errors::ParseError;
use sha3::{Digest, Keccak256};

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Hash of a single label.
pub fn labelhash(label: &str) -> Hash {
    keccak256(label.as_bytes())
}

/// Id of the child `label` under `parent`.
pub fn child_node(parent: &Hash, label: &str) -> Hash {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(parent);
    buf[32..].copy_from_slice(&labelhash(label));
    keccak256(&buf)
}

/// Node id of a dotted name. The empty string is the root.
pub fn namehash(name: &str) -> Hash {
    if name.is_empty() {
        return ZERO_HASH;
    }
    name.rsplit('.')
        .fold(ZERO_HASH, |node, label| child_node(&node, label))
}

/// Ids of `name` and each of its ancestors, nearest first, ending at the root.
pub fn lineage(name: &str) -> Vec<Hash> {
    let mut ids = vec![ZERO_HASH];
    if !name.is_empty() {
        for label in name.rsplit('.') {
            let parent = ids[ids.len() - 1];
            ids.push(child_node(&parent, label));
        }
    }
    ids.reverse();
    ids
}

/// Encode a dotted name in DNS wire format.
pub fn dns_encode(name: &str) -> Result<Vec<u8>, ParseError> {
    let mut out = Vec::with_capacity(name.len() + 2);
    if !name.is_empty() {
        for label in name.split('.') {
            if label.is_empty() {
                return Err(ParseError::EmptyLabel(name.to_string()));
            }
            let len = label.len();
            if len > 255 {
                return Err(ParseError::LabelTooLong { len });
            }
            out.push(len as u8);
            out.extend_from_slice(label.as_bytes());
        }
    }
    out.push(0);
    Ok(out)
}

/// Decode a DNS wire-format name back to dotted form.
///
/// Trailing bytes after the terminating zero are rejected.
pub fn dns_decode(bytes: &[u8]) -> Result<String, ParseError> {
    let mut labels: Vec<&str> = Vec::new();
    let mut pos = 0usize;
    loop {
        let len = *bytes.get(pos).ok_or(ParseError::MalformedDnsName)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let raw = bytes
            .get(pos..pos + len)
            .ok_or(ParseError::MalformedDnsName)?;
        labels.push(std::str::from_utf8(raw).map_err(|_| ParseError::NonUtf8Label)?);
        pos += len;
    }
    if pos != bytes.len() {
        return Err(ParseError::MalformedDnsName);
    }
    Ok(labels.join("."))
}
