//! # Static Record Provider
//!
//! Records loaded from a JSON document keyed by name:
//!
//! ```json
//! {
//!   "raffy.eth": {
//!     "text": { "name": "Raffy", "avatar": "https://…" },
//!     "addr": { "60": "0x51050ec063d393217b436747617ad1c2285aeeee" },
//!     "contenthash": "0xe301…",
//!     "pubkey": ["0x…", "0x…"],
//!     "name": "raffy.eth"
//!   }
//! }
//! ```
//!
//! Names without an entry can optionally fall back to [`PatternRecord`].

use crate::domain::errors::GatewayError;
use crate::ports::provider::{RecordProvider, RecordView};
use async_trait::async_trait;
use hr_02_record_store::{FieldKey, NodeRecords, RecordValue};
use parking_lot::RwLock;
use serde::Deserialize;
use shared_types::{from_hex, parse_hash, U256};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Contenthash served by [`PatternRecord`] (an IPFS CIDv1 in ENSIP-7 form).
pub const PATTERN_CONTENTHASH: &str =
    "0xe301017012201687de19f1516b9e560ab8655faa678e3a023ebff43494ac06a36581aafc957e";

/// Synthetic record for any name: `text(key)` is `"<name>:text:<key>"`,
/// `addr(coin)` is the coin type as a 20-byte big-endian value.
#[derive(Debug, Clone)]
pub struct PatternRecord {
    name: String,
}

impl PatternRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl RecordView for PatternRecord {
    fn get(&self, field: &FieldKey) -> Option<RecordValue> {
        match field {
            FieldKey::Text(key) => Some(RecordValue::Text(format!("{}:text:{key}", self.name))),
            FieldKey::Addr(coin_type) => {
                let mut word = [0u8; 32];
                coin_type.to_big_endian(&mut word);
                Some(RecordValue::Bytes(word[12..].to_vec()))
            }
            FieldKey::Contenthash => from_hex(PATTERN_CONTENTHASH).ok().map(RecordValue::Bytes),
            FieldKey::Pubkey | FieldKey::Name => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RecordEntry {
    text: HashMap<String, String>,
    addr: HashMap<String, String>,
    contenthash: Option<String>,
    pubkey: Option<(String, String)>,
    name: Option<String>,
}

impl RecordEntry {
    fn into_records(self, owner: &str) -> Result<NodeRecords, GatewayError> {
        let bad = |what: &str, e: &dyn std::fmt::Display| {
            GatewayError::Provider(format!("{owner}: invalid {what}: {e}"))
        };
        let mut records = NodeRecords::default();
        let mut set = |field: FieldKey, value: RecordValue| {
            records
                .set(&field, value)
                .map_err(|e| GatewayError::Provider(format!("{owner}: {e}")))
        };

        for (key, value) in self.text {
            set(FieldKey::text(key), RecordValue::Text(value))?;
        }
        for (coin, value) in self.addr {
            let coin_type = parse_coin_type(&coin).ok_or_else(|| bad("coin type", &coin))?;
            let bytes = from_hex(&value).map_err(|e| bad("address", &e))?;
            set(FieldKey::Addr(coin_type), RecordValue::Bytes(bytes))?;
        }
        if let Some(hash) = self.contenthash {
            let bytes = from_hex(&hash).map_err(|e| bad("contenthash", &e))?;
            set(FieldKey::Contenthash, RecordValue::Bytes(bytes))?;
        }
        if let Some((x, y)) = self.pubkey {
            let x = parse_hash(&x).map_err(|e| bad("pubkey", &e))?;
            let y = parse_hash(&y).map_err(|e| bad("pubkey", &e))?;
            set(FieldKey::Pubkey, RecordValue::Pubkey { x, y })?;
        }
        if let Some(name) = self.name {
            set(FieldKey::Name, RecordValue::Text(name))?;
        }
        Ok(records)
    }
}

fn parse_coin_type(s: &str) -> Option<U256> {
    match s.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16).ok(),
        None => U256::from_dec_str(s).ok(),
    }
}

/// In-memory provider, optionally seeded from a JSON file.
#[derive(Default)]
pub struct StaticRecordProvider {
    records: RwLock<HashMap<String, Arc<NodeRecords>>>,
    pattern_fallback: bool,
}

impl StaticRecordProvider {
    pub fn new(pattern_fallback: bool) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            pattern_fallback,
        }
    }

    pub fn from_json(json: &str, pattern_fallback: bool) -> Result<Self, GatewayError> {
        let entries: HashMap<String, RecordEntry> = serde_json::from_str(json)
            .map_err(|e| GatewayError::Provider(format!("invalid record file: {e}")))?;
        let provider = Self::new(pattern_fallback);
        for (name, entry) in entries {
            let records = entry.into_records(&name)?;
            provider.insert(&name, records);
        }
        Ok(provider)
    }

    pub fn from_file(path: &Path, pattern_fallback: bool) -> Result<Self, GatewayError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| GatewayError::Provider(format!("{}: {e}", path.display())))?;
        let provider = Self::from_json(&json, pattern_fallback)?;
        info!(path = %path.display(), names = provider.len(), "Loaded off-chain records");
        Ok(provider)
    }

    pub fn insert(&self, name: &str, records: NodeRecords) {
        self.records
            .write()
            .insert(name.to_ascii_lowercase(), Arc::new(records));
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordProvider for StaticRecordProvider {
    async fn record(&self, name: &str) -> Result<Option<Arc<dyn RecordView>>, GatewayError> {
        if let Some(records) = self.records.read().get(&name.to_ascii_lowercase()) {
            debug!(name, "Serving stored record");
            return Ok(Some(records.clone() as Arc<dyn RecordView>));
        }
        if self.pattern_fallback {
            return Ok(Some(Arc::new(PatternRecord::new(name))));
        }
        Ok(None)
    }
}
