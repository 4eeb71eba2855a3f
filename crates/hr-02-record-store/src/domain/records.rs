//! # Node Records
//!
//! Everything one resolver instance stores for one node.

use super::errors::RecordStoreError;
use super::fields::{FieldKey, RecordValue};
use shared_types::{Hash, U256};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeRecords {
    pub texts: HashMap<String, String>,
    pub addrs: HashMap<U256, Vec<u8>>,
    pub contenthash: Vec<u8>,
    pub pubkey: Option<(Hash, Hash)>,
    pub name: String,
    /// Suppresses the off-chain gateway for this node.
    pub onchain: bool,
}

impl NodeRecords {
    /// Read a field; unset fields yield the field's empty value.
    pub fn get(&self, field: &FieldKey) -> RecordValue {
        match field {
            FieldKey::Text(key) => RecordValue::Text(self.texts.get(key).cloned().unwrap_or_default()),
            FieldKey::Addr(coin) => RecordValue::Bytes(self.addrs.get(coin).cloned().unwrap_or_default()),
            FieldKey::Contenthash => RecordValue::Bytes(self.contenthash.clone()),
            FieldKey::Pubkey => match self.pubkey {
                Some((x, y)) => RecordValue::Pubkey { x, y },
                None => field.empty_value(),
            },
            FieldKey::Name => RecordValue::Text(self.name.clone()),
        }
    }

    /// Write a field. Writing an empty value clears it.
    pub fn set(&mut self, field: &FieldKey, value: RecordValue) -> Result<(), RecordStoreError> {
        if !field.accepts(&value) {
            return Err(RecordStoreError::ValueMismatch {
                field: field.to_string(),
            });
        }
        let clear = value.is_empty();
        match (field, value) {
            (FieldKey::Text(key), RecordValue::Text(text)) => {
                if clear {
                    self.texts.remove(key);
                } else {
                    self.texts.insert(key.clone(), text);
                }
            }
            (FieldKey::Addr(coin), RecordValue::Bytes(bytes)) => {
                if clear {
                    self.addrs.remove(coin);
                } else {
                    self.addrs.insert(*coin, bytes);
                }
            }
            (FieldKey::Contenthash, RecordValue::Bytes(bytes)) => self.contenthash = bytes,
            (FieldKey::Pubkey, RecordValue::Pubkey { x, y }) => {
                self.pubkey = (!clear).then_some((x, y));
            }
            (FieldKey::Name, RecordValue::Text(text)) => self.name = text,
            // accepts() above rules out every other pairing
            (field, _) => {
                return Err(RecordStoreError::ValueMismatch {
                    field: field.to_string(),
                })
            }
        }
        Ok(())
    }
}
