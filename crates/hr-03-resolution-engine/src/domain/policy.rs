//! # Field Policy
//!
//! Which fields a filtering resolver passes through to its inner resolver.

use hr_02_record_store::FieldKey;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldMatcher {
    /// One exact field.
    Field(String),
    AnyText,
    AnyAddr,
}

impl FieldMatcher {
    pub fn field(field: &FieldKey) -> Self {
        FieldMatcher::Field(field.to_string())
    }

    pub fn matches(&self, field: &FieldKey) -> bool {
        match self {
            FieldMatcher::Field(key) => *key == field.to_string(),
            FieldMatcher::AnyText => matches!(field, FieldKey::Text(_)),
            FieldMatcher::AnyAddr => matches!(field, FieldKey::Addr(_)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldPolicy {
    #[default]
    AllowAll,
    Allow(Vec<FieldMatcher>),
    Deny(Vec<FieldMatcher>),
}

impl FieldPolicy {
    /// Pass exactly the listed fields.
    pub fn only<'a>(fields: impl IntoIterator<Item = &'a FieldKey>) -> Self {
        FieldPolicy::Allow(fields.into_iter().map(FieldMatcher::field).collect())
    }

    pub fn allows(&self, field: &FieldKey) -> bool {
        match self {
            FieldPolicy::AllowAll => true,
            FieldPolicy::Allow(matchers) => matchers.iter().any(|m| m.matches(field)),
            FieldPolicy::Deny(matchers) => !matchers.iter().any(|m| m.matches(field)),
        }
    }
}
