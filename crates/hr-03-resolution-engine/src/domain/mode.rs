//! # Query Mode
//!
//! Caller-supplied, per-call switches. Never persisted, never mutates
//! stored state.

use serde::{Deserialize, Serialize};

/// Whether the caller pins resolution to one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnchainOverride {
    /// Normal precedence.
    #[default]
    Auto,
    /// Never consult the off-chain gateway.
    ForceOn,
    /// Skip local records and fallbacks; go straight to the gateway.
    ForceOff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryMode {
    pub onchain_override: OnchainOverride,
    /// `false` behaves like a client without CCIP-Read support.
    pub allow_gateway_roundtrip: bool,
}

impl Default for QueryMode {
    fn default() -> Self {
        Self {
            onchain_override: OnchainOverride::Auto,
            allow_gateway_roundtrip: true,
        }
    }
}

impl QueryMode {
    pub fn auto() -> Self {
        Self::default()
    }

    pub fn force_on() -> Self {
        Self {
            onchain_override: OnchainOverride::ForceOn,
            ..Self::default()
        }
    }

    pub fn force_off() -> Self {
        Self {
            onchain_override: OnchainOverride::ForceOff,
            ..Self::default()
        }
    }

    /// Same override, gateway round trips disallowed.
    pub fn without_gateway(self) -> Self {
        Self {
            allow_gateway_roundtrip: false,
            ..self
        }
    }

    pub fn skips_local(&self) -> bool {
        self.onchain_override == OnchainOverride::ForceOff
    }
}
