//! # Engine Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default cap on fallback hops within one resolution call.
pub const DEFAULT_MAX_FALLBACK_DEPTH: usize = 16;

/// Default deadline for a single gateway round trip.
pub const DEFAULT_GATEWAY_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineConfigError {
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Nodes a single call may visit through fallback pointers.
    pub max_fallback_depth: usize,
    pub gateway_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_fallback_depth: DEFAULT_MAX_FALLBACK_DEPTH,
            gateway_timeout_ms: DEFAULT_GATEWAY_TIMEOUT_MS,
        }
    }
}

impl EngineConfig {
    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_millis(self.gateway_timeout_ms)
    }

    /// Reject configurations that would make every call fail.
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        if self.max_fallback_depth == 0 {
            return Err(EngineConfigError::Invalid {
                key: "max_fallback_depth",
                reason: "must be at least 1".into(),
            });
        }
        if self.gateway_timeout_ms == 0 {
            return Err(EngineConfigError::Invalid {
                key: "gateway_timeout_ms",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}
