//! # Resolution Errors
//!
//! `ResolveError` is returned to callers. `FallbackAnomaly` never is: the
//! engine logs it and continues as if no fallback were configured.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Gateway unreachable: {0}")]
    GatewayUnreachable(String),

    #[error("Gateway signature invalid: expected signer {expected}, recovered {recovered}")]
    SignatureInvalid { expected: String, recovered: String },

    #[error("Gateway response expired at {expires} (now {now})")]
    ResponseExpired { expires: u64, now: u64 },

    #[error("Gateway does not support {0}")]
    UnsupportedSelector(String),

    #[error("Gateway rejected request ({status}): {message}")]
    GatewayRejected { status: u16, message: String },

    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),

    #[error("No resolver for {0}")]
    NoResolver(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),
}

impl ResolveError {
    /// Transport-level failures; the same request may succeed later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResolveError::GatewayUnreachable(_))
    }

    /// Failures that indicate a forged or stale gateway answer.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            ResolveError::SignatureInvalid { .. } | ResolveError::ResponseExpired { .. }
        )
    }
}

/// Degraded fallback configuration, detected while following pointers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FallbackAnomaly {
    #[error("fallback pointer at {node} has invalid length {len}")]
    Malformed { node: String, len: usize },

    #[error("fallback pointer at {node} revisits {target}")]
    Cyclic { node: String, target: String },

    #[error("fallback chain exceeded {limit} hops")]
    DepthExceeded { limit: usize },
}
