//! Gateway error types with HTTP status mapping.

use axum::http::StatusCode;
use thiserror::Error;

/// Message prefix the client uses to recognise an unsupported call.
pub const UNSUPPORTED_SELECTOR_MESSAGE: &str = "unsupported selector";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("abi: {0}")]
    Abi(String),

    #[error("unsupported selector {0}")]
    UnsupportedSelector(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("record provider: {0}")]
    Provider(String),

    #[error("signing: {0}")]
    Signing(String),

    #[error("resolver not allowed: {0}")]
    ResolverNotAllowed(String),

    #[error("server: {0}")]
    Server(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Abi(_) | Self::UnsupportedSelector(_) | Self::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::ResolverNotAllowed(_) => StatusCode::FORBIDDEN,
            Self::Provider(_) | Self::Signing(_) | Self::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
