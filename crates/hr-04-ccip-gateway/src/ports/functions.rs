//! Custom function handlers.
//!
//! Any selector other than `resolve(bytes,bytes)` is looked up in the
//! handler table, so a gateway can answer arbitrary view functions and not
//! only record lookups.

use crate::domain::errors::GatewayError;
use async_trait::async_trait;

#[async_trait]
pub trait FunctionHandler: Send + Sync {
    /// `args` is the ABI-encoded argument tuple (selector stripped); the
    /// return value is the ABI-encoded result tuple.
    async fn call(&self, args: &[u8]) -> Result<Vec<u8>, GatewayError>;
}

/// Adapts a synchronous closure.
pub struct FnHandler<F>(pub F);

#[async_trait]
impl<F> FunctionHandler for FnHandler<F>
where
    F: Fn(&[u8]) -> Result<Vec<u8>, GatewayError> + Send + Sync,
{
    async fn call(&self, args: &[u8]) -> Result<Vec<u8>, GatewayError> {
        (self.0)(args)
    }
}
