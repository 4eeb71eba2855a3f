//! CCIP-Read gateway binary.
//!
//! Configuration: optional JSON file named by `HR_GATEWAY_CONFIG`, then
//! `HR_GATEWAY_*` environment overrides. Logging follows `RUST_LOG`.

use anyhow::{Context, Result};
use hr_04_ccip_gateway::{
    CcipHandler, GatewayConfig, GatewayServer, GatewaySigner, StaticRecordProvider,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn load_config() -> Result<GatewayConfig> {
    let mut config = match std::env::var("HR_GATEWAY_CONFIG") {
        Ok(path) => GatewayConfig::from_file(&PathBuf::from(path))?,
        Err(_) => GatewayConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config().context("loading gateway configuration")?;

    let signer = match &config.signing_key {
        Some(key) => GatewaySigner::from_hex(key).context("parsing signing key")?,
        None => {
            warn!("No signing key configured; generated an ephemeral key");
            GatewaySigner::random()
        }
    };

    let provider = match &config.records_file {
        Some(path) => StaticRecordProvider::from_file(path, config.pattern_records)
            .context("loading record file")?,
        None => StaticRecordProvider::new(config.pattern_records),
    };

    let handler = CcipHandler::builder(signer, Arc::new(provider))
        .ttl_secs(config.ttl_secs)
        .resolver(config.resolver_address()?)
        .allowed_resolvers(config.allowed_resolver_set()?)
        .build();
    let handler = Arc::new(handler);

    let server = GatewayServer::bind(config.socket_addr(), handler.clone()).await?;
    let endpoint = server.endpoint()?;
    info!(context = %handler.context(&endpoint), "Publish as ccip.context");

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }
    Ok(())
}
