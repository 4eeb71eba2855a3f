//! Gateway configuration with validation.
//!
//! Loaded from an optional JSON file, then overridden by `HR_GATEWAY_*`
//! environment variables.

use serde::{Deserialize, Serialize};
use shared_types::{parse_address, Address};
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Seconds a signed response stays valid.
    pub ttl_secs: u64,
    /// Hex secp256k1 private key; an ephemeral key is generated when absent.
    pub signing_key: Option<String>,
    /// Sign for this resolver instead of the request's sender.
    pub resolver: Option<String>,
    /// Senders permitted to request signatures; empty allows any.
    pub allowed_resolvers: Vec<String>,
    /// JSON file of per-name records.
    pub records_file: Option<PathBuf>,
    /// Answer names without a file record with `"<name>:text:<key>"` style
    /// values.
    pub pattern_records: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8016,
            ttl_secs: 60,
            signing_key: None,
            resolver: None,
            allowed_resolvers: Vec::new(),
            records_file: None,
            pattern_records: true,
        }
    }
}

impl GatewayConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `HR_GATEWAY_*` overrides read through `var`.
    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("HR_GATEWAY_HOST") {
            self.host = host
                .parse()
                .map_err(|_| invalid("HR_GATEWAY_HOST", host.clone()))?;
        }
        if let Some(port) = var("HR_GATEWAY_PORT") {
            self.port = port
                .parse()
                .map_err(|_| invalid("HR_GATEWAY_PORT", port.clone()))?;
        }
        if let Some(ttl) = var("HR_GATEWAY_TTL") {
            self.ttl_secs = ttl
                .parse()
                .map_err(|_| invalid("HR_GATEWAY_TTL", ttl.clone()))?;
        }
        if let Some(key) = var("HR_GATEWAY_SIGNING_KEY") {
            self.signing_key = Some(key);
        }
        if let Some(resolver) = var("HR_GATEWAY_RESOLVER") {
            self.resolver = Some(resolver);
        }
        if let Some(list) = var("HR_GATEWAY_ALLOWED_RESOLVERS") {
            self.allowed_resolvers = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(path) = var("HR_GATEWAY_RECORDS") {
            self.records_file = Some(PathBuf::from(path));
        }
        if let Some(flag) = var("HR_GATEWAY_PATTERN_RECORDS") {
            self.pattern_records = flag
                .parse()
                .map_err(|_| invalid("HR_GATEWAY_PATTERN_RECORDS", flag.clone()))?;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ttl_secs == 0 {
            return Err(invalid("ttl_secs", "must be positive"));
        }
        self.resolver_address()?;
        self.allowed_resolver_set()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn resolver_address(&self) -> Result<Option<Address>, ConfigError> {
        self.resolver
            .as_deref()
            .map(|r| parse_address(r).map_err(|e| invalid("resolver", e.to_string())))
            .transpose()
    }

    /// `None` when any sender is allowed.
    pub fn allowed_resolver_set(&self) -> Result<Option<HashSet<Address>>, ConfigError> {
        if self.allowed_resolvers.is_empty() {
            return Ok(None);
        }
        self.allowed_resolvers
            .iter()
            .map(|r| parse_address(r).map_err(|e| invalid("allowed_resolvers", e.to_string())))
            .collect::<Result<HashSet<_>, _>>()
            .map(Some)
    }
}
