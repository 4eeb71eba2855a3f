//! # DNS Discovery Records
//!
//! Alternate bootstrap for DNS names: the zone publishes a TXT record
//! `"ENS1 <resolverAddress> <context>"` naming the resolver and, optionally,
//! the gateway context it should use.

use super::errors::GatewayError;
use shared_types::{checksum_address, parse_address, Address};
use std::fmt;
use std::str::FromStr;

pub const ENS1_PREFIX: &str = "ENS1";

const TYPE_TXT: u16 = 16;
const CLASS_INET: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ens1Record {
    pub resolver: Address,
    /// Everything after the resolver, e.g. `"<signer> <endpoint>"`.
    pub context: String,
}

impl FromStr for Ens1Record {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(ENS1_PREFIX)
            .filter(|rest| rest.is_empty() || rest.starts_with(' '))
            .ok_or_else(|| GatewayError::InvalidRequest(format!("not an ENS1 record: {s}")))?;
        let rest = rest.trim_start();
        let (resolver, context) = rest.split_once(' ').unwrap_or((rest, ""));
        let resolver =
            parse_address(resolver).map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
        Ok(Self {
            resolver,
            context: context.trim().to_string(),
        })
    }
}

impl fmt::Display for Ens1Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ENS1_PREFIX} {}", checksum_address(&self.resolver))?;
        if !self.context.is_empty() {
            write!(f, " {}", self.context)?;
        }
        Ok(())
    }
}

/// Wire form of a single-record TXT RRset:
/// `owner ‖ type ‖ class ‖ ttl ‖ rdlength ‖ len(text) ‖ text`.
pub fn txt_rrset(dns_name: &[u8], text: &str, ttl: u32) -> Result<Vec<u8>, GatewayError> {
    let len = u8::try_from(text.len()).map_err(|_| {
        GatewayError::InvalidRequest(format!("TXT string exceeds 255 bytes: {}", text.len()))
    })?;
    let rdata_len = u16::from(len) + 1;

    let mut out = Vec::with_capacity(dns_name.len() + 10 + usize::from(rdata_len));
    out.extend_from_slice(dns_name);
    out.extend_from_slice(&TYPE_TXT.to_be_bytes());
    out.extend_from_slice(&CLASS_INET.to_be_bytes());
    out.extend_from_slice(&ttl.to_be_bytes());
    out.extend_from_slice(&rdata_len.to_be_bytes());
    out.push(len);
    out.extend_from_slice(text.as_bytes());
    Ok(out)
}
