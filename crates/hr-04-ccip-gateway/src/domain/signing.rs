//! # Response Signing (secp256k1)
//!
//! The gateway signs
//!
//! ```text
//! keccak256(0x1900 ‖ resolver ‖ uint64 expires ‖ keccak256(request) ‖ keccak256(result))
//! ```
//!
//! as a recoverable ECDSA signature `r ‖ s ‖ v` with `s` in the lower half
//! of the curve order (EIP-2) and `v ∈ {27, 28}`. Verifiers recover the
//! signer address and compare it to the committed `ccip.context` signer.

use super::errors::GatewayError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use shared_types::{from_hex, keccak256, Address, Hash};

/// Build the digest a gateway response is signed over.
pub fn signing_hash(resolver: &Address, expires: u64, request: &[u8], result: &[u8]) -> Hash {
    let mut preimage = Vec::with_capacity(2 + 20 + 8 + 32 + 32);
    preimage.extend_from_slice(&[0x19, 0x00]);
    preimage.extend_from_slice(resolver);
    preimage.extend_from_slice(&expires.to_be_bytes());
    preimage.extend_from_slice(&keccak256(request));
    preimage.extend_from_slice(&keccak256(result));
    keccak256(&preimage)
}

/// Derive the Ethereum address of a public key.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    // Skip the 0x04 uncompressed-point prefix
    let hash = keccak256(&encoded.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

fn parse_recovery_id(v: u8) -> Result<RecoveryId, GatewayError> {
    let byte = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        _ => return Err(GatewayError::Signing(format!("invalid recovery id {v}"))),
    };
    RecoveryId::from_byte(byte)
        .ok_or_else(|| GatewayError::Signing(format!("invalid recovery id {v}")))
}

/// Recover the signer of `hash` from a 65-byte `r ‖ s ‖ v` signature or a
/// 64-byte EIP-2098 compact signature.
pub fn recover_signer(hash: &Hash, signature: &[u8]) -> Result<Address, GatewayError> {
    let (rs, recovery_id) = match signature.len() {
        65 => {
            let mut rs = [0u8; 64];
            rs.copy_from_slice(&signature[..64]);
            (rs, parse_recovery_id(signature[64])?)
        }
        64 => {
            let mut rs = [0u8; 64];
            rs.copy_from_slice(signature);
            let y_odd = rs[32] & 0x80 != 0;
            rs[32] &= 0x7f;
            (rs, RecoveryId::new(y_odd, false))
        }
        len => {
            return Err(GatewayError::Signing(format!(
                "signature must be 64 or 65 bytes, got {len}"
            )))
        }
    };

    let signature = Signature::from_slice(&rs)
        .map_err(|e| GatewayError::Signing(format!("malformed signature: {e}")))?;
    if signature.normalize_s().is_some() {
        return Err(GatewayError::Signing("high-s signature".into()));
    }
    let key = VerifyingKey::recover_from_prehash(hash, &signature, recovery_id)
        .map_err(|e| GatewayError::Signing(format!("recovery failed: {e}")))?;
    Ok(address_from_pubkey(&key))
}

/// The gateway's committed signing key.
#[derive(Clone)]
pub struct GatewaySigner {
    key: SigningKey,
    address: Address,
}

impl std::fmt::Debug for GatewaySigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewaySigner")
            .field("address", &shared_types::checksum_address(&self.address))
            .finish_non_exhaustive()
    }
}

impl GatewaySigner {
    pub fn new(key: SigningKey) -> Self {
        let address = address_from_pubkey(key.verifying_key());
        Self { key, address }
    }

    /// Parse a 32-byte private key from hex.
    pub fn from_hex(secret: &str) -> Result<Self, GatewayError> {
        let bytes = from_hex(secret).map_err(|e| GatewayError::Signing(e.to_string()))?;
        let key = SigningKey::from_slice(&bytes)
            .map_err(|_| GatewayError::Signing("invalid secp256k1 private key".into()))?;
        Ok(Self::new(key))
    }

    /// Fresh key; the resulting address must be published before use.
    pub fn random() -> Self {
        Self::new(SigningKey::random(&mut rand::thread_rng()))
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a prehashed digest, returning `r ‖ s ‖ v`.
    pub fn sign(&self, hash: &Hash) -> Result<[u8; 65], GatewayError> {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(hash)
            .map_err(|e| GatewayError::Signing(e.to_string()))?;

        // Normalize S to the lower half (EIP-2), flipping y parity with it
        let (signature, recovery_id) = match signature.normalize_s() {
            Some(low) => (
                low,
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            ),
            None => (signature, recovery_id),
        };

        let mut out = [0u8; 65];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte() + 27;
        Ok(out)
    }
}
