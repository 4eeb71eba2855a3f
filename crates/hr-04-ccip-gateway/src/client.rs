//! # Gateway Client
//!
//! Issues the off-chain half of a lookup and authenticates the answer
//! against the committed `ccip.context` signer before decoding it.
//!
//! Endpoints containing `{sender}` or `{data}` are treated as EIP-3668 URL
//! templates and fetched with `GET`; any other endpoint receives a JSON
//! `POST`.

use crate::domain::calls::{RecordCall, ResolveRequest};
use crate::domain::envelope::{CcipErrorBody, CcipRequest, CcipResponse, SignedResponse};
use crate::domain::errors::UNSUPPORTED_SELECTOR_MESSAGE;
use crate::domain::signing::{recover_signer, signing_hash};
use crate::ports::{SystemTimeSource, TimeSource};
use async_trait::async_trait;
use hr_02_record_store::RecordValue;
use hr_03_resolution_engine::{GatewayRequest, OffchainGateway, ResolveError};
use shared_types::{checksum_address, dns_encode, from_hex, namehash, to_hex, Address};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct CcipClient {
    http: reqwest::Client,
    clock: Arc<dyn TimeSource>,
}

impl Default for CcipClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl CcipClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            clock: Arc::new(SystemTimeSource),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    /// Send `request` to `endpoint` on behalf of `sender` and return the
    /// raw signed payload.
    pub async fn call(
        &self,
        endpoint: &str,
        sender: &Address,
        request: &[u8],
    ) -> Result<Vec<u8>, ResolveError> {
        let sender_hex = to_hex(sender);
        let data_hex = to_hex(request);
        let pending = if endpoint.contains("{sender}") || endpoint.contains("{data}") {
            let url = endpoint
                .replace("{sender}", &sender_hex)
                .replace("{data}", &data_hex);
            self.http.get(url)
        } else {
            self.http.post(endpoint).json(&CcipRequest {
                sender: sender_hex,
                data: data_hex,
            })
        };

        let response = pending
            .send()
            .await
            .map_err(|e| ResolveError::GatewayUnreachable(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ResolveError::GatewayUnreachable(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<CcipErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            warn!(endpoint, status = status.as_u16(), %message, "Gateway rejected request");
            if message.starts_with(UNSUPPORTED_SELECTOR_MESSAGE) {
                return Err(ResolveError::UnsupportedSelector(message));
            }
            return Err(ResolveError::GatewayRejected {
                status: status.as_u16(),
                message,
            });
        }

        let reply: CcipResponse = serde_json::from_slice(&body)
            .map_err(|e| ResolveError::MalformedResponse(format!("body: {e}")))?;
        from_hex(&reply.data).map_err(|e| ResolveError::MalformedResponse(format!("data: {e}")))
    }

    /// Check expiry and signer of `payload`, returning the inner result.
    pub fn verify(
        &self,
        signer: &Address,
        resolver: &Address,
        request: &[u8],
        payload: &[u8],
    ) -> Result<Vec<u8>, ResolveError> {
        let signed = SignedResponse::decode(payload)
            .map_err(|e| ResolveError::MalformedResponse(e.to_string()))?;

        let now = self.clock.now();
        if now > signed.expires {
            return Err(ResolveError::ResponseExpired {
                expires: signed.expires,
                now,
            });
        }

        let hash = signing_hash(resolver, signed.expires, request, &signed.result);
        let recovered = recover_signer(&hash, &signed.signature).map_err(|e| {
            ResolveError::SignatureInvalid {
                expected: checksum_address(signer),
                recovered: e.to_string(),
            }
        })?;
        if recovered != *signer {
            return Err(ResolveError::SignatureInvalid {
                expected: checksum_address(signer),
                recovered: checksum_address(&recovered),
            });
        }
        Ok(signed.result)
    }
}

#[async_trait]
impl OffchainGateway for CcipClient {
    async fn fetch(&self, request: &GatewayRequest) -> Result<RecordValue, ResolveError> {
        let dns_name =
            dns_encode(&request.name).map_err(|e| ResolveError::InvalidName(e.to_string()))?;
        let call = RecordCall::for_field(&namehash(&request.name), &request.field);
        let calldata = ResolveRequest {
            dns_name,
            call: call.encode(),
        }
        .encode();

        let payload = self
            .call(&request.context.endpoint, &request.resolver, &calldata)
            .await?;
        let result = self.verify(&request.context.signer, &request.resolver, &calldata, &payload)?;
        debug!(name = %request.name, field = %request.field, "Verified gateway response");

        call.decode_result(&result)
            .map_err(|e| ResolveError::MalformedResponse(e.to_string()))
    }
}
