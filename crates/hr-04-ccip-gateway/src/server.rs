//! # Gateway Server
//!
//! `CcipHandler` turns request calldata into a signed response; the axum
//! router exposes it over HTTP:
//!
//! | Route | Body |
//! |---|---|
//! | `POST /` | `{"sender","data"}` |
//! | `GET /{sender}/{data}.json` | EIP-3668 GET form |
//! | `GET /health` | liveness |
//!
//! The handler holds no per-request state; the signing key and function
//! table are fixed when it is built and shared read-only behind an `Arc`.

use crate::domain::abi::{self, split_selector, Token};
use crate::domain::calls::{RecordCall, ResolveRequest, RESOLVE_SELECTOR};
use crate::domain::envelope::{CcipErrorBody, CcipRequest, CcipResponse, SignedResponse};
use crate::domain::errors::GatewayError;
use crate::domain::signing::{signing_hash, GatewaySigner};
use crate::ports::{FunctionHandler, RecordProvider, RecordView, SystemTimeSource, TimeSource};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use shared_types::{checksum_address, dns_decode, from_hex, parse_address, to_hex, Address};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Default validity window of a signed response, in seconds.
pub const DEFAULT_TTL_SECS: u64 = 60;

pub struct CcipHandler {
    signer: GatewaySigner,
    provider: Arc<dyn RecordProvider>,
    functions: HashMap<[u8; 4], Arc<dyn FunctionHandler>>,
    ttl_secs: u64,
    resolver: Option<Address>,
    allowed: Option<HashSet<Address>>,
    clock: Arc<dyn TimeSource>,
}

pub struct CcipHandlerBuilder {
    handler: CcipHandler,
}

impl CcipHandlerBuilder {
    pub fn ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.handler.ttl_secs = ttl_secs;
        self
    }

    /// Sign for a fixed resolver instead of each request's sender.
    pub fn resolver(mut self, resolver: Option<Address>) -> Self {
        self.handler.resolver = resolver;
        self
    }

    /// Restrict which senders may obtain signatures.
    pub fn allowed_resolvers(mut self, allowed: Option<HashSet<Address>>) -> Self {
        self.handler.allowed = allowed;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.handler.clock = clock;
        self
    }

    /// Answer calldata with `selector` through `function`.
    pub fn function(mut self, selector: [u8; 4], function: Arc<dyn FunctionHandler>) -> Self {
        self.handler.functions.insert(selector, function);
        self
    }

    pub fn build(self) -> CcipHandler {
        self.handler
    }
}

impl CcipHandler {
    pub fn builder(signer: GatewaySigner, provider: Arc<dyn RecordProvider>) -> CcipHandlerBuilder {
        CcipHandlerBuilder {
            handler: Self {
                signer,
                provider,
                functions: HashMap::new(),
                ttl_secs: DEFAULT_TTL_SECS,
                resolver: None,
                allowed: None,
                clock: Arc::new(SystemTimeSource),
            },
        }
    }

    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    /// The `ccip.context` value that authorizes this gateway at `endpoint`.
    pub fn context(&self, endpoint: &str) -> String {
        format!("{} {endpoint}", checksum_address(&self.signer.address()))
    }

    /// Answer `request` on behalf of `sender`, returning the encoded
    /// [`SignedResponse`].
    pub async fn handle(&self, sender: &Address, request: &[u8]) -> Result<Vec<u8>, GatewayError> {
        if let Some(allowed) = &self.allowed {
            if !allowed.contains(sender) {
                return Err(GatewayError::ResolverNotAllowed(checksum_address(sender)));
            }
        }
        let result = self.answer(request).await?;

        let resolver = self.resolver.unwrap_or(*sender);
        let expires = self.clock.now().saturating_add(self.ttl_secs);
        let hash = signing_hash(&resolver, expires, request, &result);
        let signature = self.signer.sign(&hash)?;

        Ok(SignedResponse {
            result,
            expires,
            signature: signature.to_vec(),
        }
        .encode())
    }

    async fn answer(&self, request: &[u8]) -> Result<Vec<u8>, GatewayError> {
        let (selector, args) = split_selector(request)?;
        if selector == RESOLVE_SELECTOR {
            let resolve = ResolveRequest::decode_args(args)?;
            let name = dns_decode(&resolve.dns_name)
                .map_err(|e| GatewayError::InvalidRequest(format!("name: {e}")))?;
            let call = RecordCall::decode(&resolve.call)?;
            let record = self.provider.record(&name).await?;
            debug!(%name, ?call, found = record.is_some(), "Resolving off-chain");
            return answer_call(record.as_deref(), &call);
        }
        match self.functions.get(&selector) {
            Some(function) => function.call(args).await,
            None => Err(GatewayError::UnsupportedSelector(to_hex(&selector))),
        }
    }
}

fn answer_call(record: Option<&dyn RecordView>, call: &RecordCall) -> Result<Vec<u8>, GatewayError> {
    match call {
        RecordCall::Multicall(calls) => {
            let results = calls
                .iter()
                .map(|data| match RecordCall::decode(data)? {
                    RecordCall::Multicall(_) => {
                        Err(GatewayError::InvalidRequest("nested multicall".into()))
                    }
                    inner => answer_call(record, &inner),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(abi::encode(&[Token::BytesArray(results)]))
        }
        single => {
            let field = single
                .field()
                .ok_or_else(|| GatewayError::InvalidRequest("call has no record field".into()))?;
            let value = record
                .and_then(|r| r.get(&field))
                .unwrap_or_else(|| field.empty_value());
            Ok(single.encode_result(&value))
        }
    }
}

// =============================================================================
// HTTP
// =============================================================================

/// Router serving `handler`.
pub fn router(handler: Arc<CcipHandler>) -> Router {
    Router::new()
        .route("/", post(handle_post))
        .route("/health", get(health_check))
        .route("/:sender/:data", get(handle_get))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(handler)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn handle_post(State(handler): State<Arc<CcipHandler>>, body: String) -> Response {
    match serde_json::from_str::<CcipRequest>(&body) {
        Ok(request) => process(&handler, &request.sender, &request.data).await,
        Err(e) => error_response(GatewayError::InvalidRequest(format!("body: {e}"))),
    }
}

async fn handle_get(
    State(handler): State<Arc<CcipHandler>>,
    Path((sender, data)): Path<(String, String)>,
) -> Response {
    let data = data.strip_suffix(".json").unwrap_or(&data);
    process(&handler, &sender, data).await
}

async fn process(handler: &CcipHandler, sender: &str, data: &str) -> Response {
    let parsed = parse_address(sender)
        .map_err(|e| GatewayError::InvalidRequest(format!("sender: {e}")))
        .and_then(|sender| {
            from_hex(data)
                .map(|data| (sender, data))
                .map_err(|e| GatewayError::InvalidRequest(format!("data: {e}")))
        });
    let (sender, data) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => return error_response(e),
    };

    match handler.handle(&sender, &data).await {
        Ok(response) => (
            StatusCode::OK,
            Json(CcipResponse {
                data: to_hex(&response),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(error: GatewayError) -> Response {
    let status = error.status_code();
    if status.is_server_error() {
        warn!(error = %error, "Request failed");
    } else {
        debug!(error = %error, "Request rejected");
    }
    (
        status,
        Json(CcipErrorBody {
            message: error.to_string(),
        }),
    )
        .into_response()
}

// =============================================================================
// Listener
// =============================================================================

/// A bound gateway, ready to serve.
pub struct GatewayServer {
    listener: TcpListener,
    handler: Arc<CcipHandler>,
}

impl GatewayServer {
    pub async fn bind(addr: SocketAddr, handler: Arc<CcipHandler>) -> Result<Self, GatewayError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Server(format!("bind {addr}: {e}")))?;
        Ok(Self { listener, handler })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, GatewayError> {
        self.listener
            .local_addr()
            .map_err(|e| GatewayError::Server(e.to_string()))
    }

    /// Base URL clients should publish in `ccip.context`.
    pub fn endpoint(&self) -> Result<String, GatewayError> {
        Ok(format!("http://{}/", self.local_addr()?))
    }

    pub async fn run(self) -> Result<(), GatewayError> {
        let addr = self.local_addr()?;
        info!(
            %addr,
            signer = %checksum_address(&self.handler.signer_address()),
            "CCIP gateway listening"
        );
        axum::serve(self.listener, router(self.handler))
            .await
            .map_err(|e| GatewayError::Server(e.to_string()))
    }

    pub fn spawn(self) -> JoinHandle<Result<(), GatewayError>> {
        tokio::spawn(self.run())
    }
}
