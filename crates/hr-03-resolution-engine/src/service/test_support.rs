//! Shared fixtures for service tests.

use crate::domain::config::EngineConfig;
use crate::domain::errors::ResolveError;
use crate::domain::mode::QueryMode;
use crate::ports::outbound::{GatewayRequest, OffchainGateway};
use crate::service::directory::ResolverDirectory;
use crate::service::hybrid::HybridResolver;
use crate::service::universal::{Resolution, UniversalResolver};
use async_trait::async_trait;
use hr_01_name_tree::NameTree;
use hr_02_record_store::{
    FieldKey, GatewayContext, InMemoryRecordStore, RecordStore, RecordValue, StoreDirectory,
};
use parking_lot::{Mutex, RwLock};
use shared_types::{keccak256, namehash, Address, Hash};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const RAFFY: &str = "raffy-onchain";
pub const CHONK: &str = "chonk-onchain";
pub const TOR: Address = [0x70; 20];
pub const OWNER: Address = [0x01; 20];
pub const SIGNER: Address = [0x5A; 20];

/// Answers `"<name>:<field>"` for text fields.
#[derive(Default)]
pub struct MockGateway {
    calls: AtomicUsize,
    stalled: AtomicBool,
    failure: Mutex<Option<ResolveError>>,
    last: Mutex<Option<GatewayRequest>>,
}

impl MockGateway {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_with(&self, error: ResolveError) {
        *self.failure.lock() = Some(error);
    }

    pub fn stall(&self) {
        self.stalled.store(true, Ordering::SeqCst);
    }

    pub fn last_request(&self) -> Option<GatewayRequest> {
        self.last.lock().clone()
    }
}

#[async_trait]
impl OffchainGateway for MockGateway {
    async fn fetch(&self, request: &GatewayRequest) -> Result<RecordValue, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock() = Some(request.clone());
        if self.stalled.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }
        let tag = format!("{}:{}", request.name, request.field);
        Ok(match request.field {
            FieldKey::Text(_) | FieldKey::Name => RecordValue::Text(tag),
            FieldKey::Addr(_) | FieldKey::Contenthash => RecordValue::Bytes(tag.into_bytes()),
            FieldKey::Pubkey => RecordValue::Pubkey {
                x: keccak256(tag.as_bytes()),
                y: keccak256(request.name.as_bytes()),
            },
        })
    }
}

pub struct Fixture {
    pub registry: Arc<RwLock<NameTree>>,
    pub stores: Arc<StoreDirectory>,
    pub resolvers: Arc<ResolverDirectory>,
    pub gateway: Arc<MockGateway>,
    pub tor_store: Arc<InMemoryRecordStore>,
    pub tor: Arc<HybridResolver>,
    pub universal: UniversalResolver,
}

impl Fixture {
    pub fn new() -> Self {
        Self::build(EngineConfig::default(), true)
    }

    pub fn without_context() -> Self {
        Self::build(EngineConfig::default(), false)
    }

    pub fn with_depth(max_fallback_depth: usize) -> Self {
        Self::build(
            EngineConfig {
                max_fallback_depth,
                ..Default::default()
            },
            true,
        )
    }

    pub fn with_timeout_ms(gateway_timeout_ms: u64) -> Self {
        Self::build(
            EngineConfig {
                gateway_timeout_ms,
                ..Default::default()
            },
            true,
        )
    }

    fn build(config: EngineConfig, with_context: bool) -> Self {
        let registry = Arc::new(RwLock::new(NameTree::new()));
        let eth = registry.write().create_name("eth").unwrap();

        let tor_store = Arc::new(InMemoryRecordStore::new());
        if with_context {
            let context = GatewayContext::new(SIGNER, "https://gateway.example/");
            tor_store.set_context(&eth, Some(&context)).unwrap();
        }
        let stores = Arc::new(StoreDirectory::new());
        stores.insert(TOR, tor_store.clone());

        let gateway = Arc::new(MockGateway::default());
        let tor = Arc::new(HybridResolver::new(
            TOR,
            tor_store.clone(),
            stores.clone(),
            registry.clone(),
            gateway.clone(),
            config.clone(),
        )
        .unwrap());
        let resolvers = Arc::new(ResolverDirectory::new());
        resolvers.insert(tor.clone());
        let universal =
            UniversalResolver::new(registry.clone(), resolvers.clone(), config).unwrap();

        Self {
            registry,
            stores,
            resolvers,
            gateway,
            tor_store,
            tor,
            universal,
        }
    }

    /// Register `name` with the hybrid resolver.
    pub fn register(&self, name: &str) -> Hash {
        self.register_with(name, TOR)
    }

    pub fn register_with(&self, name: &str, resolver: Address) -> Hash {
        let mut tree = self.registry.write();
        let id = tree.create_name(name).unwrap();
        tree.register(&id, OWNER, Some(resolver)).unwrap();
        assert_eq!(id, namehash(name));
        id
    }

    pub async fn resolve(
        &self,
        name: &str,
        field: &FieldKey,
        mode: QueryMode,
    ) -> Result<Resolution, ResolveError> {
        self.universal.resolve(name, field, mode).await
    }

    pub async fn text(&self, name: &str, key: &str, mode: QueryMode) -> RecordValue {
        self.resolve(name, &FieldKey::text(key), mode)
            .await
            .unwrap()
            .value
    }
}
