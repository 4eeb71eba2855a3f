//! Live fixture: a gateway server on an ephemeral port, a verifying client
//! and a hybrid resolver bound to `eth`.

use hr_01_name_tree::NameTree;
use hr_02_record_store::{
    FieldKey, GatewayContext, InMemoryRecordStore, RecordStore, RecordValue, StoreDirectory,
};
use hr_03_resolution_engine::{
    EngineConfig, HybridResolver, QueryMode, Resolution, ResolveError,
    ResolverDirectory, UniversalResolver,
};
use hr_04_ccip_gateway::{
    CcipClient, CcipHandler, CcipHandlerBuilder, GatewayError, GatewayServer, GatewaySigner,
    StaticRecordProvider, TimeSource,
};
use parking_lot::RwLock;
use shared_types::{namehash, Address, Hash};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// The hybrid resolver instance every registered name points at.
pub const TOR: Address = [0x70; 20];
pub const OWNER: Address = [0x01; 20];

/// Clock pinned to one instant.
pub struct FixedClock(pub u64);

impl TimeSource for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

pub struct Harness {
    pub registry: Arc<RwLock<NameTree>>,
    pub stores: Arc<StoreDirectory>,
    pub resolvers: Arc<ResolverDirectory>,
    pub provider: Arc<StaticRecordProvider>,
    pub handler: Arc<CcipHandler>,
    pub client: CcipClient,
    pub tor_store: Arc<InMemoryRecordStore>,
    pub tor: Arc<HybridResolver>,
    pub universal: UniversalResolver,
    pub endpoint: String,
    server: JoinHandle<Result<(), GatewayError>>,
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.server.abort();
    }
}

type Configure = Box<dyn FnOnce(CcipHandlerBuilder) -> CcipHandlerBuilder + Send>;

/// Builds a [`Harness`] around a customised handler or client.
pub struct HarnessBuilder {
    provider: Arc<StaticRecordProvider>,
    signer: GatewaySigner,
    configure: Configure,
    client: CcipClient,
    config: EngineConfig,
}

impl Default for HarnessBuilder {
    fn default() -> Self {
        Self {
            provider: Arc::new(StaticRecordProvider::new(true)),
            signer: GatewaySigner::random(),
            configure: Box::new(|builder| builder),
            client: CcipClient::default(),
            config: EngineConfig::default(),
        }
    }
}

impl HarnessBuilder {
    pub fn provider(mut self, provider: StaticRecordProvider) -> Self {
        self.provider = Arc::new(provider);
        self
    }

    pub fn handler<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(CcipHandlerBuilder) -> CcipHandlerBuilder + Send + 'static,
    {
        self.configure = Box::new(configure);
        self
    }

    pub fn client(mut self, client: CcipClient) -> Self {
        self.client = client;
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn start(self) -> Harness {
        let handler = (self.configure)(CcipHandler::builder(self.signer, self.provider.clone()))
            .build();
        let handler = Arc::new(handler);

        let server = GatewayServer::bind(([127, 0, 0, 1], 0).into(), handler.clone())
            .await
            .expect("bind gateway");
        let endpoint = server.endpoint().expect("endpoint");
        let server = server.spawn();

        let registry = Arc::new(RwLock::new(NameTree::new()));
        let eth = registry.write().create_name("eth").expect("eth");

        let tor_store = Arc::new(InMemoryRecordStore::new());
        let context = GatewayContext::new(handler.signer_address(), endpoint.clone());
        tor_store.set_context(&eth, Some(&context)).expect("context");

        let stores = Arc::new(StoreDirectory::new());
        stores.insert(TOR, tor_store.clone());

        let tor = Arc::new(HybridResolver::new(
            TOR,
            tor_store.clone(),
            stores.clone(),
            registry.clone(),
            Arc::new(self.client.clone()),
            self.config.clone(),
        )
        .expect("engine config"));
        let resolvers = Arc::new(ResolverDirectory::new());
        resolvers.insert(tor.clone());
        let universal = UniversalResolver::new(registry.clone(), resolvers.clone(), self.config)
            .expect("engine config");

        Harness {
            registry,
            stores,
            resolvers,
            provider: self.provider,
            handler,
            client: self.client,
            tor_store,
            tor,
            universal,
            endpoint,
            server,
        }
    }
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::default()
    }

    pub async fn start() -> Self {
        Self::builder().start().await
    }

    /// Register `name` with the hybrid resolver.
    pub fn register(&self, name: &str) -> Hash {
        self.register_with(name, TOR)
    }

    pub fn register_with(&self, name: &str, resolver: Address) -> Hash {
        let mut tree = self.registry.write();
        let id = tree.create_name(name).expect("valid name");
        tree.register(&id, OWNER, Some(resolver)).expect("register");
        assert_eq!(id, namehash(name));
        id
    }

    /// Replace the gateway binding published at `name`.
    pub fn publish_context(&self, name: &str, signer: Address, endpoint: &str) {
        let node = namehash(name);
        let context = GatewayContext::new(signer, endpoint);
        self.tor_store
            .set_context(&node, Some(&context))
            .expect("context");
    }

    pub async fn resolve(
        &self,
        name: &str,
        field: &FieldKey,
        mode: QueryMode,
    ) -> Result<Resolution, ResolveError> {
        self.universal.resolve(name, field, mode).await
    }

    pub async fn text(&self, name: &str, key: &str) -> RecordValue {
        self.text_with(name, key, QueryMode::auto()).await
    }

    pub async fn text_with(&self, name: &str, key: &str, mode: QueryMode) -> RecordValue {
        self.resolve(name, &FieldKey::text(key), mode)
            .await
            .expect("resolution")
            .value
    }
}

pub fn text(value: &str) -> RecordValue {
    RecordValue::from(value)
}
