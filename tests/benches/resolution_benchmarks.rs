//! # Hybrid Resolver Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | shared-types | namehash of nested names |
//! | hr-04 signing | sign / recover a response digest |
//! | hr-04 server | answer a `resolve(bytes,bytes)` request in-process |
//! | hr-03 engine | precedence walk over local records and fallbacks |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hr_01_name_tree::NameTree;
use hr_02_record_store::{
    FallbackPointer, FieldKey, InMemoryRecordStore, RecordStore, StoreDirectory,
};
use hr_03_resolution_engine::{
    EngineConfig, HybridResolver, QueryMode, ResolverDirectory, UniversalResolver,
};
use hr_04_ccip_gateway::{
    recover_signer, signing_hash, CcipClient, CcipHandler, GatewaySigner, RecordCall,
    ResolveRequest, StaticRecordProvider,
};
use parking_lot::RwLock;
use shared_types::{dns_encode, namehash};
use std::sync::Arc;

const TOR: [u8; 20] = [0x70; 20];

// ============================================================================
// NAMING
// ============================================================================

fn bench_namehash(c: &mut Criterion) {
    let mut group = c.benchmark_group("namehash");
    for name in ["eth", "raffy.eth", "a.b.c.d.e.f.raffy.eth"] {
        group.bench_with_input(BenchmarkId::from_parameter(name), name, |b, name| {
            b.iter(|| namehash(black_box(name)))
        });
    }
    group.finish();
}

// ============================================================================
// SIGNING
// ============================================================================

fn bench_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("signing");
    let signer = GatewaySigner::random();
    let hash = signing_hash(&TOR, 1_800_000_000, b"request", b"result");
    let signature = signer.sign(&hash).unwrap();

    group.bench_function("sign", |b| b.iter(|| signer.sign(black_box(&hash))));
    group.bench_function("recover", |b| {
        b.iter(|| recover_signer(black_box(&hash), black_box(&signature)))
    });
    group.finish();
}

// ============================================================================
// GATEWAY
// ============================================================================

fn bench_gateway_handle(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let handler = CcipHandler::builder(
        GatewaySigner::random(),
        Arc::new(StaticRecordProvider::new(true)),
    )
    .build();
    let call = RecordCall::for_field(&namehash("raffy.eth"), &FieldKey::text("avatar"));
    let request = ResolveRequest {
        dns_name: dns_encode("raffy.eth").unwrap(),
        call: call.encode(),
    }
    .encode();
    let client = CcipClient::default();

    c.bench_function("gateway/handle_and_verify", |b| {
        b.to_async(&runtime).iter(|| async {
            let payload = handler.handle(&TOR, &request).await.unwrap();
            client
                .verify(&handler.signer_address(), &TOR, &request, &payload)
                .unwrap()
        })
    });
}

// ============================================================================
// ENGINE
// ============================================================================

fn bench_fallback_chain(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("engine/fallback_chain");

    for depth in [1usize, 4, 12] {
        let registry = Arc::new(RwLock::new(NameTree::new()));
        let store = Arc::new(InMemoryRecordStore::new());
        let stores = Arc::new(StoreDirectory::new());
        stores.insert(TOR, store.clone());

        let mut ids = Vec::with_capacity(depth + 1);
        for i in 0..=depth {
            let mut tree = registry.write();
            let id = tree.create_name(&format!("n{i}.eth")).unwrap();
            tree.register(&id, [1; 20], Some(TOR)).unwrap();
            ids.push(id);
        }
        for pair in ids.windows(2) {
            store
                .set_fallback(&pair[0], FallbackPointer::Node(pair[1]))
                .unwrap();
        }
        store.set_text(&ids[depth], "k", "deep").unwrap();

        // Never reached: the chain always ends in a local value.
        let gateway = Arc::new(CcipClient::default());
        let config = EngineConfig::default();
        let tor = Arc::new(HybridResolver::new(
            TOR,
            store,
            stores,
            registry.clone(),
            gateway,
            config.clone(),
        )
        .unwrap());
        let resolvers = Arc::new(ResolverDirectory::new());
        resolvers.insert(tor);
        let universal = UniversalResolver::new(registry, resolvers, config).unwrap();
        let field = FieldKey::text("k");

        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.to_async(&runtime).iter(|| async {
                universal
                    .resolve_node(&ids[0], &field, QueryMode::auto())
                    .await
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_namehash,
    bench_signing,
    bench_gateway_handle,
    bench_fallback_chain
);
criterion_main!(benches);
