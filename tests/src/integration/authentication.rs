//! Response authentication: committed signer, expiry, resolver binding and
//! the gateway's allow-list.

#[cfg(test)]
mod tests {
    use crate::integration::harness::{text, FixedClock, Harness, TOR};
    use hr_02_record_store::FieldKey;
    use hr_03_resolution_engine::{EngineConfig, QueryMode, ResolveError};
    use hr_04_ccip_gateway::{CcipClient, GatewaySigner};
    use shared_types::checksum_address;
    use std::collections::HashSet;
    use std::sync::Arc;

    async fn resolve_err(h: &Harness, name: &str) -> ResolveError {
        h.resolve(name, &FieldKey::text("name"), QueryMode::auto())
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn test_foreign_signer_rejected() {
        let h = Harness::start().await;
        h.register("raffy.eth");
        let committed = GatewaySigner::random().address();
        h.publish_context("eth", committed, &h.endpoint);

        match resolve_err(&h, "raffy.eth").await {
            ResolveError::SignatureInvalid { expected, recovered } => {
                assert_eq!(expected, checksum_address(&committed));
                assert_eq!(recovered, checksum_address(&h.handler.signer_address()));
            }
            other => panic!("expected SignatureInvalid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_context_nearer_the_name_wins() {
        let h = Harness::start().await;
        h.register("raffy.eth");
        h.publish_context("eth", GatewaySigner::random().address(), &h.endpoint);
        h.publish_context("raffy.eth", h.handler.signer_address(), &h.endpoint);

        assert_eq!(h.text("raffy.eth", "name").await, text("raffy.eth:text:name"));
        assert_eq!(h.text("a.raffy.eth", "name").await, text("a.raffy.eth:text:name"));

        h.register("chonk.eth");
        assert!(matches!(
            resolve_err(&h, "chonk.eth").await,
            ResolveError::SignatureInvalid { .. }
        ));
    }

    #[tokio::test]
    async fn test_expired_response_rejected() {
        let h = Harness::builder()
            .handler(|builder| builder.clock(Arc::new(FixedClock(1_000))).ttl_secs(5))
            .start()
            .await;
        h.register("raffy.eth");

        match resolve_err(&h, "raffy.eth").await {
            ResolveError::ResponseExpired { expires, now } => {
                assert_eq!(expires, 1_005);
                assert!(now > expires);
            }
            other => panic!("expected ResponseExpired, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_response_valid_until_expiry() {
        let h = Harness::builder()
            .handler(|builder| builder.clock(Arc::new(FixedClock(1_000))).ttl_secs(5))
            .client(CcipClient::default().with_clock(Arc::new(FixedClock(1_005))))
            .start()
            .await;
        h.register("raffy.eth");

        assert_eq!(h.text("raffy.eth", "name").await, text("raffy.eth:text:name"));
    }

    #[tokio::test]
    async fn test_signature_bound_to_other_resolver_rejected() {
        let h = Harness::builder()
            .handler(|builder| builder.resolver(Some([0x99; 20])))
            .start()
            .await;
        h.register("raffy.eth");

        assert!(resolve_err(&h, "raffy.eth").await.is_authentication_failure());
    }

    #[tokio::test]
    async fn test_fixed_resolver_matching_sender_accepted() {
        let h = Harness::builder()
            .handler(|builder| builder.resolver(Some(TOR)))
            .start()
            .await;
        h.register("raffy.eth");

        assert_eq!(h.text("raffy.eth", "name").await, text("raffy.eth:text:name"));
    }

    #[tokio::test]
    async fn test_allow_list_rejects_unknown_sender() {
        let h = Harness::builder()
            .handler(|builder| {
                builder.allowed_resolvers(Some(HashSet::from([[0x99; 20]])))
            })
            .start()
            .await;
        h.register("raffy.eth");

        match resolve_err(&h, "raffy.eth").await {
            ResolveError::GatewayRejected { status, .. } => assert_eq!(status, 403),
            other => panic!("expected GatewayRejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_allow_list_admits_listed_sender() {
        let h = Harness::builder()
            .handler(|builder| builder.allowed_resolvers(Some(HashSet::from([TOR]))))
            .start()
            .await;
        h.register("raffy.eth");

        assert_eq!(h.text("raffy.eth", "name").await, text("raffy.eth:text:name"));
    }

    #[tokio::test]
    async fn test_dead_endpoint_is_unreachable() {
        let h = Harness::start().await;
        h.register("raffy.eth");
        h.publish_context("eth", h.handler.signer_address(), "http://127.0.0.1:9/");

        let err = resolve_err(&h, "raffy.eth").await;
        assert!(matches!(err, ResolveError::GatewayUnreachable(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_gateway_timeout_is_unreachable() {
        let h = Harness::builder()
            .config(EngineConfig {
                gateway_timeout_ms: 1,
                ..Default::default()
            })
            .start()
            .await;
        h.register("raffy.eth");
        // Accepts connections but never answers.
        let silent = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/", silent.local_addr().unwrap());
        h.publish_context("eth", h.handler.signer_address(), &endpoint);

        assert!(matches!(
            resolve_err(&h, "raffy.eth").await,
            ResolveError::GatewayUnreachable(_)
        ));
    }
}
