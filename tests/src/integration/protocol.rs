//! The HTTP surface of the gateway: request forms, batching, custom
//! functions, discovery bootstrap and error bodies.

#[cfg(test)]
mod tests {
    use crate::integration::harness::{text, Harness, TOR};
    use hr_02_record_store::{FieldKey, GatewayContext, RecordStore, RecordValue};
    use hr_03_resolution_engine::ResolveError;
    use hr_04_ccip_gateway::domain::abi::{self, Decoder, Token};
    use hr_04_ccip_gateway::ports::FnHandler;
    use hr_04_ccip_gateway::{
        txt_rrset, CcipErrorBody, CcipResponse, Ens1Record, GatewayError, RecordCall,
        ResolveRequest,
    };
    use shared_types::{dns_encode, keccak256, namehash, to_hex, U256};
    use std::sync::Arc;

    fn selector(signature: &str) -> [u8; 4] {
        let hash = keccak256(signature.as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    fn resolve_request(name: &str, call: &RecordCall) -> Vec<u8> {
        ResolveRequest {
            dns_name: dns_encode(name).unwrap(),
            call: call.encode(),
        }
        .encode()
    }

    // =========================================================================
    // REQUEST FORMS
    // =========================================================================

    #[tokio::test]
    async fn test_health() {
        let h = Harness::start().await;
        let response = reqwest::get(format!("{}health", h.endpoint)).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.unwrap(), "OK");
    }

    #[tokio::test]
    async fn test_get_template_endpoint() {
        let h = Harness::start().await;
        h.register("raffy.eth");
        let template = format!("{}{{sender}}/{{data}}.json", h.endpoint);
        h.publish_context("eth", h.handler.signer_address(), &template);

        assert_eq!(h.text("raffy.eth", "name").await, text("raffy.eth:text:name"));
    }

    #[tokio::test]
    async fn test_raw_post_round_trip() {
        let h = Harness::start().await;
        let call = RecordCall::for_field(&namehash("raw.eth"), &FieldKey::text("k"));
        let request = resolve_request("raw.eth", &call);

        let response = reqwest::Client::new()
            .post(&h.endpoint)
            .json(&serde_json::json!({ "sender": to_hex(&TOR), "data": to_hex(&request) }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: CcipResponse = response.json().await.unwrap();
        let payload = shared_types::from_hex(&body.data).unwrap();

        let result = h
            .client
            .verify(&h.handler.signer_address(), &TOR, &request, &payload)
            .unwrap();
        assert_eq!(
            call.decode_result(&result).unwrap(),
            RecordValue::from("raw.eth:text:k")
        );
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_400() {
        let h = Harness::start().await;
        let http = reqwest::Client::new();

        for body in [
            "not json".to_string(),
            serde_json::json!({ "sender": "0x1234", "data": "0x" }).to_string(),
            serde_json::json!({ "sender": to_hex(&TOR), "data": "0xzz" }).to_string(),
            serde_json::json!({ "sender": to_hex(&TOR), "data": "0x9061b923" }).to_string(),
        ] {
            let response = http.post(&h.endpoint).body(body).send().await.unwrap();
            assert_eq!(response.status(), 400);
            let error: CcipErrorBody = response.json().await.unwrap();
            assert!(!error.message.is_empty());
        }
    }

    #[tokio::test]
    async fn test_unsupported_selector_surfaces() {
        let h = Harness::start().await;
        let err = h
            .client
            .call(&h.endpoint, &TOR, &[0xde, 0xad, 0xbe, 0xef])
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedSelector(_)));

        let inner = abi::encode_call(selector("interfaceImplementer(bytes32,bytes4)"), &[]);
        let request = ResolveRequest {
            dns_name: dns_encode("raffy.eth").unwrap(),
            call: inner,
        }
        .encode();
        let err = h.client.call(&h.endpoint, &TOR, &request).await.unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedSelector(_)));
    }

    // =========================================================================
    // BATCHING AND CUSTOM FUNCTIONS
    // =========================================================================

    #[tokio::test]
    async fn test_multicall_batch() {
        let h = Harness::start().await;
        let node = namehash("batch.eth");
        let calls = vec![
            RecordCall::for_field(&node, &FieldKey::text("a")),
            RecordCall::for_field(&node, &FieldKey::text("b")),
            RecordCall::for_field(&node, &FieldKey::Contenthash),
        ];
        let multicall = RecordCall::Multicall(calls.iter().map(RecordCall::encode).collect());
        let request = resolve_request("batch.eth", &multicall);

        let payload = h.client.call(&h.endpoint, &TOR, &request).await.unwrap();
        let result = h
            .client
            .verify(&h.handler.signer_address(), &TOR, &request, &payload)
            .unwrap();
        let answers = Decoder::new(&result).bytes_array(0).unwrap();

        assert_eq!(answers.len(), 3);
        assert_eq!(
            calls[0].decode_result(&answers[0]).unwrap(),
            RecordValue::from("batch.eth:text:a")
        );
        assert_eq!(
            calls[1].decode_result(&answers[1]).unwrap(),
            RecordValue::from("batch.eth:text:b")
        );
        assert!(!calls[2].decode_result(&answers[2]).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_custom_function_tunnel() {
        let f = selector("f(uint256,uint256)");
        let h = Harness::builder()
            .handler(move |builder| {
                builder.function(
                    f,
                    Arc::new(FnHandler(|args: &[u8]| -> Result<Vec<u8>, GatewayError> {
                        let decoder = Decoder::new(args);
                        let a = decoder.uint(0)?;
                        let b = decoder.uint(1)?;
                        Ok(abi::encode(&[Token::Uint(a * U256::from(1000u64) + b)]))
                    })),
                )
            })
            .start()
            .await;

        let request = abi::encode_call(
            f,
            &[Token::Uint(U256::from(69u64)), Token::Uint(U256::from(420u64))],
        );
        let payload = h.client.call(&h.endpoint, &TOR, &request).await.unwrap();
        let result = h
            .client
            .verify(&h.handler.signer_address(), &TOR, &request, &payload)
            .unwrap();

        assert_eq!(
            Decoder::new(&result).uint(0).unwrap(),
            U256::from(69_420u64)
        );
    }

    // =========================================================================
    // DISCOVERY
    // =========================================================================

    #[tokio::test]
    async fn test_ens1_txt_bootstraps_context() {
        let h = Harness::start().await;
        let node = h.register("raffy.eth");

        let published = Ens1Record {
            resolver: TOR,
            context: h.handler.context(&h.endpoint),
        }
        .to_string();
        let rrset = txt_rrset(&dns_encode("raffy.eth").unwrap(), &published, 300).unwrap();
        assert!(rrset.ends_with(published.as_bytes()));

        let record: Ens1Record = published.parse().unwrap();
        assert_eq!(record.resolver, TOR);
        let context: GatewayContext = record.context.parse().unwrap();
        h.tor_store.set_context(&node, Some(&context)).unwrap();
        h.publish_context("eth", [0x42; 20], &h.endpoint);

        assert_eq!(h.text("raffy.eth", "name").await, text("raffy.eth:text:name"));
    }
}
