//! # Integration Test Flows
//!
//! Drives `SignatureProviderService` against a simulated provider across a
//! `ChannelTransport`, so every request and response crosses the wire in its
//! packed (hex) form.
//!
//! ## Flows Tested:
//!
//! 1. **Selective disclosure**: keys are disclosed, cached, served from cache
//! 2. **Transaction signature**: the serialized transaction survives the trip
//! 3. **Provider errors**: passed through with their code
//! 4. **Single flight**: a new request rejects an unanswered one; late
//!    answers are dropped
//! 5. **Life cycle**: cancel, clean up, independent engines

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    use crate::integration::provider::{Behavior, SimulatedProvider};
    use provider_telemetry::{init_tracing, TelemetryConfig};
    use shared_types::{ErrorCode, ErrorResponse, SecurityExclusions};
    use signature_provider::domain::error::reasons;
    use signature_provider::{
        BinaryAbi, ChannelTransport, CorrelationId, InMemoryKeyCache, ProviderConfig, SignParams,
        SignatureProviderApi, SignatureProviderService,
    };

    type Service = SignatureProviderService<ChannelTransport, InMemoryKeyCache>;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn config() -> ProviderConfig {
        ProviderConfig::new("app.example.com", "https://app.example.com/return")
            .with_callback_url("https://app.example.com/callback")
            .with_security_exclusions(SecurityExclusions {
                domain_match: Some(true),
                ..Default::default()
            })
    }

    /// A service wired to a running simulated provider.
    fn setup() -> (
        Arc<Service>,
        Arc<SimulatedProvider>,
        tokio::sync::mpsc::UnboundedReceiver<String>,
        tokio::task::JoinHandle<usize>,
    ) {
        let (transport, requests) = ChannelTransport::new();
        let (provider, seen) =
            SimulatedProvider::new(&["PUB_K1_first", "PUB_K1_second"], "SIG_K1_sig");
        let handle = provider.spawn(requests);
        let service = SignatureProviderService::new(config(), transport, InMemoryKeyCache::new())
            .expect("valid config");
        (Arc::new(service), provider, seen, handle)
    }

    fn sign_params() -> SignParams {
        SignParams {
            chain_id: "chain-1".into(),
            required_keys: vec!["PUB_K1_first".into()],
            serialized_transaction: vec![0xde, 0xad, 0xbe, 0xef, 0x00, 0x01],
            abis: vec![BinaryAbi {
                account_name: "eosio.token".into(),
                abi: vec![0x0e, 0x65],
            }],
        }
    }

    async fn next_seen(seen: &mut tokio::sync::mpsc::UnboundedReceiver<String>) -> String {
        timeout(Duration::from_secs(1), seen.recv())
            .await
            .expect("timeout waiting for provider")
            .expect("provider stopped")
    }

    // =============================================================================
    // INTEGRATION TESTS: SELECTIVE DISCLOSURE
    // =============================================================================

    /// Keys are disclosed once, then served from the cache
    #[tokio::test]
    async fn test_keys_disclosed_then_cached() {
        let (service, provider, _seen, _handle) = setup();

        let keys = service.get_available_keys().await.unwrap();
        assert_eq!(keys, vec!["PUB_K1_first", "PUB_K1_second"]);

        let again = service.get_available_keys().await.unwrap();
        assert_eq!(again, keys);
        assert_eq!(provider.received().len(), 1, "second call must hit the cache");

        let received = provider.received();
        let request = &received[0];
        assert_eq!(request["version"], "0.0.1");
        assert_eq!(request["declaredDomain"], "app.example.com");
        assert_eq!(request["returnUrl"], "https://app.example.com/return");
        assert_eq!(request["callbackUrl"], "https://app.example.com/callback");
        assert_eq!(request["securityExclusions"]["domainMatch"], true);
        assert_eq!(
            request["request"]["selectiveDisclosure"]["disclosures"][0]["type"],
            "authorizers"
        );
        assert!(CorrelationId::parse(request["id"].as_str().unwrap()).is_ok());
    }

    /// Clearing the cache sends the next call back to the provider
    #[tokio::test]
    async fn test_clear_cached_keys_forces_new_disclosure() {
        let (service, provider, _seen, _handle) = setup();

        service.get_available_keys().await.unwrap();
        service.clear_cached_keys();
        service.get_available_keys().await.unwrap();

        let received = provider.received();
        assert_eq!(received.len(), 2);
        assert_ne!(received[0]["id"], received[1]["id"], "every request gets a fresh id");
    }

    // =============================================================================
    // INTEGRATION TESTS: TRANSACTION SIGNATURE
    // =============================================================================

    /// The serialized transaction crosses the wire as hex and comes back intact
    #[tokio::test]
    async fn test_sign_round_trip() {
        let (service, provider, _seen, _handle) = setup();

        let args = service.sign(sign_params()).await.unwrap();
        assert_eq!(args.signatures, vec!["SIG_K1_sig"]);
        assert_eq!(args.serialized_transaction, sign_params().serialized_transaction);

        let received = provider.received();
        let request = &received[0]["request"]["transactionSignature"];
        assert_eq!(request["chainId"], "chain-1");
        assert_eq!(request["publicKeys"][0], "PUB_K1_first");
        assert_eq!(request["abis"][0]["accountName"], "eosio.token");
        assert_eq!(request["abis"][0]["abi"], "0e65");
        assert_eq!(request["transaction"]["packedTrx"], "deadbeef0001");
        assert_eq!(request["transaction"]["signatures"], serde_json::json!([]));
    }

    /// A provider error is surfaced as-is
    #[tokio::test]
    async fn test_provider_error_passes_through() {
        let (service, provider, _seen, _handle) = setup();
        let declined = ErrorResponse::new(ErrorCode::SigningError, "User declined")
            .with_context("eosio.token::transfer");
        provider.set_behavior(Behavior::Decline(declined.clone()));

        assert_eq!(service.sign(sign_params()).await.unwrap_err(), declined);

        let error = service.get_available_keys().await.unwrap_err();
        assert_eq!(error, declined);
        assert!(!service.is_pending());
    }

    /// A response that is not a packed envelope rejects with a parsing error
    #[tokio::test]
    async fn test_garbage_response_is_parsing_error() {
        let (service, provider, _seen, _handle) = setup();
        provider.set_behavior(Behavior::Garbage);

        let error = service.get_available_keys().await.unwrap_err();
        assert_eq!(error.error_code, ErrorCode::ParsingError);
    }

    // =============================================================================
    // INTEGRATION TESTS: SINGLE FLIGHT
    // =============================================================================

    /// A second request rejects the unanswered first; the late answer is dropped
    #[tokio::test]
    async fn test_new_request_supersedes_unanswered_request() {
        let (service, provider, mut seen, _handle) = setup();
        provider.set_behavior(Behavior::Ignore);

        let first = tokio::spawn({
            let service = service.clone();
            async move { service.get_available_keys().await }
        });
        next_seen(&mut seen).await;
        assert!(service.is_pending());

        provider.set_behavior(Behavior::Approve);
        let signed = service.sign(sign_params()).await.unwrap();
        assert_eq!(signed.signatures, vec!["SIG_K1_sig"]);

        let error = first.await.unwrap().unwrap_err();
        assert_eq!(error.error_code, ErrorCode::UnexpectedError);
        assert_eq!(error.reason, reasons::NEW_REQUEST);

        // The held request is answered after the fact: nothing is pending.
        let held = provider.take_held();
        assert_eq!(held.len(), 1);
        assert!(!held[0].respond_packed(&signature_provider::domain::codec::pack_envelope(
            &serde_json::json!({
                "id": held[0].id,
                "response": { "selectiveDisclosure": { "authorizers": [] } },
            })
        )
        .unwrap()));

        let stats = service.stats();
        assert_eq!(stats.total_superseded.load(Ordering::Relaxed), 1);
        assert_eq!(stats.total_unmatched.load(Ordering::Relaxed), 1);
    }

    /// Cancelling rejects the in-flight request with the manual-cancel reason
    #[tokio::test]
    async fn test_cancel_unanswered_request() {
        let (service, provider, mut seen, _handle) = setup();
        provider.set_behavior(Behavior::Ignore);

        let pending = tokio::spawn({
            let service = service.clone();
            async move { service.sign(sign_params()).await }
        });
        let id = next_seen(&mut seen).await;
        assert_eq!(service.pending_id().map(|id| id.to_string()), Some(id));

        service.cancel_request();
        let error = pending.await.unwrap().unwrap_err();
        assert_eq!(error.reason, reasons::MANUAL_CANCEL);
        assert!(service.pending_id().is_none());
    }

    // =============================================================================
    // INTEGRATION TESTS: LIFE CYCLE
    // =============================================================================

    /// Cleaning up closes the transport and stops the provider
    #[tokio::test]
    async fn test_clean_up_closes_transport() {
        let (service, _provider, _seen, handle) = setup();
        service.get_available_keys().await.unwrap();

        service.clean_up();
        let served = timeout(Duration::from_secs(1), handle)
            .await
            .expect("provider did not stop")
            .unwrap();
        assert_eq!(served, 1);

        let error = service.sign(sign_params()).await.unwrap_err();
        assert_eq!(error.error_code, ErrorCode::NetworkError);
        assert!(!service.is_pending());
    }

    /// Two engines in one process keep separate pending state
    #[tokio::test]
    async fn test_independent_engines() {
        let (a, provider_a, mut seen_a, _ha) = setup();
        let (b, _provider_b, _seen_b, _hb) = setup();
        provider_a.set_behavior(Behavior::Ignore);

        let pending_a = tokio::spawn({
            let a = a.clone();
            async move { a.get_available_keys().await }
        });
        next_seen(&mut seen_a).await;

        assert!(b.get_available_keys().await.is_ok());
        assert!(a.is_pending(), "b's traffic must not touch a's slot");

        a.cancel_request();
        assert_eq!(pending_a.await.unwrap().unwrap_err().reason, reasons::MANUAL_CANCEL);
    }

    /// Flows run the same with a global subscriber installed
    #[tokio::test]
    async fn test_flow_with_tracing_installed() {
        let _ = init_tracing(&TelemetryConfig::default().with_log_level("signature_provider=debug"));

        let (service, _provider, _seen, _handle) = setup();
        assert_eq!(service.get_available_keys().await.unwrap().len(), 2);
    }
}
