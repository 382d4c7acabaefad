//! # Wire Format Tests
//!
//! Envelopes as a string transport sees them: built by the engine's request
//! layer, packed to hex, then decoded and classified on the other side.

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use shared_types::{
        EnvelopeDataType, ProviderResponse, ResponseEnvelope, SelectiveDisclosureType,
        SignatureProviderEnvelope, TransactionSignatureResponse,
    };
    use signature_provider::domain::classifier;
    use signature_provider::domain::requests;
    use signature_provider::{
        envelope_data_type, hex_decode, pack_envelope, unpack_envelope, CorrelationId,
        ProviderConfig,
    };

    fn packed_disclosure_request() -> (CorrelationId, String) {
        let id = CorrelationId::new();
        let envelope = requests::request_envelope(
            &ProviderConfig::new("example.com", "example.com"),
            id,
            requests::selective_disclosure_request(&[SelectiveDisclosureType::Authorizers]),
        );
        (id, pack_envelope(&envelope).unwrap())
    }

    #[test]
    fn test_packed_request_is_lowercase_hex_of_json_text() {
        let (id, packed) = packed_disclosure_request();

        assert!(packed.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        let text = hex_decode(&packed).unwrap();
        assert!(text.starts_with(r#"{"version":"0.0.1","#), "{text}");
        assert!(text.contains(&format!(r#""id":"{id}""#)));
        assert!(text.contains(r#""callbackUrl":"""#), "callbackUrl is always written");
        assert!(!text.contains("securityExclusions"), "absent exclusions are omitted");
    }

    #[test]
    fn test_packed_request_classifies_on_receiving_side() {
        let (_, packed) = packed_disclosure_request();
        let value: Value = unpack_envelope(&packed).unwrap();

        assert!(classifier::is_request_envelope(&value));
        assert!(!classifier::is_response_envelope(&value));
        assert!(classifier::is_selective_disclosure_request(&value["request"]));
        assert_eq!(envelope_data_type(&value), Some(EnvelopeDataType::SelectiveDisclosure));

        match unpack_envelope::<SignatureProviderEnvelope>(&packed).unwrap() {
            SignatureProviderEnvelope::Request(envelope) => {
                assert_eq!(envelope.request.data_type(), Some(EnvelopeDataType::SelectiveDisclosure));
            }
            other => panic!("Expected request envelope, got {other:?}"),
        }
    }

    #[test]
    fn test_packed_response_classifies_on_receiving_side() {
        let envelope = ResponseEnvelope {
            id: "requestId".into(),
            device_key: None,
            response: ProviderResponse::transaction_signature(TransactionSignatureResponse {
                signed_transaction: None,
                error: None,
            }),
        };
        let packed = pack_envelope(&envelope).unwrap();
        let value: Value = unpack_envelope(&packed).unwrap();

        assert!(classifier::is_response_envelope(&value));
        assert_eq!(envelope_data_type(&value), Some(EnvelopeDataType::TransactionSignature));
        assert_eq!(
            unpack_envelope::<SignatureProviderEnvelope>(&packed).unwrap(),
            SignatureProviderEnvelope::Response(envelope)
        );
    }

    #[test]
    fn test_known_packed_vector() {
        let packed = pack_envelope(&json!({ "id": "requestId", "response": {} })).unwrap();
        assert_eq!(
            packed,
            "7b226964223a22726571756573744964222c22726573706f6e7365223a7b7d7d"
        );

        let value: Value = unpack_envelope(&packed).unwrap();
        assert!(!classifier::is_response_envelope(&value), "empty response carries no variant");
        assert_eq!(envelope_data_type(&value), None);
    }
}
