//! Wire-level tests for the transport exchange against a mock server.

use annobatch::{
    AnalysisInput, Capability, Document, Error, Payload, TransportClient, SUBSCRIPTION_KEY_HEADER,
};
use bytes::Bytes;
use mockito::Matcher;
use serde_json::json;

fn client(base_url: &str) -> TransportClient {
    TransportClient::builder()
        .base_url(base_url)
        .subscription_key("test-key")
        .build()
        .expect("transport builds")
}

fn two_documents() -> AnalysisInput {
    AnalysisInput::from(vec![Document::new(1, "a"), Document::new(2, "b")])
}

#[tokio::test]
async fn sends_documents_envelope_with_subscription_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/text/analytics/v2.1/sentiment")
        .match_header(SUBSCRIPTION_KEY_HEADER, "test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "documents": [
                {"id": 1, "text": "a"},
                {"id": 2, "text": "b"}
            ]
        })))
        .with_status(200)
        .with_body(r#"{"documents": [{"id": 1, "score": 0.8}, {"id": 2, "score": 0.2}]}"#)
        .create_async()
        .await;

    let records = client(&server.url())
        .send(
            Capability::Sentiment,
            Payload::Documents(two_documents()),
            &[],
        )
        .await
        .expect("exchange succeeds");

    mock.assert_async().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["score"], json!(0.8));
}

#[tokio::test]
async fn renders_query_parameters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/text/analytics/v2.1/keyPhrases")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("model-version".into(), "latest".into()),
            Matcher::UrlEncoded("showStats".into(), "true".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"documents": []}"#)
        .create_async()
        .await;

    let params = vec![
        ("model-version".to_string(), "latest".to_string()),
        ("showStats".to_string(), "true".to_string()),
    ];
    client(&server.url())
        .send(
            Capability::KeyPhrases,
            Payload::Documents(two_documents()),
            &params,
        )
        .await
        .expect("exchange succeeds");

    mock.assert_async().await;
}

#[tokio::test]
async fn binary_payload_goes_out_verbatim_as_octet_stream() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/vision/v2.1/analyze")
        .match_header("content-type", "application/octet-stream")
        .match_header(SUBSCRIPTION_KEY_HEADER, "test-key")
        .match_body(Matcher::Exact("fake-image-bytes".to_string()))
        .with_status(200)
        .with_body(r#"{"documents": [{"id": 1, "tags": ["outdoor"]}]}"#)
        .create_async()
        .await;

    let records = client(&server.url())
        .send(
            Capability::Vision,
            Payload::Binary(Bytes::from_static(b"fake-image-bytes")),
            &[],
        )
        .await
        .expect("exchange succeeds");

    mock.assert_async().await;
    assert_eq!(records[0]["tags"], json!(["outdoor"]));
}

#[tokio::test]
async fn non_success_status_surfaces_as_service_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/text/analytics/v2.1/entities")
        .with_status(429)
        .with_body(r#"{"error": {"message": "rate limit exceeded"}}"#)
        .create_async()
        .await;

    let err = client(&server.url())
        .send(
            Capability::Entities,
            Payload::Documents(two_documents()),
            &[],
        )
        .await
        .unwrap_err();

    match err {
        Error::Service { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("rate limit"));
        }
        other => panic!("expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_documents_field_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/text/analytics/v2.1/sentiment")
        .with_status(200)
        .with_body(r#"{"results": []}"#)
        .create_async()
        .await;

    let err = client(&server.url())
        .send(
            Capability::Sentiment,
            Payload::Documents(two_documents()),
            &[],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/text/analytics/v2.1/sentiment")
        .with_status(200)
        .with_body("<html>gateway timeout</html>")
        .create_async()
        .await;

    let err = client(&server.url())
        .send(
            Capability::Sentiment,
            Payload::Documents(two_documents()),
            &[],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}
