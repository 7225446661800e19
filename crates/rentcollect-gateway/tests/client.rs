//! Integration tests for `EvolutionClient` using wiremock HTTP mocks.

use rentcollect_gateway::{EvolutionClient, GatewayError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> EvolutionClient {
    EvolutionClient::new(base_url, "test-key", "rentals", 5)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn send_text_posts_number_and_text_with_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/message/sendText/rentals"))
        .and(header("apikey", "test-key"))
        .and(body_json(json!({ "number": "5511111111111", "text": "olá" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "key": { "id": "1" } })))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri())
        .send_text("5511111111111", "olá")
        .await
        .expect("201 counts as delivered");
}

#[tokio::test]
async fn send_text_accepts_200() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/message/sendText/rentals"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(test_client(&server.uri())
        .send_text("5511111111111", "oi")
        .await
        .is_ok());
}

#[tokio::test]
async fn send_text_rejects_other_statuses() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/message/sendText/rentals"))
        .respond_with(ResponseTemplate::new(400).set_body_string("number not on whatsapp"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .send_text("5511111111111", "oi")
        .await
        .unwrap_err();
    match err {
        GatewayError::UnexpectedStatus {
            operation,
            status,
            body,
        } => {
            assert_eq!(operation, "sendText");
            assert_eq!(status, 400);
            assert!(body.contains("not on whatsapp"));
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn send_text_treats_202_as_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/message/sendText/rentals"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .send_text("5511111111111", "oi")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::UnexpectedStatus { status: 202, .. }));
}

#[tokio::test]
async fn send_media_posts_base64_image_and_caption() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/message/sendMedia/rentals"))
        .and(header("apikey", "test-key"))
        .and(body_json(json!({
            "number": "5511999999999",
            "mediatype": "image",
            "media": "aGVsbG8=",
            "caption": "comprovante"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri())
        .send_media("5511999999999", b"hello", "comprovante")
        .await
        .expect("media send should succeed");
}

#[tokio::test]
async fn fetch_media_returns_bytes_with_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/media/abc.jpg"))
        .and(header("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
        .expect(1)
        .mount(&server)
        .await;

    let bytes = test_client(&server.uri())
        .fetch_media(&format!("{}/media/abc.jpg", server.uri()))
        .await
        .expect("download should succeed");
    assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF]);
}

#[tokio::test]
async fn fetch_media_fails_on_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/media/gone.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_media(&format!("{}/media/gone.jpg", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GatewayError::UnexpectedStatus {
            operation: "fetchMedia",
            status: 404,
            ..
        }
    ));
}

#[tokio::test]
async fn fetch_media_rejects_unparsable_reference() {
    let client = test_client("http://localhost:1");
    let err = client.fetch_media("not a url").await.unwrap_err();
    assert!(matches!(err, GatewayError::InvalidUrl { .. }));
}
