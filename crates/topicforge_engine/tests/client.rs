use std::time::Duration;

use serde_json::{json, Value};
use topicforge_engine::{
    ClientSettings, CompletionClient, CompletionRequest, FailureKind, ReqwestCompletionClient,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS: &str = "/v1/chat/completions";

fn client_for(server: &MockServer) -> ReqwestCompletionClient {
    ReqwestCompletionClient::new(ClientSettings {
        endpoint: format!("{}{COMPLETIONS}", server.uri()),
        ..ClientSettings::default()
    })
}

fn request(prompt: &str, max_tokens: u32) -> CompletionRequest {
    CompletionRequest {
        model: "gpt-4o-mini".to_string(),
        prompt: prompt.to_string(),
        max_tokens,
        temperature: 0.7,
    }
}

#[tokio::test]
async fn sends_bearer_token_and_chat_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "gpt-4o-mini", "max_tokens": 500 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "1. History" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server)
        .complete("sk-test", &request("List subtopics", 500))
        .await
        .expect("completion ok");
    assert_eq!(text, "1. History");

    let received = server.received_requests().await.expect("recording enabled");
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["messages"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "List subtopics");
    let temperature = body["temperature"].as_f64().unwrap();
    assert!((temperature - 0.7).abs() < 1e-6);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete("sk-wrong", &request("x", 10))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(401));
}

#[tokio::test]
async fn unexpected_payload_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete("sk-test", &request("x", 10))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "choices": [{ "message": { "content": "late" } }] })),
        )
        .mount(&server)
        .await;

    let client = ReqwestCompletionClient::new(ClientSettings {
        endpoint: format!("{}{COMPLETIONS}", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    });

    let err = client.complete("sk-test", &request("x", 10)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn invalid_endpoint_fails_without_a_request() {
    let client = ReqwestCompletionClient::new(ClientSettings {
        endpoint: "not a url".to_string(),
        ..ClientSettings::default()
    });

    let err = client.complete("sk-test", &request("x", 10)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}
