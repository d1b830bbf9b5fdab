mod fixtures;

use std::time::Duration;

use fixtures::{ChatMockServer, TEST_API_KEY};
use gbchat_llm_api::{ChatRequest, ChatResponse, ReqwestTransport, Transport, TransportError, TransportRequest};
use gbchat_types::Message;
use pretty_assertions::assert_eq;

fn request_for(endpoint: String, user: &str, timeout: Duration) -> TransportRequest {
    let messages = vec![Message::user(user)];
    let body = serde_json::to_string(&ChatRequest {
        model: "deepseek-chat",
        messages: &messages,
        temperature: 0.7,
        max_tokens: 2000,
    })
    .unwrap();

    TransportRequest {
        endpoint,
        api_key: TEST_API_KEY.to_string(),
        body,
        timeout,
    }
}

#[tokio::test]
async fn test_posts_json_with_bearer_auth() {
    let server = ChatMockServer::new().await;
    server.mock_success("Hello", "Hi there").await;

    let transport = ReqwestTransport::new().unwrap();
    let response = transport
        .send(request_for(server.endpoint(), "Hello", Duration::from_secs(5)))
        .await
        .unwrap();

    assert!(response.is_success());
    let parsed: ChatResponse = serde_json::from_str(&response.body).unwrap();
    assert_eq!(parsed.first_content(), Some("Hi there"));
}

#[tokio::test]
async fn test_non_200_status_is_returned_not_raised() {
    let server = ChatMockServer::new().await;
    server.mock_status(401, "invalid key").await;

    let transport = ReqwestTransport::new().unwrap();
    let response = transport
        .send(request_for(server.endpoint(), "Hello", Duration::from_secs(5)))
        .await
        .unwrap();

    assert_eq!(response.status, 401);
    assert_eq!(response.body, "invalid key");
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = ChatMockServer::new().await;
    server.mock_slow(Duration::from_secs(3)).await;

    let transport = ReqwestTransport::new().unwrap();
    let result = transport
        .send(request_for(server.endpoint(), "Hello", Duration::from_millis(200)))
        .await;

    match result {
        Err(TransportError::Timeout(limit)) => assert_eq!(limit, Duration::from_millis(200)),
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_host_is_a_transport_error() {
    let transport = ReqwestTransport::new().unwrap();
    let result = transport
        .send(request_for(
            "http://127.0.0.1:1/v1/chat/completions".to_string(),
            "Hello",
            Duration::from_secs(5),
        ))
        .await;

    assert!(result.is_err());
}
