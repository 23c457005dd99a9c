//! Chat screen against a mocked completion endpoint.

use std::sync::Arc;

use arixa_app::{
    App, AppError, AppStore, ChatError, InMemoryIdentityProvider, NavEvent, Role, Screen,
    SessionExistsPolicy, FALLBACK_REPLY,
};
use openai_coach::{OpenAiCoach, OpenAiCoachConfig};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn chat_app(config: OpenAiCoachConfig) -> App<InMemoryIdentityProvider, OpenAiCoach> {
    let mut app = App::new(
        Arc::new(InMemoryIdentityProvider::new()),
        Arc::new(OpenAiCoach::new(config).unwrap()),
        Arc::new(AppStore::new()),
        SessionExistsPolicy::default(),
    );
    app.start().await;
    app.jump_to(Screen::Dashboard);
    app.dispatch(NavEvent::OpenChat).unwrap();
    app
}

fn config_for(server: &MockServer) -> OpenAiCoachConfig {
    OpenAiCoachConfig::builder()
        .api_key("sk-test")
        .api_url(server.uri())
        .build()
}

#[tokio::test]
async fn test_reply_content_is_shown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "X"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = chat_app(config_for(&server)).await;
    let reply = app.send_chat("What should I eat after training?").await.unwrap();
    assert_eq!(reply.text, "X");

    let messages = app.chat().unwrap().visible_messages().await;
    let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, [Role::User, Role::Assistant]);
}

#[tokio::test]
async fn test_error_payload_becomes_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Y", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;

    let app = chat_app(config_for(&server)).await;
    let reply = app.send_chat("hello").await.unwrap();

    assert_eq!(reply.text, FALLBACK_REPLY);
    assert_ne!(reply.text, "Y");
}

#[tokio::test]
async fn test_network_failure_becomes_fallback() {
    // Nothing listens here once the server is dropped.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let config = OpenAiCoachConfig::builder()
        .api_key("sk-test")
        .api_url(uri)
        .build();

    let app = chat_app(config).await;
    let reply = app.send_chat("hello").await.unwrap();
    assert_eq!(reply.text, FALLBACK_REPLY);
}

#[tokio::test]
async fn test_missing_key_is_reported_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = OpenAiCoachConfig::builder().api_url(server.uri()).build();
    let app = chat_app(config).await;

    let err = app.send_chat("hello").await.unwrap_err();
    assert!(matches!(err, AppError::Chat(ChatError::Configuration(_))));
    assert!(err.user_message().contains("OPENAI_API_KEY"));
    assert!(app.chat().unwrap().messages().await.is_empty());
}
