use groq_ask::{
    ChatProvider, CompletionRequester, Config, GroqClient, GroqConfig, LlmError, Provider,
};
use serde_json::{Value, json};
use std::env::VarError;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

fn client_for(server: &MockServer, api_key: &str) -> GroqClient {
    let config = GroqConfig::new(api_key.to_string())
        .with_base_url(format!("{}/openai/v1", server.uri()));
    GroqClient::new(config).expect("client should build")
}

fn groq_key(value: &'static str) -> impl Fn(&str) -> Result<String, VarError> {
    move |name: &str| {
        (name == "GROQ_API_KEY")
            .then(|| value.to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-abc",
        "object": "chat.completion",
        "created": 1730000000,
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 16, "completion_tokens": 9, "total_tokens": 25 },
        "system_fingerprint": "fp_test"
    })
}

#[test]
fn client_builds_from_environment_credential() {
    let config = Config::from_lookup(Provider::Groq, groq_key("abc123"))
        .expect("credential should resolve");

    let client = GroqClient::from_config(&config).expect("client should build");
    assert_eq!(client.config().api_key, "abc123");
}

#[test]
fn missing_credential_fails_before_client_exists() {
    let err = Config::from_lookup(Provider::Groq, |_| Err(VarError::NotPresent)).unwrap_err();

    assert!(err.is_configuration());
    assert!(matches!(err, LlmError::MissingCredential { .. }));
}

#[tokio::test]
async fn sends_fixed_request_and_prints_first_choice() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer abc123"))
        .and(body_partial_json(json!({
            "model": "llama-3.3-70b-versatile",
            "stream": false,
            "temperature": 1.5
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("Yes, morality is prudential because...")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "abc123");
    let mut out: Vec<u8> = Vec::new();
    CompletionRequester::new()
        .run(&client, &mut out)
        .await
        .expect("run should succeed");

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Yes, morality is prudential because...\n"
    );
}

#[tokio::test]
async fn request_body_matches_chat_completions_contract() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .mount(&server)
        .await;

    let client = client_for(&server, "abc123");
    let requester = CompletionRequester::new();
    client
        .chat_completion(&requester.request())
        .await
        .expect("completion");

    let requests = server
        .received_requests()
        .await
        .expect("mock server should record requests");
    assert_eq!(requests.len(), 1);

    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body,
        json!({
            "model": "llama-3.3-70b-versatile",
            "messages": [{ "role": "user", "content": "is origin of morality prudential?" }],
            "stream": false,
            "temperature": 1.5
        })
    );
}

#[tokio::test]
async fn zero_choices_yield_empty_response_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-empty",
            "model": "llama-3.3-70b-versatile",
            "choices": []
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, "abc123");
    let mut out: Vec<u8> = Vec::new();
    let err = CompletionRequester::new()
        .run(&client, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::EmptyResponse));
    assert!(out.is_empty());
}

#[tokio::test]
async fn unauthorized_is_reported_as_authentication_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Invalid API Key",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, "wrong");
    let err = CompletionRequester::new()
        .complete(&client)
        .await
        .unwrap_err();

    match err {
        LlmError::Authentication {
            message,
            status_code,
        } => {
            assert_eq!(status_code, 401);
            assert_eq!(message, "Invalid API Key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("over capacity"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "abc123");
    let err = CompletionRequester::new()
        .complete(&client)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    assert!(matches!(err, LlmError::Api { .. }));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, "abc123");
    let err = CompletionRequester::new()
        .complete(&client)
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Parse { .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error_with_no_output() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = GroqClient::new(GroqConfig::new("abc123".to_string()).with_base_url(uri))
        .expect("client should build");
    let mut out: Vec<u8> = Vec::new();
    let err = CompletionRequester::new()
        .run(&client, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Network { .. }));
    assert!(out.is_empty());
}

#[tokio::test]
async fn environment_to_output_chain_against_mock_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer abc123"))
        .and(header(
            "user-agent",
            concat!("groq-ask/", env!("CARGO_PKG_VERSION")),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Perhaps.")))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = format!("{}/openai/v1", server.uri());
    let mut out: Vec<u8> = Vec::new();
    CompletionRequester::new()
        .run_with(
            groq_key("abc123"),
            |config| GroqClient::new(GroqConfig::try_from(config)?.with_base_url(base_url)),
            &mut out,
        )
        .await
        .expect("run should succeed");

    assert_eq!(String::from_utf8(out).unwrap(), "Perhaps.\n");
}

#[tokio::test]
async fn absent_credential_never_contacts_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("unreachable")))
        .expect(0)
        .mount(&server)
        .await;

    let base_url = format!("{}/openai/v1", server.uri());
    let mut out: Vec<u8> = Vec::new();
    let err = CompletionRequester::new()
        .run_with(
            |_| Err(VarError::NotPresent),
            |config| GroqClient::new(GroqConfig::try_from(config)?.with_base_url(base_url)),
            &mut out,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::MissingCredential { .. }));
    assert!(out.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}
