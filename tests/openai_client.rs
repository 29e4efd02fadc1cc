use serde_json::json;
use wiremock::matchers::{ body_partial_json, header, method, path };
use wiremock::{ Mock, MockServer, ResponseTemplate };

use support_query::llm::chat::openai::OpenAIChatClient;
use support_query::llm::chat::{ ChatClient, CompletionRequest, LlmError };
use support_query::llm::ApiFlavor;
use support_query::models::{ ChatMessage, Role };

fn messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::new(Role::System, "Responde con JSON."),
        ChatMessage::new(Role::User, "¿Cómo puedo restablecer mi contraseña?"),
        ChatMessage::new(Role::Assistant, r#"{"answer":"Usa el enlace.","actions":[]}"#),
        ChatMessage::new(Role::User, "La app se cae al pagar.")
    ]
}

fn request(messages: &[ChatMessage]) -> CompletionRequest<'_> {
    CompletionRequest {
        model: "gpt-4.1-mini",
        messages,
        temperature: 0.2,
        max_output_tokens: 150,
    }
}

#[tokio::test]
async fn responses_flavor_sends_input_and_reads_usage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .and(header("authorization", "Bearer sk-test"))
        .and(
            body_partial_json(
                json!({
            "model": "gpt-4.1-mini",
            "temperature": 0.2,
            "max_output_tokens": 150,
            "input": [
                {"role": "system", "content": "Responde con JSON."},
                {"role": "user", "content": "¿Cómo puedo restablecer mi contraseña?"},
                {"role": "assistant", "content": "{\"answer\":\"Usa el enlace.\",\"actions\":[]}"},
                {"role": "user", "content": "La app se cae al pagar."}
            ]
        })
            )
        )
        .respond_with(
            ResponseTemplate::new(200).set_body_json(
                json!({
            "id": "resp_1",
            "output": [{
                "type": "message",
                "role": "assistant",
                "content": [{"type": "output_text", "text": "{\"answer\":\"Reinstala la app.\",\"actions\":[]}"}]
            }],
            "usage": {"input_tokens": 100, "output_tokens": 50, "total_tokens": 150}
        })
            )
        )
        .expect(1)
        .mount(&server).await;

    let client = OpenAIChatClient::new(
        "sk-test".to_string(),
        Some(server.uri()),
        ApiFlavor::Responses
    ).unwrap();
    let msgs = messages();
    let result = client.complete(&request(&msgs)).await.unwrap();

    assert_eq!(result.raw_text, "{\"answer\":\"Reinstala la app.\",\"actions\":[]}");
    assert_eq!(result.usage.prompt_tokens, 100);
    assert_eq!(result.usage.completion_tokens, 50);
    assert_eq!(result.usage.total_tokens, 150);
}

#[tokio::test]
async fn chat_flavor_uses_completions_route() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({"model": "gpt-4.1-mini", "max_tokens": 150})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(
                json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "{\"answer\":\"ok\"}"}}],
            "usage": {"prompt_tokens": 20, "completion_tokens": 4, "total_tokens": 24}
        })
            )
        )
        .expect(1)
        .mount(&server).await;

    let client = OpenAIChatClient::new("sk-test".to_string(), Some(server.uri()), ApiFlavor::Chat).unwrap();
    let msgs = messages();
    let result = client.complete(&request(&msgs)).await.unwrap();

    assert_eq!(result.raw_text, "{\"answer\":\"ok\"}");
    assert_eq!(result.usage.total_tokens, 24);
}

#[tokio::test]
async fn error_status_is_returned_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(
                json!({"error": {"message": "Rate limit reached"}})
            )
        )
        .expect(1)
        .mount(&server).await;

    let client = OpenAIChatClient::new(
        "sk-test".to_string(),
        Some(server.uri()),
        ApiFlavor::Responses
    ).unwrap();
    let msgs = messages();
    let err = client.complete(&request(&msgs)).await.unwrap_err();

    match err {
        LlmError::Status { status, body } => {
            assert_eq!(status.as_u16(), 429);
            assert!(body.contains("Rate limit reached"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn response_without_text_is_empty_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(
                json!({
            "output": [{"type": "reasoning", "content": []}],
            "usage": {"input_tokens": 10, "output_tokens": 0, "total_tokens": 10}
        })
            )
        )
        .mount(&server).await;

    let client = OpenAIChatClient::new(
        "sk-test".to_string(),
        Some(server.uri()),
        ApiFlavor::Responses
    ).unwrap();
    let msgs = messages();
    let err = client.complete(&request(&msgs)).await.unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse));
}

#[tokio::test]
async fn response_without_usage_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(
                json!({
            "output": [{
                "type": "message",
                "content": [{"type": "output_text", "text": "{\"answer\":\"ok\",\"actions\":[]}"}]
            }]
        })
            )
        )
        .expect(1)
        .mount(&server).await;

    let client = OpenAIChatClient::new(
        "sk-test".to_string(),
        Some(server.uri()),
        ApiFlavor::Responses
    ).unwrap();
    let msgs = messages();
    let err = client.complete(&request(&msgs)).await.unwrap_err();
    assert!(matches!(err, LlmError::MissingUsage));
}

#[tokio::test]
async fn sdk_style_v1_base_url_reaches_route() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(
                json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "{}"}}],
            "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
        })
            )
        )
        .expect(1)
        .mount(&server).await;

    let client = OpenAIChatClient::new(
        "sk-test".to_string(),
        Some(format!("{}/v1", server.uri())),
        ApiFlavor::Chat
    ).unwrap();
    let msgs = messages();
    let result = client.complete(&request(&msgs)).await.unwrap();
    assert_eq!(result.usage.total_tokens, 2);
}
