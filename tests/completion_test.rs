use mockito::{Matcher, Server};
use serde_json::json;
use testgen::completion::{CompletionModel, GeminiModel, OpenAiModel};
use testgen::error::Error;
use testgen::extract::extract;

#[test]
fn test_gemini_request_and_reply() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
        .match_header("x-goog-api-key", "g-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "Write tests for Order" }] }],
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": 4096,
                "topK": 40,
                "topP": 0.9
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": "describe('Order'" }, { "text": "});" }] },
                    "finishReason": "STOP"
                }]
            })
            .to_string(),
        )
        .create();

    let model = GeminiModel::new("gemini-2.0-flash", "g-key").with_base_url(server.url());
    let response = model.invoke("Write tests for Order").unwrap();

    mock.assert();
    assert_eq!(extract(&response), "describe('Order'\n});");
}

#[test]
fn test_gemini_reply_without_candidates_extracts_nothing() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string())
        .create();

    let model = GeminiModel::new("gemini-2.0-flash", "g-key").with_base_url(server.url());
    let response = model.invoke("prompt").unwrap();

    mock.assert();
    assert_eq!(extract(&response), "");
}

#[test]
fn test_openai_request_and_reply() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4",
            "messages": [{ "role": "user", "content": "Write tests for Customer" }],
            "temperature": 0.7,
            "max_tokens": 4096
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "chatcmpl-1",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": "test('Customer', () => {});" },
                    "finish_reason": "stop"
                }]
            })
            .to_string(),
        )
        .create();

    let model = OpenAiModel::new("gpt-4", "sk-test").with_base_url(server.url());
    let response = model.invoke("Write tests for Customer").unwrap();

    mock.assert();
    assert_eq!(extract(&response), "test('Customer', () => {});");
}

#[test]
fn test_error_status_is_http_error() {
    let mut server = Server::new();
    let openai = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"invalid api key"}}"#)
        .create();
    let gemini = server
        .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
        .with_status(429)
        .create();

    let model = OpenAiModel::new("gpt-4", "wrong").with_base_url(server.url());
    assert!(matches!(model.invoke("prompt"), Err(Error::HttpError(_))));

    let model = GeminiModel::new("gemini-2.0-flash", "wrong").with_base_url(server.url());
    assert!(matches!(model.invoke("prompt"), Err(Error::HttpError(_))));

    openai.assert();
    gemini.assert();
}
