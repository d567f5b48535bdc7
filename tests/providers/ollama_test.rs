//! Ollama provider wire format tests.

use serde_json::json;
use visi::providers::ollama::{build_request, parse_response, OllamaProvider, DEFAULT_OLLAMA_URL};
use visi::providers::{CompletionRequest, ImageAttachment, LlmProvider, Message, ProviderError};

use crate::support::{request_text, serve_once};

fn simple_request() -> CompletionRequest {
    CompletionRequest {
        messages: vec![Message::user("Merhaba")],
        system: Some("Sen bir çalışma koçusun.".to_owned()),
        image: None,
        max_tokens: Some(512),
    }
}

#[test]
fn build_request_injects_system_message() {
    let req = build_request("qwen3:8b", &simple_request());
    assert_eq!(req.model, "qwen3:8b");
    assert_eq!(req.messages.len(), 2); // system + user
    assert_eq!(req.messages[0].role, "system");
    assert_eq!(req.messages[0].content, "Sen bir çalışma koçusun.");
    assert_eq!(req.messages[1].role, "user");
    assert!(!req.stream);
}

#[test]
fn build_request_no_system_when_absent() {
    let mut request = simple_request();
    request.system = None;
    let req = build_request("model", &request);
    assert_eq!(req.messages.len(), 1);
    assert_eq!(req.messages[0].role, "user");
}

#[test]
fn build_request_sets_options() {
    let req = build_request("model", &simple_request());
    let opts = req.options.expect("options should exist");
    assert_eq!(opts.num_predict, Some(512));
}

#[test]
fn build_request_maps_roles() {
    let request = CompletionRequest {
        messages: vec![
            Message::user("usr"),
            Message::assistant("ast"),
            Message::user("again"),
        ],
        system: None,
        image: None,
        max_tokens: None,
    };
    let req = build_request("model", &request);
    let roles: Vec<&str> = req.messages.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, vec!["user", "assistant", "user"]);
    assert!(req.options.is_none());
}

#[test]
fn build_request_puts_image_on_last_user_message() {
    let mut request = simple_request();
    request.messages.push(Message::assistant("Tabii."));
    request.messages.push(Message::user("Bu soruyu çöz"));
    request.image = Some(ImageAttachment {
        mime_type: "image/jpeg".to_owned(),
        data: "/9j/4AAQ".to_owned(),
    });
    let req = build_request("llava", &request);
    let last = req.messages.last().expect("has messages");
    assert_eq!(last.content, "Bu soruyu çöz");
    assert_eq!(last.images, vec!["/9j/4AAQ".to_owned()]);
    assert!(req.messages[1].images.is_empty());

    let value = serde_json::to_value(&req).expect("serializes");
    assert!(value["messages"][0].get("images").is_none());
}

#[test]
fn parse_response_reads_message_and_counts() {
    let body = json!({
        "model": "qwen3:8b",
        "message": {"role": "assistant", "content": "Hadi başlayalım!"},
        "done": true,
        "prompt_eval_count": 120,
        "eval_count": 18
    })
    .to_string();

    let resp = parse_response(&body).expect("should parse");
    assert_eq!(resp.text, "Hadi başlayalım!");
    assert_eq!(resp.model, "qwen3:8b");
    assert_eq!(resp.usage.input_tokens, 120);
    assert_eq!(resp.usage.output_tokens, 18);
}

#[test]
fn parse_response_blank_content_is_empty() {
    let body = json!({
        "model": "m",
        "message": {"role": "assistant", "content": "   "}
    })
    .to_string();
    assert!(matches!(parse_response(&body), Err(ProviderError::Empty)));
}

#[test]
fn parse_response_invalid_json() {
    assert!(matches!(
        parse_response("not json"),
        Err(ProviderError::Parse(_))
    ));
}

#[test]
fn provider_defaults() {
    let provider = OllamaProvider::new("ollama/llama3".to_owned(), "llama3".to_owned());
    assert_eq!(provider.base_url, DEFAULT_OLLAMA_URL);
    assert_eq!(provider.model_id(), "ollama/llama3");
    assert!(provider.supports_images());
}

#[tokio::test]
async fn complete_posts_to_api_chat() {
    let body = json!({
        "model": "llama3",
        "message": {"role": "assistant", "content": "Tamam."}
    })
    .to_string();
    let (url, captured) = serve_once("200 OK", "application/json", &body).await;
    let provider =
        OllamaProvider::new("ollama/llama3".to_owned(), "llama3".to_owned()).with_base_url(url);

    let resp = provider.complete(simple_request()).await.expect("should complete");
    assert_eq!(resp.text, "Tamam.");
    let raw = request_text(&captured);
    assert!(raw.starts_with("POST /api/chat"));
    assert!(raw.contains("\"stream\":false"));
}

#[test]
fn parse_response_keeps_truncated_reply() {
    let body = serde_json::json!({
        "model": "llama3",
        "message": {"role": "assistant", "content": "Önce TYT matematikte"},
        "done": true,
        "done_reason": "length"
    })
    .to_string();
    let resp = parse_response(&body).expect("truncated text is still a reply");
    assert_eq!(resp.text, "Önce TYT matematikte");
}
