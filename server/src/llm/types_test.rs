use super::*;

// =============================================================================
// LlmError::error_code
// =============================================================================

#[test]
fn error_code_missing_api_key() {
    let err = LlmError::MissingApiKey { var: "KEY".into() };
    assert_eq!(err.error_code(), "E_MISSING_API_KEY");
}

#[test]
fn error_code_api_response() {
    let err = LlmError::ApiResponse { status: 500, body: "oops".into() };
    assert_eq!(err.error_code(), "E_API_RESPONSE");
}

#[test]
fn error_code_api_parse() {
    let err = LlmError::ApiParse("json".into());
    assert_eq!(err.error_code(), "E_API_PARSE");
}

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn retryable_transport_and_server_errors() {
    assert!(LlmError::ApiRequest("conn refused".into()).retryable());
    assert!(LlmError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, body: String::new() }.retryable());
}

#[test]
fn not_retryable_client_errors() {
    assert!(!LlmError::ApiResponse { status: 400, body: String::new() }.retryable());
    assert!(!LlmError::ApiResponse { status: 401, body: String::new() }.retryable());
    assert!(!LlmError::MissingApiKey { var: "K".into() }.retryable());
    assert!(!LlmError::ApiParse("json".into()).retryable());
}

#[test]
fn display_missing_api_key_names_var() {
    let err = LlmError::MissingApiKey { var: "MY_KEY".into() };
    assert!(err.to_string().contains("MY_KEY"));
}

// =============================================================================
// ContentBlock / Content
// =============================================================================

#[test]
fn content_block_unknown_variant() {
    let json = r#"{"type": "web_search_tool_result", "data": 123}"#;
    let block: ContentBlock = serde_json::from_str(json).unwrap();
    assert!(matches!(block, ContentBlock::Unknown));
}

#[test]
fn content_block_text_parses_from_tagged_json() {
    let block: ContentBlock = serde_json::from_str(r#"{"type":"text","text":"hello"}"#).unwrap();
    assert_eq!(block, ContentBlock::Text { text: "hello".into() });
}

#[test]
fn content_text_serializes_as_plain_string() {
    let msg = Message::user("what is 2+2?");
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json, serde_json::json!({"role": "user", "content": "what is 2+2?"}));
}

#[test]
fn content_text_skips_non_text_blocks() {
    let content = Content::Blocks(vec![
        ContentBlock::Thinking { thinking: "hmm".into() },
        ContentBlock::Text { text: "a".into() },
        ContentBlock::Unknown,
        ContentBlock::Text { text: "b".into() },
    ]);
    assert_eq!(content.text(), "ab");
}

#[test]
fn message_constructors_set_roles() {
    assert_eq!(Message::user("x").role, ROLE_USER);
    assert_eq!(Message::assistant("y").role, ROLE_ASSISTANT);
}

// =============================================================================
// ChatRequest
// =============================================================================

#[test]
fn chat_request_defaults_to_plain_text() {
    let messages = [Message::user("hi")];
    let req = ChatRequest::new(256, "sys", &messages);
    assert!(!req.web_search);
    assert!(req.response_schema.is_none());
}

#[test]
fn chat_request_builders_set_options() {
    let messages = [Message::user("hi")];
    let schema = serde_json::json!({"type": "object"});
    let req = ChatRequest::new(256, "sys", &messages).with_web_search(true).with_response_schema(&schema);
    assert!(req.web_search);
    assert_eq!(req.response_schema, Some(&schema));
}

// =============================================================================
// ChatResponse
// =============================================================================

#[test]
fn chat_response_text_joins_blocks() {
    let resp = ChatResponse {
        content: vec![ContentBlock::Text { text: "Hello, ".into() }, ContentBlock::Text { text: "world".into() }],
        citations: vec![],
        model: "m".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 1,
        output_tokens: 2,
    };
    assert_eq!(resp.text(), "Hello, world");
}

// =============================================================================
// push_citation
// =============================================================================

fn cite(title: &str, uri: &str) -> Citation {
    Citation { title: Some(title.into()), uri: Some(uri.into()) }
}

#[test]
fn push_citation_dedups_by_uri() {
    let mut out = Vec::new();
    push_citation(&mut out, cite("A", "https://a.test"));
    push_citation(&mut out, cite("A again", "https://a.test"));
    push_citation(&mut out, cite("B", "https://b.test"));
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].title.as_deref(), Some("A"));
    assert_eq!(out[1].uri.as_deref(), Some("https://b.test"));
}

#[test]
fn push_citation_ignores_empty() {
    let mut out = Vec::new();
    push_citation(&mut out, Citation::default());
    assert!(out.is_empty());
}
