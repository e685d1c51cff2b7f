use super::*;

// =============================================================================
// request building
// =============================================================================

#[test]
fn cc_request_prepends_system_message() {
    let messages = [Message::user("hi"), Message::assistant("hello"), Message::user("again")];
    let body = build_chat_completions_request("gpt-4o", ChatRequest::new(100, "sys", &messages));
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["messages"][0], serde_json::json!({"role": "system", "content": "sys"}));
    assert_eq!(json["messages"][2], serde_json::json!({"role": "assistant", "content": "hello"}));
    assert_eq!(json["messages"].as_array().unwrap().len(), 4);
    assert!(json.get("web_search_options").is_none());
    assert!(json.get("response_format").is_none());
}

#[test]
fn cc_request_grounding_and_schema() {
    let messages = [Message::user("topic")];
    let schema = serde_json::json!({"type": "object"});
    let req = ChatRequest::new(100, "", &messages)
        .with_web_search(true)
        .with_response_schema(&schema);
    let json = serde_json::to_value(build_chat_completions_request("m", req)).unwrap();
    assert_eq!(json["web_search_options"], serde_json::json!({}));
    assert_eq!(json["response_format"]["type"], "json_schema");
    assert_eq!(json["response_format"]["json_schema"]["schema"], schema);
    // Blank system prompt is omitted.
    assert_eq!(json["messages"][0]["role"], "user");
}

#[test]
fn resp_request_maps_roles_to_content_types() {
    let messages = [Message::user("q"), Message::assistant("a")];
    let json = serde_json::to_value(build_responses_request("m", ChatRequest::new(64, "sys", &messages))).unwrap();
    assert_eq!(json["instructions"], "sys");
    assert_eq!(json["max_output_tokens"], 64);
    assert_eq!(json["input"][0]["content"][0]["type"], "input_text");
    assert_eq!(json["input"][1]["content"][0]["type"], "output_text");
    assert!(json.get("tools").is_none());
}

#[test]
fn resp_request_grounding_adds_search_tool() {
    let messages = [Message::user("q")];
    let schema = serde_json::json!({"type": "array"});
    let req = ChatRequest::new(64, "sys", &messages)
        .with_web_search(true)
        .with_response_schema(&schema);
    let json = serde_json::to_value(build_responses_request("m", req)).unwrap();
    assert_eq!(json["tools"][0]["type"], "web_search_preview");
    assert_eq!(json["text"]["format"]["type"], "json_schema");
    assert_eq!(json["text"]["format"]["schema"], schema);
}

// =============================================================================
// chat completions parsing
// =============================================================================

#[test]
fn cc_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "Hello!" },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.text(), "Hello!");
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 10);
    assert_eq!(resp.output_tokens, 5);
}

#[test]
fn cc_parse_url_citations() {
    let json = serde_json::json!({
        "model": "gpt-4o-search-preview",
        "choices": [{
            "message": {
                "role": "assistant",
                "content": "See the docs.",
                "annotations": [
                    { "type": "url_citation", "url_citation": { "url": "https://docs.rs", "title": "Docs.rs" } },
                    { "type": "url_citation", "url_citation": { "url": "https://docs.rs", "title": "Docs.rs" } }
                ]
            },
            "finish_reason": "length"
        }]
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.citations, vec![Citation { title: Some("Docs.rs".into()), uri: Some("https://docs.rs".into()) }]);
    assert_eq!(resp.stop_reason, "max_tokens");
}

#[test]
fn cc_parse_missing_choices() {
    let json = serde_json::json!({ "model": "gpt-4o", "choices": [] }).to_string();
    assert!(matches!(parse_chat_completions_response(&json), Err(LlmError::ApiParse(_))));
}

// =============================================================================
// responses parsing
// =============================================================================

#[test]
fn resp_parse_text_with_annotations() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output": [
            { "type": "web_search_call", "id": "ws_1", "status": "completed" },
            {
                "type": "message",
                "content": [{
                    "type": "output_text",
                    "text": "Done!",
                    "annotations": [
                        { "type": "url_citation", "url": "https://a.test", "title": "A", "start_index": 0, "end_index": 4 },
                        { "type": "file_citation", "file_id": "f_1" }
                    ]
                }]
            }
        ],
        "usage": { "input_tokens": 15, "output_tokens": 8 }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.text(), "Done!");
    assert_eq!(resp.citations.len(), 1);
    assert_eq!(resp.citations[0].uri.as_deref(), Some("https://a.test"));
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 15);
}

#[test]
fn resp_parse_output_text_fallback() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output_text": "Fallback text",
        "usage": { "input_tokens": 5, "output_tokens": 3 }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.text(), "Fallback text");
}

#[test]
fn resp_parse_incomplete_is_max_tokens() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output": [],
        "incomplete_details": { "reason": "max_output_tokens" }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.stop_reason, "max_tokens");
    assert!(resp.content.is_empty());
}
