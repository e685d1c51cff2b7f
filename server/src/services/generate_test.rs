use std::sync::Arc;

use super::*;
use crate::state::test_helpers::MockLlm;

// =========================================================================
// strip_code_fences
// =========================================================================

#[test]
fn strip_fences_with_info_string() {
    assert_eq!(strip_code_fences("```json\n[1, 2]\n```"), "[1, 2]");
}

#[test]
fn strip_fences_without_info_string() {
    assert_eq!(strip_code_fences("  ```\n{\"a\": 1}\n```  \n"), "{\"a\": 1}");
}

#[test]
fn strip_fences_single_line() {
    assert_eq!(strip_code_fences("```[]```"), "[]");
}

#[test]
fn strip_fences_leaves_plain_json() {
    assert_eq!(strip_code_fences("  {\"label\": \"x\"} "), "{\"label\": \"x\"}");
}

// =========================================================================
// generate_structured
// =========================================================================

#[tokio::test]
async fn structured_passes_schema_and_parses_fenced_reply() {
    let mock = Arc::new(MockLlm::replying("```json\n{\"ok\": true}\n```"));
    let schema = json!({"type": "object"});
    let value = generate_structured(mock.as_ref(), "prompt", &schema, 777).await.unwrap();

    assert_eq!(value, json!({"ok": true}));
    let recorded = mock.last_request();
    assert_eq!(recorded.response_schema, Some(schema));
    assert_eq!(recorded.max_tokens, 777);
    assert!(!recorded.web_search);
}

#[tokio::test]
async fn structured_empty_reply_errors() {
    let mock = Arc::new(MockLlm::replying("   "));
    let err = generate_structured(mock.as_ref(), "p", &json!({}), 10).await.unwrap_err();
    assert!(matches!(err, GenerateError::EmptyReply));
}

#[tokio::test]
async fn structured_prose_reply_is_invalid_json() {
    let mock = Arc::new(MockLlm::replying("Sure! Here are your cards."));
    let err = generate_structured(mock.as_ref(), "p", &json!({}), 10).await.unwrap_err();
    assert!(matches!(err, GenerateError::InvalidJson(_)));
    assert_eq!(err.error_code(), "E_INVALID_JSON");
}

// =========================================================================
// generate_flashcards
// =========================================================================

#[tokio::test]
async fn flashcards_parse_and_drop_malformed_cards() {
    let reply = json!([
        { "question": "What is ATP?", "answer": "Cellular energy currency.", "tags": ["biology"] },
        { "question": "No answer here" },
        { "question": "Krebs cycle?", "answer": "A series of reactions." },
        { "question": " ", "answer": "blank question" }
    ])
    .to_string();
    let mock = Arc::new(MockLlm::replying(&reply));
    let cards = generate_flashcards(mock.as_ref(), "Cell biology", 100).await;

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].tags, vec!["biology".to_string()]);
    assert!(cards[1].tags.is_empty());
    assert!(mock.last_request().messages[0].content.text().contains("\"Cell biology\""));
}

#[tokio::test]
async fn flashcards_fall_back_to_empty_on_llm_error() {
    let mock = Arc::new(MockLlm::failing(LlmError::ApiRequest("timeout".into())));
    assert!(generate_flashcards(mock.as_ref(), "Rust", 100).await.is_empty());
}

#[tokio::test]
async fn flashcards_fall_back_when_reply_is_an_object() {
    let mock = Arc::new(MockLlm::replying("{\"cards\": []}"));
    assert!(generate_flashcards(mock.as_ref(), "Rust", 100).await.is_empty());
}

#[tokio::test]
async fn flashcards_blank_topic_skips_llm() {
    let mock = Arc::new(MockLlm::replying("[]"));
    assert!(generate_flashcards(mock.as_ref(), "  ", 100).await.is_empty());
    assert!(mock.requests.lock().unwrap().is_empty());
}

// =========================================================================
// generate_mind_map
// =========================================================================

#[tokio::test]
async fn mind_map_parses_nested_children() {
    let reply = json!({
        "label": "Photosynthesis",
        "children": [
            { "label": "Light reactions", "children": [{ "label": "Photosystem II" }] },
            { "label": "Calvin cycle" }
        ]
    })
    .to_string();
    let mock = Arc::new(MockLlm::replying(&reply));
    let root = generate_mind_map(mock.as_ref(), "Photosynthesis", 100).await;

    assert_eq!(root.label, "Photosynthesis");
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].children[0].label, "Photosystem II");
    assert!(root.children[1].children.is_empty());
}

#[tokio::test]
async fn mind_map_blank_label_takes_topic() {
    let mock = Arc::new(MockLlm::replying("{\"label\": \"\", \"children\": [{\"label\": \"A\"}]}"));
    let root = generate_mind_map(mock.as_ref(), "Topic", 100).await;
    assert_eq!(root.label, "Topic");
    assert_eq!(root.children.len(), 1);
}

#[tokio::test]
async fn mind_map_falls_back_to_placeholder() {
    let mock = Arc::new(MockLlm::replying("not json"));
    let root = generate_mind_map(mock.as_ref(), "  Graph theory ", 100).await;
    assert_eq!(root, MindMapNode::placeholder("Graph theory"));
}

#[test]
fn generate_error_retryable_rules() {
    assert!(GenerateError::EmptyReply.retryable());
    assert!(!GenerateError::Shape("x".into()).retryable());
    assert!(!GenerateError::Llm(LlmError::MissingApiKey { var: "K".into() }).retryable());
}
