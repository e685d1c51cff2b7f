use super::*;
use serde_json::json;

// =============================================================
// ChatTurnReply
// =============================================================

#[test]
fn ok_reply_uses_status_tag() {
    let reply = ChatTurnReply::Ok {
        text: "hi".to_owned(),
        sources: vec![RawSource { title: Some("T".to_owned()), uri: Some("https://t".to_owned()) }],
    };
    let value = serde_json::to_value(&reply).expect("serialize");
    assert_eq!(value["status"], "ok");
    assert_eq!(value["text"], "hi");
    assert_eq!(value["sources"][0]["uri"], "https://t");
}

#[test]
fn failed_reply_round_trips() {
    let value = json!({"status": "failed", "reason": "rate_limited"});
    let reply: ChatTurnReply = serde_json::from_value(value).expect("deserialize");
    assert_eq!(reply, ChatTurnReply::failed("rate_limited"));
    assert!(!reply.is_ok());
}

#[test]
fn ok_reply_without_sources_defaults_to_empty() {
    let reply: ChatTurnReply = serde_json::from_value(json!({"status": "ok", "text": "x"})).expect("deserialize");
    assert_eq!(reply, ChatTurnReply::Ok { text: "x".to_owned(), sources: Vec::new() });
}

#[test]
fn malformed_source_entries_are_dropped_not_fatal() {
    let value = json!({
        "status": "ok",
        "text": "x",
        "sources": [
            {"title": "Good", "uri": "https://good"},
            {"title": 42, "uri": "https://bad"},
            "nonsense",
            {"uri": "https://untitled"}
        ]
    });
    let ChatTurnReply::Ok { sources, .. } = serde_json::from_value(value).expect("deserialize") else {
        panic!("expected ok reply");
    };
    assert_eq!(
        sources,
        vec![
            RawSource { title: Some("Good".to_owned()), uri: Some("https://good".to_owned()) },
            RawSource { title: None, uri: Some("https://untitled".to_owned()) },
        ]
    );
}

#[test]
fn non_array_sources_become_empty() {
    let value = json!({"status": "ok", "text": "x", "sources": {"oops": true}});
    let ChatTurnReply::Ok { sources, .. } = serde_json::from_value(value).expect("deserialize") else {
        panic!("expected ok reply");
    };
    assert!(sources.is_empty());
}

// =============================================================
// Requests
// =============================================================

#[test]
fn chat_request_serializes_lowercase_roles() {
    let req = ChatTurnRequest {
        persona: Persona::Tutor,
        message: "why?".to_owned(),
        history: vec![
            HistoryTurn { role: HistoryRole::Model, content: "hello".to_owned() },
            HistoryTurn { role: HistoryRole::User, content: "hi".to_owned() },
        ],
    };
    let value = serde_json::to_value(&req).expect("serialize");
    assert_eq!(value["persona"], "tutor");
    assert_eq!(value["history"][0]["role"], "model");
    assert_eq!(value["history"][1]["role"], "user");
}

#[test]
fn chat_request_defaults_persona_and_history() {
    let req: ChatTurnRequest = serde_json::from_value(json!({"message": "yo"})).expect("deserialize");
    assert_eq!(req.persona, Persona::Concierge);
    assert!(req.history.is_empty());
}

#[test]
fn only_tutor_is_grounded() {
    assert!(Persona::Tutor.grounded());
    assert!(!Persona::Concierge.grounded());
}

// =============================================================
// Study payloads
// =============================================================

#[test]
fn flashcard_tags_are_optional() {
    let card: Flashcard = serde_json::from_value(json!({"question": "Q", "answer": "A"})).expect("deserialize");
    assert!(card.tags.is_empty());
}

#[test]
fn mind_map_children_nest_and_default() {
    let node: MindMapNode = serde_json::from_value(json!({
        "label": "Root",
        "children": [{"label": "Leaf"}]
    }))
    .expect("deserialize");
    assert_eq!(node.children.len(), 1);
    assert!(node.children[0].children.is_empty());
}

#[test]
fn mind_map_placeholder_uses_topic() {
    assert_eq!(
        MindMapNode::placeholder("Optics"),
        MindMapNode { label: "Optics".to_owned(), children: Vec::new() }
    );
}
