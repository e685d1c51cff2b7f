use std::sync::Arc;

use client::net::types::HistoryTurn;

use super::*;
use crate::llm::types::{ChatResponse, ContentBlock, LlmError, ROLE_ASSISTANT, ROLE_USER};
use crate::state::test_helpers::MockLlm;

fn turn(role: HistoryRole, content: &str) -> HistoryTurn {
    HistoryTurn { role, content: content.into() }
}

fn request(persona: Persona, message: &str, history: Vec<HistoryTurn>) -> ChatTurnRequest {
    ChatTurnRequest { persona, message: message.into(), history }
}

// =========================================================================
// system_prompt
// =========================================================================

#[test]
fn concierge_prompt_inlines_portfolio() {
    let prompt = system_prompt(Persona::Concierge);
    assert!(prompt.contains(PORTFOLIO.name));
    assert!(prompt.contains("portfolio assistant"));
    for project in PORTFOLIO.projects {
        assert!(prompt.contains(project.title));
    }
}

#[test]
fn tutor_prompt_asks_for_citations() {
    assert!(system_prompt(Persona::Tutor).contains("cite"));
}

// =========================================================================
// build_messages
// =========================================================================

#[test]
fn build_messages_drops_leading_greeting() {
    let req = request(
        Persona::Concierge,
        "And projects?",
        vec![
            turn(HistoryRole::Model, "Hi! Ask me anything."),
            turn(HistoryRole::User, "Who are you?"),
            turn(HistoryRole::Model, "A portfolio assistant."),
        ],
    );
    let messages = build_messages(&req);
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].role, ROLE_USER);
    assert_eq!(messages[0].content.text(), "Who are you?");
    assert_eq!(messages[1].role, ROLE_ASSISTANT);
    assert_eq!(messages[2].content.text(), "And projects?");
}

#[test]
fn build_messages_without_history_is_single_user_turn() {
    let messages = build_messages(&request(Persona::Tutor, "  What is entropy?  ", vec![]));
    assert_eq!(messages, vec![Message::user("What is entropy?")]);
}

#[test]
fn build_messages_skips_blank_turns() {
    let req = request(
        Persona::Tutor,
        "next",
        vec![turn(HistoryRole::User, "q"), turn(HistoryRole::Model, "  "), turn(HistoryRole::User, "q2")],
    );
    assert_eq!(build_messages(&req).len(), 3);
}

// =========================================================================
// send_chat_turn (with MockLlm)
// =========================================================================

#[tokio::test]
async fn concierge_turn_returns_text_without_grounding() {
    let mock = Arc::new(MockLlm::replying("I build ML tools."));
    let reply = send_chat_turn(mock.as_ref(), &request(Persona::Concierge, "What do you do?", vec![]), 512).await;

    assert_eq!(reply, ChatTurnReply::Ok { text: "I build ML tools.".into(), sources: vec![] });
    let recorded = mock.last_request();
    assert!(!recorded.web_search);
    assert_eq!(recorded.max_tokens, 512);
    assert_eq!(recorded.system, system_prompt(Persona::Concierge));
}

#[tokio::test]
async fn tutor_turn_requests_grounding_and_returns_sources() {
    let response = ChatResponse {
        content: vec![ContentBlock::Text { text: "Entropy measures disorder.".into() }],
        citations: vec![
            Citation { title: Some("Entropy - Wiki".into()), uri: Some("https://wiki.test/entropy".into()) },
            Citation { title: None, uri: Some("https://untitled.test".into()) },
        ],
        model: "mock".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 1,
        output_tokens: 1,
    };
    let mock = Arc::new(MockLlm::new(vec![Ok(response)]));
    let reply = send_chat_turn(mock.as_ref(), &request(Persona::Tutor, "Explain entropy", vec![]), 512).await;

    let ChatTurnReply::Ok { text, sources } = reply else {
        panic!("expected ok reply, got {reply:?}");
    };
    assert_eq!(text, "Entropy measures disorder.");
    // Filtering happens in the browser; every provider citation is forwarded.
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].uri.as_deref(), Some("https://wiki.test/entropy"));
    assert!(mock.last_request().web_search);
}

#[tokio::test]
async fn llm_error_becomes_failed_reply() {
    let mock = Arc::new(MockLlm::failing(LlmError::ApiResponse { status: 500, body: "boom".into() }));
    let reply = send_chat_turn(mock.as_ref(), &request(Persona::Tutor, "hello", vec![]), 512).await;

    let ChatTurnReply::Failed { reason } = reply else {
        panic!("expected failed reply");
    };
    assert!(reason.contains("500"));
}

#[tokio::test]
async fn empty_message_skips_llm() {
    let mock = Arc::new(MockLlm::replying("unused"));
    let reply = send_chat_turn(mock.as_ref(), &request(Persona::Concierge, "   ", vec![]), 512).await;

    assert_eq!(reply, ChatTurnReply::failed(EMPTY_MESSAGE_REASON));
    assert!(mock.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_reply_text_is_passed_through() {
    let mock = Arc::new(MockLlm::new(vec![Ok(ChatResponse {
        content: vec![],
        citations: vec![],
        model: "mock".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 0,
        output_tokens: 0,
    })]));
    let reply = send_chat_turn(mock.as_ref(), &request(Persona::Concierge, "hi", vec![]), 512).await;
    assert_eq!(reply, ChatTurnReply::Ok { text: String::new(), sources: vec![] });
}
