use std::sync::Arc;

use super::*;
use crate::state::test_helpers::{self, MockLlm};

fn topic(t: &str) -> Json<TopicRequest> {
    Json(TopicRequest { topic: t.into() })
}

#[tokio::test]
async fn flashcards_returns_generated_deck() {
    let reply = r#"[{"question": "2+2?", "answer": "4", "tags": ["math"]}]"#;
    let mock = Arc::new(MockLlm::replying(reply));
    let state = test_helpers::test_app_state_with_llm(mock.clone());
    let limit = state.limits.generate;

    let Json(cards) = flashcards(State(state), HeaderMap::new(), topic("Arithmetic")).await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].answer, "4");
    assert_eq!(mock.last_request().max_tokens, limit);
}

#[tokio::test]
async fn flashcards_without_llm_is_503() {
    let status = flashcards(State(test_helpers::test_app_state()), HeaderMap::new(), topic("x"))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn mind_map_bad_reply_returns_placeholder() {
    let state = test_helpers::test_app_state_with_llm(Arc::new(MockLlm::replying("no map today")));
    let Json(root) = mind_map(State(state), HeaderMap::new(), topic("Graphs")).await.unwrap();
    assert_eq!(root, MindMapNode::placeholder("Graphs"));
}

#[tokio::test]
async fn mind_map_without_llm_is_503() {
    let status = mind_map(State(test_helpers::test_app_state()), HeaderMap::new(), topic("x"))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
