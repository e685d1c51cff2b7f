//! Structured generation: flashcard decks and mind maps from a topic.
//!
//! DESIGN
//! ======
//! Each generator sends a fixed prompt plus a JSON schema through the
//! provider's JSON mode and parses the reply. Models still wrap JSON in
//! markdown fences now and then, so fences are stripped before parsing.
//! Public wrappers never fail: a bad reply yields the fallback value.

use client::net::types::{Flashcard, MindMapNode};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::llm::LlmChat;
use crate::llm::types::{ChatRequest, LlmError, Message};

const GENERATE_SYSTEM_PROMPT: &str =
    "You create accurate, well-structured study material. Reply with JSON only, never with prose or commentary.";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("model returned no text")]
    EmptyReply,
    #[error("reply is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("reply does not match the expected shape: {0}")]
    Shape(String),
}

impl ErrorCode for GenerateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Llm(_) => "E_LLM_ERROR",
            Self::EmptyReply => "E_EMPTY_REPLY",
            Self::InvalidJson(_) => "E_INVALID_JSON",
            Self::Shape(_) => "E_REPLY_SHAPE",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Llm(e) => e.retryable(),
            Self::EmptyReply | Self::InvalidJson(_) => true,
            Self::Shape(_) => false,
        }
    }
}

// =============================================================================
// SCHEMAS
// =============================================================================

fn flashcards_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "question": { "type": "string" },
                "answer": { "type": "string" },
                "tags": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["question", "answer"]
        }
    })
}

fn mind_map_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "label": { "type": "string" },
            "children": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "label": { "type": "string" },
                        "children": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": { "label": { "type": "string" } },
                                "required": ["label"]
                            }
                        }
                    },
                    "required": ["label"]
                }
            }
        },
        "required": ["label"]
    })
}

// =============================================================================
// CORE
// =============================================================================

/// Body of a markdown-fenced reply, or the trimmed input when unfenced.
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`, `JSON`, or nothing) on the opening line.
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Ask for JSON matching `schema` and parse the reply.
///
/// # Errors
///
/// Returns [`GenerateError`] when the call fails, the reply is empty, or the
/// reply is not JSON.
pub async fn generate_structured(
    llm: &dyn LlmChat,
    prompt: &str,
    schema: &Value,
    max_tokens: u32,
) -> Result<Value, GenerateError> {
    let messages = [Message::user(prompt)];
    let request = ChatRequest::new(max_tokens, GENERATE_SYSTEM_PROMPT, &messages).with_response_schema(schema);
    let response = llm.chat(request).await?;

    let text = response.text();
    let body = strip_code_fences(&text);
    if body.is_empty() {
        return Err(GenerateError::EmptyReply);
    }
    serde_json::from_str(body).map_err(|e| GenerateError::InvalidJson(e.to_string()))
}

// =============================================================================
// FLASHCARDS
// =============================================================================

fn flashcards_prompt(topic: &str) -> String {
    format!(
        "Create a set of 5 educational flashcards for the topic: \"{topic}\". Each card should have a clear \
         question, a detailed answer, and relevant tags."
    )
}

/// Cards from a parsed reply. Entries without a question or answer are dropped.
fn parse_flashcards(value: Value) -> Result<Vec<Flashcard>, GenerateError> {
    let Value::Array(items) = value else {
        return Err(GenerateError::Shape("expected a JSON array of cards".into()));
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<Flashcard>(item).ok())
        .filter(|card| !card.question.trim().is_empty() && !card.answer.trim().is_empty())
        .collect())
}

/// Generate a flashcard deck for `topic`. Empty on any failure.
pub async fn generate_flashcards(llm: &dyn LlmChat, topic: &str, max_tokens: u32) -> Vec<Flashcard> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Vec::new();
    }

    let result = generate_structured(llm, &flashcards_prompt(topic), &flashcards_schema(), max_tokens)
        .await
        .and_then(parse_flashcards);
    match result {
        Ok(cards) => {
            info!(topic, cards = cards.len(), "generate: flashcards ready");
            cards
        }
        Err(e) => {
            warn!(topic, error = %e, code = e.error_code(), "generate: flashcards failed");
            Vec::new()
        }
    }
}

// =============================================================================
// MIND MAP
// =============================================================================

fn mind_map_prompt(topic: &str) -> String {
    format!(
        "Generate a hierarchical mind map structure for the topic: \"{topic}\". Break it down into key concepts \
         and sub-concepts."
    )
}

fn parse_mind_map(value: Value, topic: &str) -> Result<MindMapNode, GenerateError> {
    let mut root: MindMapNode = serde_json::from_value(value).map_err(|e| GenerateError::Shape(e.to_string()))?;
    if root.label.trim().is_empty() {
        topic.clone_into(&mut root.label);
    }
    Ok(root)
}

/// Generate a mind map for `topic`. A lone root node on any failure.
pub async fn generate_mind_map(llm: &dyn LlmChat, topic: &str, max_tokens: u32) -> MindMapNode {
    let topic = topic.trim();
    if topic.is_empty() {
        return MindMapNode::placeholder(topic);
    }

    let result = generate_structured(llm, &mind_map_prompt(topic), &mind_map_schema(), max_tokens)
        .await
        .and_then(|value| parse_mind_map(value, topic));
    match result {
        Ok(root) => {
            info!(topic, branches = root.children.len(), "generate: mind map ready");
            root
        }
        Err(e) => {
            warn!(topic, error = %e, code = e.error_code(), "generate: mind map failed");
            MindMapNode::placeholder(topic)
        }
    }
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
