//! Shared JSON DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! The server depends on this module directly, so both sides agree on one
//! schema. Reply shapes coming back from model providers are untrusted:
//! source lists deserialize leniently and drop entries that do not fit.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

/// Which assistant a conversation talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Portfolio assistant answering questions about the owner's work.
    #[default]
    Concierge,
    /// Study tutor with web search grounding.
    Tutor,
}

impl Persona {
    /// Whether replies for this persona should carry search citations.
    #[must_use]
    pub fn grounded(self) -> bool {
        matches!(self, Self::Tutor)
    }
}

/// Speaker role in the collaborator's history vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Model,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: HistoryRole,
    pub content: String,
}

/// Body of `POST /api/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurnRequest {
    #[serde(default)]
    pub persona: Persona,
    pub message: String,
    /// Prior turns, oldest first. Excludes `message`.
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

/// Citation as reported by a provider. Either field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

/// Outcome of one chat turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ChatTurnReply {
    Ok {
        text: String,
        #[serde(default, deserialize_with = "deserialize_lenient_sources")]
        sources: Vec<RawSource>,
    },
    Failed {
        reason: String,
    },
}

impl ChatTurnReply {
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed { reason: reason.into() }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

/// Body of both `POST /api/generate/*` endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRequest {
    pub topic: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapNode {
    pub label: String,
    #[serde(default)]
    pub children: Vec<MindMapNode>,
}

impl MindMapNode {
    /// Single-node map shown when generation fails.
    #[must_use]
    pub fn placeholder(topic: &str) -> Self {
        Self { label: topic.to_owned(), children: Vec::new() }
    }
}

fn deserialize_lenient_sources<'de, D>(deserializer: D) -> Result<Vec<RawSource>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<RawSource>(item).ok())
        .collect())
}
