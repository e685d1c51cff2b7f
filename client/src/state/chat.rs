//! Chat session store shared by the concierge and tutor pages.
//!
//! DESIGN
//! ======
//! Sending a message is split around the network await. [`ChatState::begin_send`]
//! validates input, appends the user's message optimistically and hands back
//! the request to dispatch; [`ChatState::complete`] folds whatever came back
//! into exactly one assistant message. Only one turn may be in flight, and a
//! reply for a turn that is no longer current is discarded.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::types::{ChatTurnReply, ChatTurnRequest, HistoryRole, HistoryTurn, Persona, RawSource};
use crate::util::markdown::is_safe_url;

/// Shown when the collaborator call fails for any reason.
pub const FAILURE_APOLOGY: &str =
    "Oops! Something went wrong on my end. Please check your connection and try again.";
/// Shown when the collaborator answers with no text.
pub const EMPTY_REPLY_FALLBACK: &str = "I'm sorry, I couldn't process that. Could you try rephrasing?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Map to the collaborator's vocabulary, where the assistant is `model`.
    #[must_use]
    pub fn history_role(self) -> HistoryRole {
        match self {
            Self::User => HistoryRole::User,
            Self::Assistant => HistoryRole::Model,
        }
    }
}

/// A validated citation: both fields present and non-blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub sources: Option<Vec<Source>>,
}

impl ChatMessage {
    fn new(role: ChatRole, content: impl Into<String>, timestamp: i64) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), role, content: content.into(), timestamp, sources: None }
    }
}

/// An accepted send awaiting its reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingTurn {
    /// Pass back to [`ChatState::complete`].
    pub turn: u64,
    pub request: ChatTurnRequest,
}

#[derive(Clone, Debug)]
pub struct ChatState {
    pub persona: Persona,
    pub messages: Vec<ChatMessage>,
    pub is_loading: bool,
    turn: u64,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new(Persona::default(), 0)
    }
}

impl ChatState {
    /// A fresh conversation seeded with the persona's greeting.
    #[must_use]
    pub fn new(persona: Persona, now_ms: i64) -> Self {
        Self {
            persona,
            messages: vec![ChatMessage::new(ChatRole::Assistant, greeting(persona), now_ms)],
            is_loading: false,
            turn: 0,
        }
    }

    /// Accept `input` for sending. Returns `None` without touching state when
    /// the input is blank or a turn is already in flight.
    pub fn begin_send(&mut self, input: &str, now_ms: i64) -> Option<PendingTurn> {
        if input.trim().is_empty() || self.is_loading {
            return None;
        }
        let history = self.history();
        self.messages.push(ChatMessage::new(ChatRole::User, input, now_ms));
        self.is_loading = true;
        self.turn += 1;
        Some(PendingTurn {
            turn: self.turn,
            request: ChatTurnRequest { persona: self.persona, message: input.to_owned(), history },
        })
    }

    /// Fold the collaborator's answer for `turn` into the conversation.
    /// Returns `false` if the turn was superseded and the reply discarded.
    pub fn complete(&mut self, turn: u64, reply: ChatTurnReply, now_ms: i64) -> bool {
        if !self.is_loading || turn != self.turn {
            return false;
        }
        self.is_loading = false;

        let message = match reply {
            ChatTurnReply::Ok { text, sources } => {
                let content = if text.trim().is_empty() { EMPTY_REPLY_FALLBACK.to_owned() } else { text };
                let sources = extract_sources(&sources);
                let mut message = ChatMessage::new(ChatRole::Assistant, content, now_ms);
                message.sources = (!sources.is_empty()).then_some(sources);
                message
            }
            ChatTurnReply::Failed { reason } => {
                log_failure(&reason);
                ChatMessage::new(ChatRole::Assistant, FAILURE_APOLOGY, now_ms)
            }
        };
        self.messages.push(message);
        true
    }

    /// Every message so far in collaborator form, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryTurn> {
        self.messages
            .iter()
            .map(|m| HistoryTurn { role: m.role.history_role(), content: m.content.clone() })
            .collect()
    }

    /// Messages sent or received after the greeting.
    #[must_use]
    pub fn exchanged_count(&self) -> usize {
        self.messages.len().saturating_sub(1)
    }

    /// Start over with only the greeting. Any in-flight reply is discarded.
    pub fn reset(&mut self, now_ms: i64) {
        let turn = self.turn;
        *self = Self::new(self.persona, now_ms);
        self.turn = turn;
    }
}

/// Keep citations whose title and uri are both non-blank, in order. A uri
/// that fails [`is_safe_url`] drops the citation.
#[must_use]
pub fn extract_sources(raw: &[RawSource]) -> Vec<Source> {
    raw.iter()
        .filter_map(|s| {
            let title = s.title.as_deref()?.trim();
            let uri = s.uri.as_deref()?.trim();
            (!title.is_empty() && !uri.is_empty() && is_safe_url(uri)).then(|| Source { title: title.to_owned(), uri: uri.to_owned() })
        })
        .collect()
}

#[must_use]
pub fn greeting(persona: Persona) -> &'static str {
    match persona {
        Persona::Concierge => {
            "I am Anto's digital twin. I can discuss architectural choices, specific projects, or collaboration opportunities. How may I assist?"
        }
        Persona::Tutor => {
            "Hello! I'm your AI Study Tutor. I can help you understand topics, find research sources, or solve tricky problems. What are we studying today?"
        }
    }
}

/// Label shown above a message bubble.
#[must_use]
pub fn speaker_label(persona: Persona, role: ChatRole) -> &'static str {
    match (persona, role) {
        (Persona::Concierge, ChatRole::User) => "Visitor",
        (Persona::Concierge, ChatRole::Assistant) => "Concierge",
        (Persona::Tutor, ChatRole::User) => "You",
        (Persona::Tutor, ChatRole::Assistant) => "Tutor",
    }
}

fn log_failure(reason: &str) {
    #[cfg(feature = "hydrate")]
    log::warn!("chat turn failed: {reason}");
    #[cfg(not(feature = "hydrate"))]
    let _ = reason;
}
