//! Chat service: one conversational turn for either persona.
//!
//! DESIGN
//! ======
//! The browser owns the conversation and sends the full history with every
//! turn. This service picks the persona's system prompt, translates the
//! history into provider-neutral messages, asks for web grounding when the
//! persona wants citations, and folds the outcome into a `ChatTurnReply`.

use std::fmt::Write;
use std::sync::OnceLock;

use client::config::PORTFOLIO;
use client::net::types::{ChatTurnReply, ChatTurnRequest, HistoryRole, Persona, RawSource};
use client::util::rich_text::is_divider;
use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::llm::LlmChat;
use crate::llm::types::{ChatRequest, Citation, Message};

pub const TUTOR_SYSTEM_PROMPT: &str = "You are ZenStudy AI, an expert academic tutor. Provide clear, concise \
     explanations and use your search tool to verify facts or find recent research. Always cite your findings.";

/// Reason reported when the visitor sent nothing.
pub const EMPTY_MESSAGE_REASON: &str = "empty message";

// =============================================================================
// PROMPTS
// =============================================================================

/// System prompt for the portfolio assistant, with the site's content inlined
/// so answers stay grounded in it.
fn concierge_system_prompt() -> &'static str {
    static PROMPT: OnceLock<String> = OnceLock::new();
    PROMPT.get_or_init(|| {
        let mut prompt = format!(
            "You are {name}'s personal portfolio assistant. Be helpful, professional, and friendly. \
             Answer questions about their projects, skills, and background based on the portfolio context below. \
             If something is not covered, say so rather than guessing.\n\n",
            name = PORTFOLIO.name,
        );
        let _ = writeln!(prompt, "Name: {}\nRole: {}\nContact: {}", PORTFOLIO.name, PORTFOLIO.role, PORTFOLIO.email);

        prompt.push_str("\nAbout:\n");
        for paragraph in PORTFOLIO.bio.paragraphs.iter().filter(|p| !is_divider(p)) {
            let _ = writeln!(prompt, "{paragraph}");
        }

        prompt.push_str("\nTimeline:\n");
        for entry in PORTFOLIO.timeline {
            let _ = writeln!(prompt, "- {}: {}. {}", entry.year, entry.title, entry.desc);
        }

        prompt.push_str("\nProjects:\n");
        for project in PORTFOLIO.projects {
            let _ = writeln!(prompt, "- {} [{}]: {}", project.title, project.tags.join(", "), project.description);
        }

        let _ = writeln!(prompt, "\nSkills: {}", PORTFOLIO.skills.join(", "));
        prompt
    })
}

#[must_use]
pub fn system_prompt(persona: Persona) -> &'static str {
    match persona {
        Persona::Concierge => concierge_system_prompt(),
        Persona::Tutor => TUTOR_SYSTEM_PROMPT,
    }
}

// =============================================================================
// HISTORY
// =============================================================================

/// Provider messages for one turn: prior history then the new message.
///
/// Leading model turns (the greeting) are dropped because providers expect
/// the conversation to open with the user.
#[must_use]
pub fn build_messages(request: &ChatTurnRequest) -> Vec<Message> {
    let mut messages: Vec<Message> = request
        .history
        .iter()
        .skip_while(|turn| turn.role == HistoryRole::Model)
        .filter(|turn| !turn.content.trim().is_empty())
        .map(|turn| match turn.role {
            HistoryRole::User => Message::user(turn.content.clone()),
            HistoryRole::Model => Message::assistant(turn.content.clone()),
        })
        .collect();
    messages.push(Message::user(request.message.trim()));
    messages
}

fn to_raw_source(citation: Citation) -> RawSource {
    RawSource { title: citation.title, uri: citation.uri }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Run one chat turn. Never fails outward: errors become `Failed` replies.
pub async fn send_chat_turn(llm: &dyn LlmChat, request: &ChatTurnRequest, max_tokens: u32) -> ChatTurnReply {
    if request.message.trim().is_empty() {
        return ChatTurnReply::failed(EMPTY_MESSAGE_REASON);
    }

    let persona = request.persona;
    let messages = build_messages(request);
    info!(?persona, history_len = request.history.len(), message_len = request.message.len(), "chat: turn received");

    let chat_request =
        ChatRequest::new(max_tokens, system_prompt(persona), &messages).with_web_search(persona.grounded());

    match llm.chat(chat_request).await {
        Ok(response) => {
            info!(
                ?persona,
                model = %response.model,
                stop_reason = %response.stop_reason,
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                sources = response.citations.len(),
                "chat: reply received"
            );
            let text = response.text();
            ChatTurnReply::Ok { text, sources: response.citations.into_iter().map(to_raw_source).collect() }
        }
        Err(e) => {
            warn!(?persona, error = %e, code = e.error_code(), retryable = e.retryable(), "chat: llm call failed");
            ChatTurnReply::failed(e.to_string())
        }
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
