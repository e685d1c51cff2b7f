//! LLM types: provider-neutral message types and errors.
//!
//! Shared by the Anthropic, `OpenAI`, and Gemini clients. Providers translate
//! to and from these at their edges; services never see wire formats.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// CONTENT BLOCKS
// =============================================================================

/// A structured content block in a message or API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// A plain text segment.
    #[serde(rename = "text")]
    Text { text: String },

    /// Extended thinking block (Anthropic extended thinking feature).
    #[serde(rename = "thinking")]
    Thinking { thinking: String },

    /// Any unrecognized block type, ignored by downstream logic.
    #[serde(other)]
    Unknown,
}

/// Message content: either plain text or structured blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// A simple string payload.
    Text(String),
    /// A sequence of typed content blocks.
    Blocks(Vec<ContentBlock>),
}

impl Content {
    /// Concatenated text of the content, ignoring non-text blocks.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Blocks(blocks) => collect_text(blocks),
        }
    }
}

// =============================================================================
// MESSAGE TYPES
// =============================================================================

pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: Content,
}

impl Message {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ROLE_USER.to_owned(), content: Content::Text(text.into()) }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: ROLE_ASSISTANT.to_owned(), content: Content::Text(text.into()) }
    }
}

/// A web source the provider consulted while answering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: Option<String>,
    pub uri: Option<String>,
}

/// Everything a provider needs for one call.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub max_tokens: u32,
    pub system: &'a str,
    pub messages: &'a [Message],
    /// Let the provider search the web and report what it cited.
    pub web_search: bool,
    /// JSON schema the reply text must satisfy.
    pub response_schema: Option<&'a serde_json::Value>,
}

impl<'a> ChatRequest<'a> {
    #[must_use]
    pub fn new(max_tokens: u32, system: &'a str, messages: &'a [Message]) -> Self {
        Self { max_tokens, system, messages, web_search: false, response_schema: None }
    }

    #[must_use]
    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }

    #[must_use]
    pub fn with_response_schema(mut self, schema: &'a serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// Response from an LLM chat call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: Vec<ContentBlock>,
    /// Sources in the order the provider reported them, duplicates removed.
    pub citations: Vec<Citation>,
    pub model: String,
    pub stop_reason: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl ChatResponse {
    /// All text blocks joined in order.
    #[must_use]
    pub fn text(&self) -> String {
        collect_text(&self.content)
    }
}

fn collect_text(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Thinking { .. } | ContentBlock::Unknown => None,
        })
        .collect()
}

/// Append `citation` unless one with the same uri is already present.
pub(crate) fn push_citation(citations: &mut Vec<Citation>, citation: Citation) {
    if citation.title.is_none() && citation.uri.is_none() {
        return;
    }
    if citation.uri.is_some() && citations.iter().any(|c| c.uri == citation.uri) {
        return;
    }
    citations.push(citation);
}

// =============================================================================
// LLM CHAT TRAIT
// =============================================================================

/// Provider-neutral async trait for LLM chat. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// Send a chat request to the LLM provider.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the response is malformed,
    /// or the API key is absent.
    async fn chat(&self, request: ChatRequest<'_>) -> Result<ChatResponse, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
