//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the optional LLM client, the rate limiter, and per-call token
//! caps. There is no per-visitor server state; conversations live in the
//! browser and arrive with each request.

use std::sync::Arc;

use crate::llm::LlmChat;
use crate::llm::config::env_parse_u64;
use crate::rate_limit::RateLimiter;

const DEFAULT_CHAT_MAX_TOKENS: u32 = 1024;
const DEFAULT_GENERATE_MAX_TOKENS: u32 = 4096;

// =============================================================================
// TOKEN LIMITS
// =============================================================================

/// Output token caps per request kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLimits {
    pub chat: u32,
    pub generate: u32,
}

impl Default for TokenLimits {
    fn default() -> Self {
        Self { chat: DEFAULT_CHAT_MAX_TOKENS, generate: DEFAULT_GENERATE_MAX_TOKENS }
    }
}

impl TokenLimits {
    /// Read `CHAT_MAX_TOKENS` and `GENERATE_MAX_TOKENS`, keeping defaults for
    /// absent or out-of-range values.
    #[must_use]
    pub fn from_env() -> Self {
        let read = |key: &str, default: u32| {
            u32::try_from(env_parse_u64(key, u64::from(default)))
                .ok()
                .filter(|&n| n > 0)
                .unwrap_or(default)
        };
        Self {
            chat: read("CHAT_MAX_TOKENS", DEFAULT_CHAT_MAX_TOKENS),
            generate: read("GENERATE_MAX_TOKENS", DEFAULT_GENERATE_MAX_TOKENS),
        }
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    /// In-memory rate limiter for AI requests.
    pub rate_limiter: RateLimiter,
    pub limits: TokenLimits,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmChat>>, rate_limiter: RateLimiter, limits: TokenLimits) -> Self {
        Self { llm, rate_limiter, limits }
    }

    /// State configured from the environment.
    #[must_use]
    pub fn from_env(llm: Option<Arc<dyn LlmChat>>) -> Self {
        Self::new(llm, RateLimiter::new(), TokenLimits::from_env())
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;

    use super::*;
    use crate::llm::types::{ChatRequest, ChatResponse, ContentBlock, LlmError, Message};
    use crate::rate_limit::RateLimitConfig;

    /// Owned copy of a [`ChatRequest`] seen by [`MockLlm`].
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub max_tokens: u32,
        pub system: String,
        pub messages: Vec<Message>,
        pub web_search: bool,
        pub response_schema: Option<serde_json::Value>,
    }

    /// Scripted `LlmChat`: pops one queued result per call and records the
    /// request. An empty queue answers `"done"`.
    pub struct MockLlm {
        responses: Mutex<Vec<Result<ChatResponse, LlmError>>>,
        pub requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockLlm {
        #[must_use]
        pub fn new(responses: Vec<Result<ChatResponse, LlmError>>) -> Self {
            Self { responses: Mutex::new(responses), requests: Mutex::new(Vec::new()) }
        }

        #[must_use]
        pub fn replying(text: &str) -> Self {
            Self::new(vec![Ok(text_response(text))])
        }

        #[must_use]
        pub fn failing(err: LlmError) -> Self {
            Self::new(vec![Err(err)])
        }

        pub fn last_request(&self) -> RecordedRequest {
            self.requests
                .lock()
                .unwrap()
                .last()
                .cloned()
                .expect("no request recorded")
        }
    }

    #[async_trait::async_trait]
    impl LlmChat for MockLlm {
        async fn chat(&self, request: ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
            self.requests.lock().unwrap().push(RecordedRequest {
                max_tokens: request.max_tokens,
                system: request.system.to_owned(),
                messages: request.messages.to_vec(),
                web_search: request.web_search,
                response_schema: request.response_schema.cloned(),
            });
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() { Ok(text_response("done")) } else { responses.remove(0) }
        }
    }

    #[must_use]
    pub fn text_response(text: &str) -> ChatResponse {
        ChatResponse {
            content: vec![ContentBlock::Text { text: text.into() }],
            citations: vec![],
            model: "mock".into(),
            stop_reason: "end_turn".into(),
            input_tokens: 10,
            output_tokens: 5,
        }
    }

    fn generous_limiter() -> RateLimiter {
        RateLimiter::with_config(RateLimitConfig { per_client_limit: 1000, global_limit: 1000, ..Default::default() })
    }

    /// Create a test `AppState` with no LLM configured.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(None, generous_limiter(), TokenLimits::default())
    }

    /// Create a test `AppState` with a mock LLM.
    #[must_use]
    pub fn test_app_state_with_llm(llm: Arc<dyn LlmChat>) -> AppState {
        AppState::new(Some(llm), generous_limiter(), TokenLimits::default())
    }

    /// Create a test `AppState` with an explicit limiter.
    #[must_use]
    pub fn test_app_state_with_limiter(llm: Arc<dyn LlmChat>, rate_limiter: RateLimiter) -> AppState {
        AppState::new(Some(llm), rate_limiter, TokenLimits::default())
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
