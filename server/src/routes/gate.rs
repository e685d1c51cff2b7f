//! Admission checks shared by every AI route.
//!
//! A request is admitted when an LLM is configured and the caller is within
//! its rate limits. The LLM check runs first so that a server without a key
//! does not burn rate-limit slots.

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use tracing::warn;

use crate::error::ErrorCode;
use crate::llm::LlmChat;
use crate::rate_limit::RateLimitError;
use crate::state::AppState;

/// Key used when the request carries no forwarding headers.
pub const ANONYMOUS_CLIENT: &str = "anonymous";

pub const NOT_CONFIGURED_REASON: &str = "assistant is not configured on this server";

/// Why an AI request was turned away.
#[derive(Debug)]
pub enum Refusal {
    NotConfigured,
    RateLimited(RateLimitError),
}

impl Refusal {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::NotConfigured => NOT_CONFIGURED_REASON.to_owned(),
            Self::RateLimited(e) => e.to_string(),
        }
    }
}

/// Caller identity for rate limiting: first `x-forwarded-for` hop, then
/// `x-real-ip`, then [`ANONYMOUS_CLIENT`].
#[must_use]
pub fn client_key(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    };
    header("x-forwarded-for")
        .or_else(|| header("x-real-ip"))
        .unwrap_or_else(|| ANONYMOUS_CLIENT.to_owned())
}

/// Admit one AI request, returning the client to call.
///
/// # Errors
///
/// Returns a [`Refusal`] when no LLM is configured or a limit is exceeded.
pub fn admit(state: &AppState, headers: &HeaderMap, route: &'static str) -> Result<Arc<dyn LlmChat>, Refusal> {
    let Some(llm) = state.llm.clone() else {
        warn!(route, "ai: request refused, LLM not configured");
        return Err(Refusal::NotConfigured);
    };
    let client = client_key(headers);
    if let Err(e) = state.rate_limiter.check_and_record(&client) {
        warn!(route, %client, code = e.error_code(), error = %e, "ai: request rate limited");
        return Err(Refusal::RateLimited(e));
    }
    Ok(llm)
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
