//! Anthropic Messages API client.
//!
//! Thin HTTP wrapper for `/v1/messages`. Grounding uses the hosted
//! `web_search` server tool; its citations arrive attached to text blocks.
//! Pure parsing in `parse_response` for testability.

use super::config::LlmTimeouts;
use super::types::{ChatRequest, ChatResponse, Citation, ContentBlock, LlmError, Message, push_citation};
use std::time::Duration;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";
const WEB_SEARCH_MAX_USES: u32 = 5;

// =============================================================================
// CLIENT
// =============================================================================

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
}

impl AnthropicClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the TLS backend fails to load.
    pub fn new(api_key: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key })
    }

    /// # Errors
    ///
    /// Returns an [`LlmError`] on transport failure, non-200 status, or an
    /// unparseable body.
    pub async fn chat(&self, model: &str, request: ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
        let body = build_request(model, request);

        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: String,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<serde_json::Value>,
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    content: Vec<ApiBlock>,
    model: String,
    #[serde(default)]
    stop_reason: Option<String>,
    usage: Usage,
}

#[derive(serde::Deserialize)]
#[serde(tag = "type")]
enum ApiBlock {
    #[serde(rename = "text")]
    Text {
        text: String,
        #[serde(default)]
        citations: Option<Vec<ApiCitation>>,
    },
    #[serde(other)]
    Other,
}

#[derive(serde::Deserialize)]
struct ApiCitation {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

#[derive(serde::Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

// =============================================================================
// REQUEST BUILDING
// =============================================================================

fn build_request<'a>(model: &'a str, request: ChatRequest<'a>) -> ApiRequest<'a> {
    let system = match request.response_schema {
        Some(schema) => format!(
            "{}\n\nRespond with a single JSON value that matches this JSON schema, and nothing else:\n{schema}",
            request.system
        ),
        None => request.system.to_owned(),
    };

    let tools = if request.web_search {
        vec![serde_json::json!({
            "type": WEB_SEARCH_TOOL_TYPE,
            "name": "web_search",
            "max_uses": WEB_SEARCH_MAX_USES,
        })]
    } else {
        Vec::new()
    };

    ApiRequest { model, max_tokens: request.max_tokens, system, messages: request.messages, tools }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<ChatResponse, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let mut content = Vec::new();
    let mut citations = Vec::new();
    for block in api.content {
        let ApiBlock::Text { text, citations: cited } = block else {
            continue;
        };
        for c in cited.unwrap_or_default() {
            push_citation(&mut citations, Citation { title: c.title, uri: c.url });
        }
        content.push(ContentBlock::Text { text });
    }

    Ok(ChatResponse {
        content,
        citations,
        model: api.model,
        stop_reason: api.stop_reason.unwrap_or_default(),
        input_tokens: api.usage.input_tokens,
        output_tokens: api.usage.output_tokens,
    })
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
