//! OpenAI-compatible API client.
//!
//! Supports both `/v1/chat/completions` and `/v1/responses` endpoints.
//! Grounding maps to `web_search_options` or the `web_search_preview` tool
//! respectively; either way citations come back as `url_citation`
//! annotations on the output text.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::config::{LlmTimeouts, OpenAiApiMode};
use super::types::{ChatRequest, ChatResponse, Citation, ContentBlock, LlmError, Message, push_citation};

/// Name attached to structured-output schemas; providers require one.
const SCHEMA_NAME: &str = "folio_output";

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    mode: OpenAiApiMode,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the TLS backend fails to load.
    pub fn new(
        api_key: String,
        mode: OpenAiApiMode,
        base_url: String,
        timeouts: LlmTimeouts,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url, mode })
    }

    /// # Errors
    ///
    /// Returns an [`LlmError`] on transport failure, non-200 status, or an
    /// unparseable body.
    pub async fn chat(&self, model: &str, request: ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
        match self.mode {
            OpenAiApiMode::ChatCompletions => {
                let body = build_chat_completions_request(model, request);
                let text = self.send_json("/chat/completions", &body).await?;
                parse_chat_completions_response(&text)
            }
            OpenAiApiMode::Responses => {
                let body = build_responses_request(model, request);
                let text = self.send_json("/responses", &body).await?;
                parse_responses_response(&text)
            }
        }
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
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
        Ok(text)
    }
}

// =============================================================================
// CHAT COMPLETIONS: wire types
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<CcMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_search_options: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
}

#[derive(Serialize)]
struct CcMessage<'a> {
    role: &'a str,
    content: String,
}

fn build_chat_completions_request<'a>(model: &'a str, request: ChatRequest<'a>) -> CcRequest<'a> {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    if !request.system.trim().is_empty() {
        messages.push(CcMessage { role: "system", content: request.system.to_owned() });
    }
    messages.extend(request.messages.iter().map(cc_message));

    CcRequest {
        model,
        max_tokens: request.max_tokens,
        messages,
        web_search_options: request.web_search.then(|| serde_json::json!({})),
        response_format: request.response_schema.map(|schema| {
            serde_json::json!({
                "type": "json_schema",
                "json_schema": { "name": SCHEMA_NAME, "schema": schema },
            })
        }),
    }
}

fn cc_message(message: &Message) -> CcMessage<'_> {
    CcMessage { role: &message.role, content: message.content.text() }
}

// =============================================================================
// RESPONSES: wire types
// =============================================================================

#[derive(Serialize)]
struct RespRequest<'a> {
    model: &'a str,
    max_output_tokens: u32,
    instructions: &'a str,
    input: Vec<RespInputItem<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<Value>,
}

#[derive(Serialize)]
struct RespInputItem<'a> {
    #[serde(rename = "type")]
    item_type: &'static str,
    role: &'a str,
    content: Vec<RespTextContent>,
}

#[derive(Serialize)]
struct RespTextContent {
    #[serde(rename = "type")]
    content_type: &'static str,
    text: String,
}

fn build_responses_request<'a>(model: &'a str, request: ChatRequest<'a>) -> RespRequest<'a> {
    let input = request
        .messages
        .iter()
        .map(|message| RespInputItem {
            item_type: "message",
            role: &message.role,
            content: vec![RespTextContent {
                // Prior assistant turns are replayed as output text.
                content_type: if message.role == "assistant" { "output_text" } else { "input_text" },
                text: message.content.text(),
            }],
        })
        .collect();

    let tools = if request.web_search { vec![serde_json::json!({ "type": "web_search_preview" })] } else { Vec::new() };

    RespRequest {
        model,
        max_output_tokens: request.max_tokens,
        instructions: request.system,
        input,
        tools,
        text: request.response_schema.map(|schema| {
            serde_json::json!({
                "format": { "type": "json_schema", "name": SCHEMA_NAME, "schema": schema },
            })
        }),
    }
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

fn url_citation(annotation: &Value) -> Option<Citation> {
    if annotation.get("type").and_then(Value::as_str) != Some("url_citation") {
        return None;
    }
    // Chat Completions nests the fields; Responses puts them inline.
    let fields = annotation.get("url_citation").unwrap_or(annotation);
    Some(Citation {
        title: fields.get("title").and_then(Value::as_str).map(str::to_owned),
        uri: fields.get("url").and_then(Value::as_str).map(str::to_owned),
    })
}

fn collect_annotations(source: &Value, citations: &mut Vec<Citation>) {
    let Some(annotations) = source.get("annotations").and_then(Value::as_array) else {
        return;
    };
    for citation in annotations.iter().filter_map(url_citation) {
        push_citation(citations, citation);
    }
}

fn usage_field(root: &Value, key: &str) -> u64 {
    root.get("usage")
        .and_then(|u| u.get(key))
        .and_then(Value::as_u64)
        .unwrap_or(0)
}

pub(crate) fn parse_chat_completions_response(json_text: &str) -> Result<ChatResponse, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let model = root
        .get("model")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default();

    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0]".to_string()));
    };
    let finish_reason = choice
        .get("finish_reason")
        .and_then(Value::as_str)
        .unwrap_or("stop");
    let message = choice.get("message").cloned().unwrap_or(Value::Null);

    let mut content = Vec::new();
    if let Some(text) = message.get("content").and_then(Value::as_str) {
        if !text.is_empty() {
            content.push(ContentBlock::Text { text: text.to_string() });
        }
    }
    let mut citations = Vec::new();
    collect_annotations(&message, &mut citations);

    let stop_reason = if finish_reason == "length" { "max_tokens" } else { "end_turn" };

    Ok(ChatResponse {
        content,
        citations,
        model,
        stop_reason: stop_reason.to_string(),
        input_tokens: usage_field(&root, "prompt_tokens"),
        output_tokens: usage_field(&root, "completion_tokens"),
    })
}

pub(crate) fn parse_responses_response(json_text: &str) -> Result<ChatResponse, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let model = root
        .get("model")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default();

    let mut content = Vec::new();
    let mut citations = Vec::new();
    if let Some(items) = root.get("output").and_then(Value::as_array) {
        for item in items {
            if item.get("type").and_then(Value::as_str) != Some("message") {
                continue;
            }
            let Some(parts) = item.get("content").and_then(Value::as_array) else {
                continue;
            };
            for part in parts {
                let kind = part.get("type").and_then(Value::as_str);
                let text = part.get("text").and_then(Value::as_str).unwrap_or("");
                if matches!(kind, Some("output_text" | "text")) && !text.is_empty() {
                    content.push(ContentBlock::Text { text: text.to_string() });
                }
                collect_annotations(part, &mut citations);
            }
        }
    } else if let Some(output_text) = root.get("output_text").and_then(Value::as_str) {
        if !output_text.is_empty() {
            content.push(ContentBlock::Text { text: output_text.to_string() });
        }
    }

    let truncated = root
        .get("incomplete_details")
        .and_then(|d| d.get("reason"))
        .and_then(Value::as_str)
        == Some("max_output_tokens");

    Ok(ChatResponse {
        content,
        citations,
        model,
        stop_reason: if truncated { "max_tokens" } else { "end_turn" }.to_string(),
        input_tokens: usage_field(&root, "input_tokens"),
        output_tokens: usage_field(&root, "output_tokens"),
    })
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
