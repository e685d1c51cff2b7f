//! Google Gemini `generateContent` client.
//!
//! Grounding uses the `google_search` tool; the consulted pages come back in
//! `groundingMetadata.groundingChunks`, not inline with the text.
//! Structured output uses `responseMimeType` plus `responseSchema`, whose
//! type names are the upper-case OpenAPI spelling.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{ChatRequest, ChatResponse, Citation, ContentBlock, LlmError, Message, ROLE_ASSISTANT, push_citation};

const ROLE_MODEL: &str = "model";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the TLS backend fails to load.
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    /// # Errors
    ///
    /// Returns an [`LlmError`] on transport failure, non-200 status, or an
    /// unparseable body.
    pub async fn chat(&self, model: &str, request: ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
        let body = build_request(request);
        let url = format!("{}/models/{model}:generateContent", self.base_url);

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
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

        parse_response(&text, model)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

// =============================================================================
// REQUEST BUILDING
// =============================================================================

fn content_for(message: &Message) -> GeminiContent {
    let role = if message.role == ROLE_ASSISTANT { ROLE_MODEL } else { "user" };
    GeminiContent { role: Some(role), parts: vec![GeminiPart { text: message.content.text() }] }
}

fn build_request(request: ChatRequest<'_>) -> GenerateRequest {
    let system_instruction = (!request.system.trim().is_empty())
        .then(|| GeminiContent { role: None, parts: vec![GeminiPart { text: request.system.to_owned() }] });

    let tools = if request.web_search { vec![serde_json::json!({ "google_search": {} })] } else { Vec::new() };

    GenerateRequest {
        contents: request.messages.iter().map(content_for).collect(),
        system_instruction,
        tools,
        generation_config: GenerationConfig {
            max_output_tokens: request.max_tokens,
            response_mime_type: request.response_schema.map(|_| "application/json"),
            response_schema: request.response_schema.map(openapi_schema),
        },
    }
}

/// Copy of `schema` with every `"type"` value upper-cased.
fn openapi_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let value = match (key.as_str(), value) {
                        ("type", Value::String(name)) => Value::String(name.to_ascii_uppercase()),
                        _ => openapi_schema(value),
                    };
                    (key.clone(), value)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(openapi_schema).collect()),
        other => other.clone(),
    }
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

fn parse_response(json_text: &str, requested_model: &str) -> Result<ChatResponse, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let Some(candidate) = root
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("generateContent: missing candidates[0]".to_string()));
    };

    let mut content = Vec::new();
    if let Some(parts) = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
    {
        for part in parts {
            if part.get("thought").and_then(Value::as_bool) == Some(true) {
                continue;
            }
            if let Some(text) = part.get("text").and_then(Value::as_str) {
                if !text.is_empty() {
                    content.push(ContentBlock::Text { text: text.to_string() });
                }
            }
        }
    }

    let mut citations = Vec::new();
    if let Some(chunks) = candidate
        .get("groundingMetadata")
        .and_then(|m| m.get("groundingChunks"))
        .and_then(Value::as_array)
    {
        for web in chunks.iter().filter_map(|chunk| chunk.get("web")) {
            push_citation(
                &mut citations,
                Citation {
                    title: web.get("title").and_then(Value::as_str).map(str::to_owned),
                    uri: web.get("uri").and_then(Value::as_str).map(str::to_owned),
                },
            );
        }
    }

    let stop_reason = match candidate.get("finishReason").and_then(Value::as_str) {
        Some("MAX_TOKENS") => "max_tokens",
        _ => "end_turn",
    };
    let usage = |key: &str| {
        root.get("usageMetadata")
            .and_then(|u| u.get(key))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    };

    Ok(ChatResponse {
        content,
        citations,
        model: root
            .get("modelVersion")
            .and_then(Value::as_str)
            .unwrap_or(requested_model)
            .to_owned(),
        stop_reason: stop_reason.to_string(),
        input_tokens: usage("promptTokenCount"),
        output_tokens: usage("candidatesTokenCount"),
    })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
