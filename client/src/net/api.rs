//! HTTP helpers for the chat and generation endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning fallback values since these calls are
//! only made from browser event handlers.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here returns an error. Transport failures, non-2xx statuses and
//! undecodable bodies all fold into the same fallback a failed generation
//! would produce, so pages never branch on network state.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{ChatTurnReply, ChatTurnRequest, Flashcard, MindMapNode};
#[cfg(feature = "hydrate")]
use super::types::TopicRequest;

pub const CHAT_ENDPOINT: &str = "/api/chat";
pub const FLASHCARDS_ENDPOINT: &str = "/api/generate/flashcards";
pub const MIND_MAP_ENDPOINT: &str = "/api/generate/mind-map";

#[cfg(any(test, feature = "hydrate"))]
fn transport_failed_reason(err: &str) -> String {
    format!("transport: {err}")
}

#[cfg(any(test, feature = "hydrate"))]
fn status_failed_reason(status: u16) -> String {
    format!("chat request failed: {status}")
}

/// Send one chat turn to `POST /api/chat`.
///
/// The server answers rate-limit and no-provider conditions with a non-2xx
/// status and a `failed` body; either way the caller gets a reply.
pub async fn send_chat_turn(request: &ChatTurnRequest) -> ChatTurnReply {
    #[cfg(feature = "hydrate")]
    {
        let req = match gloo_net::http::Request::post(CHAT_ENDPOINT).json(request) {
            Ok(req) => req,
            Err(e) => return ChatTurnReply::failed(transport_failed_reason(&e.to_string())),
        };
        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                log::warn!("chat request failed: {e}");
                return ChatTurnReply::failed(transport_failed_reason(&e.to_string()));
            }
        };
        let status = resp.status();
        match resp.json::<ChatTurnReply>().await {
            Ok(reply) if resp.ok() || !reply.is_ok() => reply,
            _ => ChatTurnReply::failed(status_failed_reason(status)),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        ChatTurnReply::failed("not available on server")
    }
}

/// Fetch a generated deck from `POST /api/generate/flashcards`.
/// Returns an empty deck on any failure.
pub async fn generate_flashcards(topic: &str) -> Vec<Flashcard> {
    #[cfg(feature = "hydrate")]
    {
        post_topic::<Vec<Flashcard>>(FLASHCARDS_ENDPOINT, topic).await.unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = topic;
        Vec::new()
    }
}

/// Fetch a generated outline from `POST /api/generate/mind-map`.
/// Returns a single-node map labelled with the topic on any failure.
pub async fn generate_mind_map(topic: &str) -> MindMapNode {
    #[cfg(feature = "hydrate")]
    {
        post_topic::<MindMapNode>(MIND_MAP_ENDPOINT, topic)
            .await
            .unwrap_or_else(|| MindMapNode::placeholder(topic))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        MindMapNode::placeholder(topic)
    }
}

#[cfg(feature = "hydrate")]
async fn post_topic<T: serde::de::DeserializeOwned>(endpoint: &str, topic: &str) -> Option<T> {
    let body = TopicRequest { topic: topic.to_owned() };
    let resp = gloo_net::http::Request::post(endpoint)
        .json(&body)
        .ok()?
        .send()
        .await
        .map_err(|e| log::warn!("{endpoint} failed: {e}"))
        .ok()?;
    if !resp.ok() {
        log::warn!("{endpoint} returned {}", resp.status());
        return None;
    }
    resp.json::<T>()
        .await
        .map_err(|e| log::warn!("{endpoint} returned an unreadable body: {e}"))
        .ok()
}
