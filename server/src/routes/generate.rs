//! Study material generation routes.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use client::net::types::{Flashcard, MindMapNode, TopicRequest};

use crate::routes::gate;
use crate::services::generate;
use crate::state::AppState;

/// `POST /api/generate/flashcards`: a deck for `topic`, `[]` on failure.
pub async fn flashcards(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<TopicRequest>,
) -> Result<Json<Vec<Flashcard>>, StatusCode> {
    let llm = gate::admit(&state, &headers, "flashcards").map_err(|refusal| refusal.status())?;
    Ok(Json(generate::generate_flashcards(llm.as_ref(), &body.topic, state.limits.generate).await))
}

/// `POST /api/generate/mind-map`: a map for `topic`, a lone root on failure.
pub async fn mind_map(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<TopicRequest>,
) -> Result<Json<MindMapNode>, StatusCode> {
    let llm = gate::admit(&state, &headers, "mind_map").map_err(|refusal| refusal.status())?;
    Ok(Json(generate::generate_mind_map(llm.as_ref(), &body.topic, state.limits.generate).await))
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
