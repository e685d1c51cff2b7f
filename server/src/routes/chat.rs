//! Chat route.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use client::net::types::{ChatTurnReply, ChatTurnRequest};

use crate::routes::gate;
use crate::services::chat;
use crate::state::AppState;

/// `POST /api/chat`: run one conversational turn.
///
/// Provider failures are a `200` with a `failed` reply; only refusals
/// (no LLM, rate limited) change the status code.
pub async fn send_turn(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ChatTurnRequest>,
) -> Result<Json<ChatTurnReply>, (StatusCode, Json<ChatTurnReply>)> {
    let llm = gate::admit(&state, &headers, "chat")
        .map_err(|refusal| (refusal.status(), Json(ChatTurnReply::failed(refusal.reason()))))?;

    Ok(Json(chat::send_chat_turn(llm.as_ref(), &body, state.limits.chat).await))
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
