#![recursion_limit = "256"]

mod error;
mod llm;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let port: u16 = match std::env::var("PORT").unwrap_or_else(|_| "3000".into()).parse() {
        Ok(port) => port,
        Err(e) => {
            tracing::error!(error = %e, "invalid PORT");
            return;
        }
    };

    // Initialize LLM client (non-fatal: AI features answer 503 if config missing).
    let llm: Option<Arc<dyn llm::LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(provider = client.provider(), model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured; AI features disabled");
            None
        }
    };

    let state = state::AppState::from_env(llm);
    tracing::info!(chat_max_tokens = state.limits.chat, generate_max_tokens = state.limits.generate, "limits");

    let app = match routes::leptos_app(state) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "failed to build router");
            return;
        }
    };

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %port, "failed to bind");
            return;
        }
    };

    tracing::info!(%port, "folio listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
    }
}
