pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::gateway::handlers as gateway;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Chat API
        .route("/api/v1/check-key", get(chat::handle_check_key))
        .route("/api/v1/chat/starter", get(chat::handle_starter))
        .route("/api/v1/chat", post(chat::handle_chat))
        // Gateway API
        .route("/api/v1/augment", post(gateway::handle_augment))
        .with_state(state)
}
