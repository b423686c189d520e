//! HTTP routes for the honeypot service.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, receive_message, HoneypotHandlers};

/// Creates the router with all endpoints.
pub fn honeypot_routes(handlers: HoneypotHandlers) -> Router {
    Router::new()
        .route("/honeypot", post(receive_message))
        .route("/health", get(health))
        .with_state(handlers)
}
