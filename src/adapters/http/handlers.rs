//! HTTP handlers for the honeypot endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{HandleMessageCommand, MessageOrchestrator};
use crate::domain::foundation::SessionId;

use super::dto::{ErrorResponse, HealthResponse, HoneypotRequest, ReplyResponse};

/// Shared handler state.
#[derive(Clone)]
pub struct HoneypotHandlers {
    orchestrator: Arc<MessageOrchestrator>,
}

impl HoneypotHandlers {
    pub fn new(orchestrator: Arc<MessageOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

/// POST /honeypot - Process one inbound message
///
/// Input errors are rejected here, before any session mutation. Once a
/// request reaches the orchestrator the response is always a success
/// reply; internal failures degrade inside the orchestrator.
pub async fn receive_message(
    State(handlers): State<HoneypotHandlers>,
    Json(req): Json<HoneypotRequest>,
) -> Response {
    let session_id = match SessionId::new(req.session_id) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    if req.message.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("message text cannot be empty")),
        )
            .into_response();
    }

    let sender = if req.message.sender.trim().is_empty() {
        "unknown".to_string()
    } else {
        req.message.sender
    };

    let cmd = HandleMessageCommand {
        session_id,
        sender,
        text: req.message.text,
        timestamp: req.message.timestamp,
    };

    let result = handlers.orchestrator.handle(cmd).await;
    (StatusCode::OK, Json(ReplyResponse::success(result.reply))).into_response()
}

/// GET /health - Liveness probe
pub async fn health() -> Response {
    (StatusCode::OK, Json(HealthResponse::ok())).into_response()
}
