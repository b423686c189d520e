//! HTTP DTOs for the honeypot endpoint.
//!
//! These types decouple the wire contract from domain types.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One inbound message for one conversation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoneypotRequest {
    pub session_id: String,
    pub message: InboundMessage,
    /// Prior history as reported by the transport; the session keeps its
    /// own authoritative transcript, so this is accepted but not trusted.
    #[serde(default)]
    pub conversation_history: Option<Vec<serde_json::Value>>,
    /// Channel, language, locale and similar transport metadata.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// The message body within a request.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub sender: String,
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Successful conversational reply.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyResponse {
    pub status: String,
    pub reply: String,
}

impl ReplyResponse {
    pub fn success(reply: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            reply: reply.into(),
        }
    }
}

/// Well-formed JSON error body; internal failures never leak details.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            service: "honeytrap".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_minimal_body() {
        let json = r#"{
            "sessionId": "abc-123",
            "message": {"sender": "scammer", "text": "pay me"}
        }"#;
        let req: HoneypotRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.session_id, "abc-123");
        assert_eq!(req.message.sender, "scammer");
        assert_eq!(req.message.text, "pay me");
        assert!(req.message.timestamp.is_none());
        assert!(req.conversation_history.is_none());
    }

    #[test]
    fn request_deserializes_full_body() {
        let json = r#"{
            "sessionId": "abc-123",
            "message": {"sender": "scammer", "text": "pay me", "timestamp": 1717000000},
            "conversationHistory": [{"sender": "scammer", "text": "hi"}],
            "metadata": {"channel": "SMS", "language": "en"}
        }"#;
        let req: HoneypotRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.message.timestamp, Some(1717000000));
        assert_eq!(req.conversation_history.unwrap().len(), 1);
        assert!(req.metadata.is_some());
    }

    #[test]
    fn reply_response_serializes_status_and_reply() {
        let json = serde_json::to_value(ReplyResponse::success("hello")).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["reply"], "hello");
    }

    #[test]
    fn error_response_serializes_error_status() {
        let json = serde_json::to_value(ErrorResponse::bad_request("missing text")).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "missing text");
    }
}
