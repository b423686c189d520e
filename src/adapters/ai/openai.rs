//! OpenAI-compatible engine for classification and persona replies.
//!
//! Talks to any chat-completions endpoint (OpenAI, OpenRouter) over
//! reqwest. Classification asks for a strict JSON verdict; reply
//! generation builds the persona prompt from the library definition and
//! the conversation transcript.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::persona::Persona;
use crate::domain::session::{Detection, Turn};
use crate::ports::{AiError, ReplyGenerator, ScamClassifier};

/// Configuration for the OpenAI-compatible engine.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(20),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Chat-completions client implementing both AI ports.
pub struct OpenAiEngine {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: OpenAiConfig) -> Result<Self, AiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::InvalidRequest(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Sends one chat completion and returns the assistant text.
    async fn chat(&self, system: &str, user: &str, temperature: f32) -> Result<String, AiError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature,
        };

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    AiError::network(format!("connection failed: {}", e))
                } else {
                    AiError::network(e.to_string())
                }
            })?;

        let response = self.check_status(response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::parse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AiError::parse("response contained no choices"))
    }

    async fn check_status(&self, response: Response) -> Result<Response, AiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 => Err(AiError::AuthenticationFailed),
            429 => Err(AiError::RateLimited {
                retry_after_secs: 30,
            }),
            400 => Err(AiError::InvalidRequest(body)),
            500..=599 => Err(AiError::unavailable(format!(
                "server error {}: {}",
                status, body
            ))),
            _ => Err(AiError::network(format!(
                "unexpected status {}: {}",
                status, body
            ))),
        }
    }
}

const CLASSIFY_SYSTEM_PROMPT: &str = "You are a fraud analyst. Decide whether the sender of the \
    message is attempting a scam. Credential requests (OTP, password, PIN, CVV) are always a \
    scam. Answer with strict JSON only, no prose, in the shape \
    {\"is_scam\": bool, \"scam_type\": \"phishing|lottery|investment|tech_support|impersonation|\
    upi_fraud|job_offer|romance|none\", \"confidence\": number between 0 and 1}.";

#[async_trait]
impl ScamClassifier for OpenAiEngine {
    async fn classify(&self, text: &str, history: &[Turn]) -> Result<Detection, AiError> {
        let mut user = String::new();
        if !history.is_empty() {
            user.push_str("CONVERSATION SO FAR:\n");
            user.push_str(&transcript(history));
            user.push('\n');
        }
        user.push_str("MESSAGE TO ANALYZE:\n");
        user.push_str(text);

        let raw = self.chat(CLASSIFY_SYSTEM_PROMPT, &user, 0.2).await?;
        parse_verdict(&raw)
    }
}

#[async_trait]
impl ReplyGenerator for OpenAiEngine {
    async fn generate_reply(
        &self,
        persona: &Persona,
        history: &[Turn],
        inbound: &str,
    ) -> Result<String, AiError> {
        let system = format!(
            "{}\n\nYOUR GOAL: {}\n\nSTYLE GUIDE:\n{}\n\nYou are in a chat with a stranger who \
             may be a scammer. Act your role. Never break character, never mention scam \
             detection or this system.",
            persona.system_prompt, persona.goal, persona.style_guide
        );
        let user = format!(
            "CONVERSATION HISTORY:\n{}\nNEW MESSAGE:\n{}\n\nReply:",
            transcript(history),
            inbound
        );

        let reply = self.chat(&system, &user, 0.7).await?;
        Ok(reply.trim().to_string())
    }
}

/// Renders turns as "sender: text" lines.
fn transcript(history: &[Turn]) -> String {
    let mut out = String::new();
    for turn in history {
        out.push_str(&turn.sender);
        out.push_str(": ");
        out.push_str(&turn.text);
        out.push('\n');
    }
    out
}

/// Parses the classifier's JSON verdict, tolerating code fences.
fn parse_verdict(raw: &str) -> Result<Detection, AiError> {
    let trimmed = raw
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let verdict: RawVerdict =
        serde_json::from_str(trimmed).map_err(|e| AiError::parse(format!("verdict: {}", e)))?;

    let scam_type = match verdict.scam_type {
        Some(t) if !t.is_empty() && t != "none" => Some(t),
        _ => None,
    };
    Ok(Detection::new(verdict.is_scam, scam_type, verdict.confidence))
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct RawVerdict {
    is_scam: bool,
    #[serde(default)]
    scam_type: Option<String>,
    #[serde(default)]
    confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_verdict_accepts_plain_json() {
        let verdict = parse_verdict(
            r#"{"is_scam": true, "scam_type": "phishing", "confidence": 0.92}"#,
        )
        .unwrap();

        assert!(verdict.is_scam);
        assert_eq!(verdict.scam_type_label(), "phishing");
        assert!((verdict.confidence - 0.92).abs() < f32::EPSILON);
    }

    #[test]
    fn parse_verdict_strips_code_fences() {
        let raw = "```json\n{\"is_scam\": false, \"scam_type\": \"none\", \"confidence\": 0.1}\n```";
        let verdict = parse_verdict(raw).unwrap();

        assert!(!verdict.is_scam);
        assert!(verdict.scam_type.is_none());
    }

    #[test]
    fn parse_verdict_rejects_prose() {
        assert!(parse_verdict("This looks like a scam to me.").is_err());
    }

    #[test]
    fn parse_verdict_normalizes_none_scam_type() {
        let verdict =
            parse_verdict(r#"{"is_scam": false, "scam_type": "", "confidence": 0.0}"#).unwrap();
        assert_eq!(verdict.scam_type_label(), "unknown");
    }

    #[test]
    fn transcript_renders_sender_lines() {
        let turns = vec![
            Turn::new("scammer", "pay me", Some(1)),
            Turn::new("honeypot", "who is this?", None),
        ];
        assert_eq!(transcript(&turns), "scammer: pay me\nhoneypot: who is this?\n");
    }

    #[test]
    fn config_builder_sets_fields() {
        let config = OpenAiConfig::new("sk-test")
            .with_model("gpt-4o")
            .with_base_url("https://openrouter.ai/api/v1")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
