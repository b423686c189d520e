//! Scam classification verdict.

use serde::{Deserialize, Serialize};

/// Result of classifying a conversation, as produced by the external
/// classifier and latched onto the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Whether the counterparty is attempting fraud.
    pub is_scam: bool,
    /// Category of fraud (phishing, lottery, investment, ...), when known.
    pub scam_type: Option<String>,
    /// Classifier confidence, clamped to [0, 1].
    pub confidence: f32,
}

impl Detection {
    /// Creates a verdict, clamping confidence into [0, 1].
    pub fn new(is_scam: bool, scam_type: Option<String>, confidence: f32) -> Self {
        Self {
            is_scam,
            scam_type,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// A benign verdict with zero confidence.
    pub fn benign() -> Self {
        Self::new(false, None, 0.0)
    }

    /// Scam type label for reporting, "unknown" when unset.
    pub fn scam_type_label(&self) -> &str {
        self.scam_type.as_deref().unwrap_or("unknown")
    }
}
