//! A single message in a honeypot conversation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// One inbound or outbound message, append-only once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Who sent the message, as reported by the transport.
    pub sender: String,
    /// Raw message text.
    pub text: String,
    /// Caller-supplied epoch timestamp, if the transport provided one.
    pub timestamp: Option<i64>,
    /// When this service recorded the turn.
    pub received_at: Timestamp,
}

impl Turn {
    /// Creates a turn recorded now.
    pub fn new(sender: impl Into<String>, text: impl Into<String>, timestamp: Option<i64>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            timestamp,
            received_at: Timestamp::now(),
        }
    }

    /// True when `other` carries the same transport-level content.
    ///
    /// The fingerprint is (sender, text, timestamp); it is the best-effort
    /// idempotency key for retried requests, since the transport guarantees
    /// no request id.
    pub fn same_fingerprint(&self, other: &Turn) -> bool {
        self.sender == other.sender
            && self.text == other.text
            && self.timestamp == other.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_fingerprint_ignores_received_at() {
        let a = Turn::new("scammer", "pay me", Some(1000));
        let mut b = Turn::new("scammer", "pay me", Some(1000));
        b.received_at = Timestamp::from_unix_secs(0);

        assert!(a.same_fingerprint(&b));
    }

    #[test]
    fn fingerprint_differs_on_any_field() {
        let base = Turn::new("scammer", "pay me", Some(1000));

        assert!(!base.same_fingerprint(&Turn::new("victim", "pay me", Some(1000))));
        assert!(!base.same_fingerprint(&Turn::new("scammer", "pay me now", Some(1000))));
        assert!(!base.same_fingerprint(&Turn::new("scammer", "pay me", Some(2000))));
        assert!(!base.same_fingerprint(&Turn::new("scammer", "pay me", None)));
    }
}
