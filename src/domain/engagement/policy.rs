//! Decides when a conversation has collected enough value to finalize.

use crate::domain::session::Session;

/// Default inbound-message cap before a session is finalized regardless
/// of what was collected.
pub const DEFAULT_MAX_MESSAGES: u32 = 16;

/// Pure decision function over a session's current state.
///
/// A session terminates when the message cap is reached, or when a latched
/// scam verdict coincides with at least one actionable identifier. Keyword
/// matches alone indicate tactic, not actionable intelligence, and never
/// terminate. Sessions never classified as scam are only ever stopped by
/// the cap, and stopping them never triggers the final-report callback
/// (the dispatch gate is separate, on `Session::scam_detected`).
#[derive(Debug, Clone)]
pub struct TerminationPolicy {
    max_messages: u32,
}

impl TerminationPolicy {
    /// Creates a policy with the given message cap.
    pub fn new(max_messages: u32) -> Self {
        Self { max_messages }
    }

    /// Inbound-message cap.
    pub fn max_messages(&self) -> u32 {
        self.max_messages
    }

    /// True when the session should stop engaging.
    pub fn should_terminate(&self, session: &Session) -> bool {
        if session.messages_exchanged() >= self.max_messages {
            return true;
        }
        session.scam_detected() && session.intelligence().has_actionable()
    }
}

impl Default for TerminationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::domain::intelligence::ExtractedIntelligence;
    use crate::domain::session::{Detection, Turn};

    fn session_with_messages(count: u32) -> Session {
        let mut s = Session::new(SessionId::new("sess-pol").unwrap());
        for i in 0..count {
            s.record_inbound(Turn::new("scammer", format!("msg {}", i), Some(i as i64)));
        }
        s
    }

    #[test]
    fn terminates_at_message_cap() {
        let policy = TerminationPolicy::new(5);
        assert!(!policy.should_terminate(&session_with_messages(4)));
        assert!(policy.should_terminate(&session_with_messages(5)));
        assert!(policy.should_terminate(&session_with_messages(6)));
    }

    #[test]
    fn scam_with_actionable_intelligence_terminates() {
        let policy = TerminationPolicy::default();
        let mut s = session_with_messages(2);
        s.record_detection(Detection::new(true, Some("upi_fraud".into()), 0.8));

        let mut intel = ExtractedIntelligence::new();
        intel.upi_ids.insert("fraud@ybl".to_string());
        s.absorb_intelligence(&intel);

        assert!(policy.should_terminate(&s));
    }

    #[test]
    fn scam_with_keywords_only_keeps_engaging() {
        let policy = TerminationPolicy::default();
        let mut s = session_with_messages(2);
        s.record_detection(Detection::new(true, Some("phishing".into()), 0.8));

        let mut intel = ExtractedIntelligence::new();
        intel.suspicious_keywords.insert("urgent".to_string());
        intel.suspicious_keywords.insert("otp".to_string());
        s.absorb_intelligence(&intel);

        assert!(!policy.should_terminate(&s));
    }

    #[test]
    fn benign_session_with_identifiers_keeps_engaging() {
        let policy = TerminationPolicy::default();
        let mut s = session_with_messages(2);
        s.record_detection(Detection::benign());

        let mut intel = ExtractedIntelligence::new();
        intel.phone_numbers.insert("9876543210".to_string());
        s.absorb_intelligence(&intel);

        assert!(!policy.should_terminate(&s));
    }

    #[test]
    fn unclassified_session_keeps_engaging() {
        let policy = TerminationPolicy::default();
        let mut s = session_with_messages(3);

        let mut intel = ExtractedIntelligence::new();
        intel.bank_accounts.insert("12345678901".to_string());
        s.absorb_intelligence(&intel);

        assert!(!policy.should_terminate(&s));
    }
}
