//! Session aggregate: the full state of one honeypot conversation.
//!
//! Every invariant the orchestrator depends on is enforced here, at the
//! mutation boundary: turn deduplication, the scam-verdict latch, the
//! persona latch, monotone intelligence union, and the one-way completion
//! flip. Callers hold the session's lock while mutating (see the session
//! store port), so each method can assume exclusive access.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PersonaId, SessionId, Timestamp};
use crate::domain::intelligence::ExtractedIntelligence;

use super::{Detection, Turn};

/// State of one ongoing conversation with one counterparty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    turns: Vec<Turn>,
    messages_exchanged: u32,
    detection: Option<Detection>,
    persona: Option<PersonaId>,
    intelligence: ExtractedIntelligence,
    completed: bool,
    completed_at: Option<Timestamp>,
    created_at: Timestamp,
}

impl Session {
    /// Creates a fresh session for a caller-assigned id.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            turns: Vec::new(),
            messages_exchanged: 0,
            detection: None,
            persona: None,
            intelligence: ExtractedIntelligence::new(),
            completed: false,
            completed_at: None,
            created_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Distinct inbound messages processed, not raw HTTP calls.
    pub fn messages_exchanged(&self) -> u32 {
        self.messages_exchanged
    }

    pub fn detection(&self) -> Option<&Detection> {
        self.detection.as_ref()
    }

    /// True once a scam verdict has been latched.
    pub fn scam_detected(&self) -> bool {
        self.detection.as_ref().is_some_and(|d| d.is_scam)
    }

    pub fn persona(&self) -> Option<&PersonaId> {
        self.persona.as_ref()
    }

    pub fn intelligence(&self) -> &ExtractedIntelligence {
        &self.intelligence
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Appends an inbound turn unless it is a transport-level duplicate.
    ///
    /// Returns `true` when the turn was recorded (and the message counter
    /// advanced), `false` when it matched the fingerprint of an already
    /// recorded turn. A turn carrying a timestamp is checked against every
    /// recorded turn; one without a timestamp only against the most recent,
    /// since identical consecutive texts are then indistinguishable from a
    /// retry.
    pub fn record_inbound(&mut self, turn: Turn) -> bool {
        let duplicate = if turn.timestamp.is_some() {
            self.turns.iter().any(|t| t.same_fingerprint(&turn))
        } else {
            self.turns.last().is_some_and(|t| t.same_fingerprint(&turn))
        };
        if duplicate {
            return false;
        }

        self.turns.push(turn);
        self.messages_exchanged += 1;
        true
    }

    /// Appends the reply we sent, for conversation history.
    pub fn record_reply(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Latches the classification verdict.
    ///
    /// Stores only while detection is unset and the session is open; a
    /// latched scam verdict is never overwritten or downgraded. Returns
    /// whether the verdict was stored.
    pub fn record_detection(&mut self, verdict: Detection) -> bool {
        if self.completed || self.detection.is_some() {
            return false;
        }
        self.detection = Some(verdict);
        true
    }

    /// Assigns the persona for the rest of the conversation.
    ///
    /// A persona is locked on first assignment; later calls are no-ops.
    /// Returns whether the persona was assigned.
    pub fn assign_persona(&mut self, persona: PersonaId) -> bool {
        if self.completed || self.persona.is_some() {
            return false;
        }
        self.persona = Some(persona);
        true
    }

    /// Unions freshly extracted intelligence into the session.
    pub fn absorb_intelligence(&mut self, extracted: &ExtractedIntelligence) {
        self.intelligence.merge(extracted);
    }

    /// One-way completion flip.
    ///
    /// Compare-and-set: exactly one caller observes `false` and wins the
    /// flip; everyone else gets `false` back. The winner dispatches the
    /// final report; the flip is never undone, even if delivery fails.
    pub fn try_complete(&mut self, at: Timestamp) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.completed_at = Some(at);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(SessionId::new("sess-1").unwrap())
    }

    #[test]
    fn fresh_session_is_empty_and_open() {
        let s = session();
        assert_eq!(s.messages_exchanged(), 0);
        assert!(s.turns().is_empty());
        assert!(s.detection().is_none());
        assert!(s.persona().is_none());
        assert!(!s.is_completed());
        assert!(!s.scam_detected());
    }

    #[test]
    fn record_inbound_appends_and_counts() {
        let mut s = session();
        assert!(s.record_inbound(Turn::new("scammer", "hello", Some(1))));
        assert!(s.record_inbound(Turn::new("scammer", "pay up", Some(2))));

        assert_eq!(s.messages_exchanged(), 2);
        assert_eq!(s.turns().len(), 2);
    }

    #[test]
    fn duplicate_with_timestamp_is_dropped_anywhere_in_history() {
        let mut s = session();
        assert!(s.record_inbound(Turn::new("scammer", "hello", Some(1))));
        assert!(s.record_inbound(Turn::new("scammer", "pay up", Some(2))));

        // Retry of the first message arrives late.
        assert!(!s.record_inbound(Turn::new("scammer", "hello", Some(1))));
        assert_eq!(s.messages_exchanged(), 2);
    }

    #[test]
    fn duplicate_without_timestamp_only_checks_last_turn() {
        let mut s = session();
        assert!(s.record_inbound(Turn::new("scammer", "ok", None)));
        assert!(!s.record_inbound(Turn::new("scammer", "ok", None)));

        assert!(s.record_inbound(Turn::new("scammer", "send it", None)));
        // Same text again, but an intervening turn exists: treated as genuine.
        assert!(s.record_inbound(Turn::new("scammer", "ok", None)));
        assert_eq!(s.messages_exchanged(), 3);
    }

    #[test]
    fn replies_do_not_advance_the_message_counter() {
        let mut s = session();
        s.record_inbound(Turn::new("scammer", "hello", Some(1)));
        s.record_reply(Turn::new("honeypot", "who is this?", None));

        assert_eq!(s.messages_exchanged(), 1);
        assert_eq!(s.turns().len(), 2);
    }

    #[test]
    fn detection_latches_on_first_verdict() {
        let mut s = session();
        assert!(s.record_detection(Detection::new(true, Some("phishing".into()), 0.9)));
        assert!(!s.record_detection(Detection::benign()));

        let d = s.detection().unwrap();
        assert!(d.is_scam);
        assert_eq!(d.scam_type_label(), "phishing");
    }

    #[test]
    fn benign_verdict_also_latches() {
        let mut s = session();
        assert!(s.record_detection(Detection::benign()));
        assert!(!s.record_detection(Detection::new(true, None, 0.9)));
        assert!(!s.scam_detected());
    }

    #[test]
    fn persona_locks_on_first_assignment() {
        let mut s = session();
        assert!(s.assign_persona(PersonaId::new("naive_elderly")));
        assert!(!s.assign_persona(PersonaId::new("greedy_investor")));

        assert_eq!(s.persona().unwrap().as_str(), "naive_elderly");
    }

    #[test]
    fn try_complete_wins_exactly_once() {
        let mut s = session();
        assert!(s.try_complete(Timestamp::now()));
        assert!(!s.try_complete(Timestamp::now()));
        assert!(s.is_completed());
        assert!(s.completed_at().is_some());
    }

    #[test]
    fn completed_session_rejects_detection_and_persona() {
        let mut s = session();
        s.try_complete(Timestamp::now());

        assert!(!s.record_detection(Detection::benign()));
        assert!(!s.assign_persona(PersonaId::new("naive_elderly")));
    }

    #[test]
    fn intelligence_accumulates_across_turns() {
        let mut s = session();
        let mut first = ExtractedIntelligence::new();
        first.upi_ids.insert("fraud@ybl".to_string());
        s.absorb_intelligence(&first);

        let mut second = ExtractedIntelligence::new();
        second.phone_numbers.insert("9876543210".to_string());
        s.absorb_intelligence(&second);

        assert!(s.intelligence().upi_ids.contains("fraud@ybl"));
        assert!(s.intelligence().phone_numbers.contains("9876543210"));
        assert_eq!(s.intelligence().item_count(), 2);
    }
}
