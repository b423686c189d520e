//! Final-report payload sent to the evaluation endpoint.

use serde::{Deserialize, Serialize};

use super::Session;

/// Report payload, shaped exactly as the evaluation endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    pub session_id: String,
    pub scam_detected: bool,
    pub total_messages_exchanged: u32,
    pub extracted_intelligence: ReportedIntelligence,
    pub agent_notes: String,
}

/// Extracted sets serialized as ordered lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedIntelligence {
    pub bank_accounts: Vec<String>,
    pub upi_ids: Vec<String>,
    pub phishing_links: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub suspicious_keywords: Vec<String>,
}

impl FinalReport {
    /// Builds the report from a session's current state.
    ///
    /// Callers snapshot under the session lock so the payload matches the
    /// state that won the completion flip.
    pub fn from_session(session: &Session) -> Self {
        let intel = session.intelligence();
        Self {
            session_id: session.id().to_string(),
            scam_detected: session.scam_detected(),
            total_messages_exchanged: session.messages_exchanged(),
            extracted_intelligence: ReportedIntelligence {
                bank_accounts: intel.bank_accounts.iter().cloned().collect(),
                upi_ids: intel.upi_ids.iter().cloned().collect(),
                phishing_links: intel.phishing_links.iter().cloned().collect(),
                phone_numbers: intel.phone_numbers.iter().cloned().collect(),
                suspicious_keywords: intel.suspicious_keywords.iter().cloned().collect(),
            },
            agent_notes: build_agent_notes(session),
        }
    }
}

/// Deterministic free-text summary; no extra model call.
fn build_agent_notes(session: &Session) -> String {
    let scam_type = session
        .detection()
        .map(|d| d.scam_type_label().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let intel = session.intelligence();

    let mut parts = vec![format!("Scam type: {}.", scam_type)];
    if !intel.suspicious_keywords.is_empty() {
        let sample: Vec<&str> = intel
            .suspicious_keywords
            .iter()
            .take(8)
            .map(String::as_str)
            .collect();
        parts.push(format!("Keywords: {}.", sample.join(", ")));
    }
    if !intel.upi_ids.is_empty() {
        parts.push(format!("UPI IDs captured: {}.", intel.upi_ids.len()));
    }
    if !intel.bank_accounts.is_empty() {
        parts.push(format!(
            "Bank accounts captured: {}.",
            intel.bank_accounts.len()
        ));
    }
    if !intel.phone_numbers.is_empty() {
        parts.push(format!(
            "Phone numbers captured: {}.",
            intel.phone_numbers.len()
        ));
    }
    if !intel.phishing_links.is_empty() {
        parts.push(format!("Links captured: {}.", intel.phishing_links.len()));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::domain::intelligence::ExtractedIntelligence;
    use crate::domain::session::{Detection, Turn};

    fn scam_session() -> Session {
        let mut s = Session::new(SessionId::new("sess-7").unwrap());
        s.record_inbound(Turn::new("scammer", "share your upi", Some(1)));
        s.record_detection(Detection::new(true, Some("phishing".into()), 0.9));

        let mut intel = ExtractedIntelligence::new();
        intel.upi_ids.insert("fraud@ybl".to_string());
        intel.upi_ids.insert("alt@paytm".to_string());
        intel.suspicious_keywords.insert("otp".to_string());
        s.absorb_intelligence(&intel);
        s
    }

    #[test]
    fn report_fields_mirror_session_state() {
        let report = FinalReport::from_session(&scam_session());

        assert_eq!(report.session_id, "sess-7");
        assert!(report.scam_detected);
        assert_eq!(report.total_messages_exchanged, 1);
        assert_eq!(
            report.extracted_intelligence.upi_ids,
            vec!["alt@paytm".to_string(), "fraud@ybl".to_string()]
        );
        assert_eq!(
            report.extracted_intelligence.suspicious_keywords,
            vec!["otp".to_string()]
        );
    }

    #[test]
    fn report_serializes_with_wire_field_names() {
        let report = FinalReport::from_session(&scam_session());
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("sessionId").is_some());
        assert!(json.get("scamDetected").is_some());
        assert!(json.get("totalMessagesExchanged").is_some());
        let intel = json.get("extractedIntelligence").unwrap();
        assert!(intel.get("bankAccounts").is_some());
        assert!(intel.get("upiIds").is_some());
        assert!(intel.get("phishingLinks").is_some());
        assert!(intel.get("phoneNumbers").is_some());
        assert!(intel.get("suspiciousKeywords").is_some());
        assert!(json.get("agentNotes").is_some());
    }

    #[test]
    fn agent_notes_summarize_captures() {
        let report = FinalReport::from_session(&scam_session());

        assert!(report.agent_notes.contains("Scam type: phishing."));
        assert!(report.agent_notes.contains("UPI IDs captured: 2."));
        assert!(report.agent_notes.contains("Keywords: otp."));
        assert!(!report.agent_notes.contains("Bank accounts"));
    }

    #[test]
    fn notes_for_unclassified_session_say_unknown() {
        let s = Session::new(SessionId::new("sess-8").unwrap());
        let report = FinalReport::from_session(&s);

        assert_eq!(report.agent_notes, "Scam type: unknown.");
        assert!(!report.scam_detected);
    }

    #[test]
    fn ordered_lists_are_sorted() {
        let report = FinalReport::from_session(&scam_session());
        let upis = &report.extracted_intelligence.upi_ids;
        let mut sorted = upis.clone();
        sorted.sort();
        assert_eq!(upis, &sorted);
    }
}
