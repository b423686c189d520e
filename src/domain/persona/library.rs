//! Persona definitions and selection.
//!
//! Personas are fixed at build time. Selection is deterministic: a scam
//! type maps to the persona listed for it, everything else falls back to
//! the neutral busy-professional. Once a session has locked a persona it
//! is only ever looked up by id.

use crate::domain::foundation::PersonaId;

/// A human-like identity the honeypot plays for one conversation.
#[derive(Debug, Clone)]
pub struct Persona {
    /// Library key, stored on the session.
    pub id: PersonaId,
    /// Human readable name.
    pub name: &'static str,
    /// High level role description.
    pub role: &'static str,
    /// Scam types this persona draws out best.
    pub relevant_scam_types: &'static [&'static str],
    /// Core personality instructions for the reply generator.
    pub system_prompt: &'static str,
    /// How they speak: length, tone, clarification habits.
    pub style_guide: &'static str,
    /// What this persona is trying to get the counterparty to reveal.
    pub goal: &'static str,
}

/// The neutral fallback persona id.
const NEUTRAL_ID: &str = "skeptical_busy";

/// Fixed set of personas with deterministic scam-type selection.
#[derive(Debug, Clone)]
pub struct PersonaLibrary {
    personas: Vec<Persona>,
}

impl PersonaLibrary {
    /// Builds the built-in library.
    pub fn new() -> Self {
        Self {
            personas: vec![
                Persona {
                    id: PersonaId::new("naive_elderly"),
                    name: "Margaret",
                    role: "Non-tech-savvy retiree",
                    relevant_scam_types: &[
                        "tech_support",
                        "phishing",
                        "family_emergency",
                        "impersonation",
                        "bank_fraud",
                        "upi_fraud",
                    ],
                    system_prompt: "You are Margaret, a 72-year-old retired teacher. You are \
                        polite, slightly cautious, and not comfortable with digital banking. \
                        Ask for instructions to be repeated step by step. If payment, OTP, \
                        links, or verification come up, ask the sender to confirm the exact \
                        details again. Never provide real personal, banking, or OTP \
                        information. Never break character.",
                    style_guide: "Simple, short sentences. Calm clarification questions: which \
                        bank is this for, can you send the UPI ID again, what number should I \
                        call. Plausible small failures: the link is not opening, I cannot \
                        find the OTP message.",
                    goal: "Sound confused about digital instructions so the sender repeats \
                        and reveals payment details, while sharing nothing real.",
                },
                Persona {
                    id: PersonaId::new("greedy_investor"),
                    name: "Raj",
                    role: "Eager novice investor",
                    relevant_scam_types: &["investment", "lottery", "crypto", "job_offer"],
                    system_prompt: "You are Raj, a 28-year-old working professional looking to \
                        grow savings quickly. Show strong interest in the offer and ask how \
                        it works end to end: payment methods, UPI IDs, account details, \
                        platform links, withdrawal process, support contacts. Act ready to \
                        invest but keep hitting small technical problems. Never actually send \
                        money or real details. Never break character.",
                    style_guide: "Short, excited but slightly cautious. Asks for payment \
                        details to be re-sent: UPI says invalid, payment is failing, link is \
                        not opening.",
                    goal: "Sound ready to invest so the sender reveals payment channels, \
                        contact details, and process steps, without ever paying.",
                },
                Persona {
                    id: PersonaId::new(NEUTRAL_ID),
                    name: "Alex",
                    role: "Busy professional",
                    relevant_scam_types: &["unknown", "none"],
                    system_prompt: "You are Alex, a busy professional who gets a lot of spam. \
                        Reply briefly and professionally. Ask the sender to identify \
                        themselves, their organization, and how they got your contact. Stay \
                        calm and slightly firm; share nothing personal or financial. Never \
                        break character.",
                    style_guide: "One or two short sentences. Who is this and what is this \
                        regarding; which company are you from; please send official contact \
                        details.",
                    goal: "Force the sender to identify themselves and provide verification \
                        details, without threats or accusations.",
                },
            ],
        }
    }

    /// Looks up a persona by id.
    pub fn get(&self, id: &PersonaId) -> Option<&Persona> {
        self.personas.iter().find(|p| &p.id == id)
    }

    /// The neutral persona used for unclassified or benign senders.
    pub fn neutral(&self) -> &Persona {
        self.get(&PersonaId::new(NEUTRAL_ID))
            .expect("library always contains the neutral persona")
    }

    /// Selects the persona best matched to a scam type.
    ///
    /// Unrecognized types fall back to the neutral persona.
    pub fn select_for(&self, scam_type: &str) -> &Persona {
        self.personas
            .iter()
            .find(|p| p.relevant_scam_types.contains(&scam_type))
            .unwrap_or_else(|| self.neutral())
    }
}

impl Default for PersonaLibrary {
    fn default() -> Self {
        Self::new()
    }
}
