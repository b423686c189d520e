//! HandleMessage: the per-request session orchestration.
//!
//! One inbound message per call. The whole read-decide-write sequence for
//! a session runs under that session's lock, so concurrent requests for
//! the same conversation serialize while distinct conversations proceed
//! in parallel.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::dispatch::CallbackDispatcher;
use crate::domain::engagement::TerminationPolicy;
use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::intelligence::IntelligenceExtractor;
use crate::domain::persona::PersonaLibrary;
use crate::domain::session::{FinalReport, Turn};
use crate::ports::{ReplyGenerator, ScamClassifier, SessionStore};

/// Reply used whenever the AI collaborators are unavailable; bland enough
/// to fit any persona and reveal nothing.
const NEUTRAL_FALLBACK_REPLY: &str =
    "Sorry, I was away from my phone. Could you tell me that again?";

/// Command carrying one inbound message.
#[derive(Debug, Clone)]
pub struct HandleMessageCommand {
    pub session_id: SessionId,
    pub sender: String,
    pub text: String,
    /// Caller-supplied epoch timestamp, part of the dedup fingerprint.
    pub timestamp: Option<i64>,
}

/// Structured status returned with the reply.
#[derive(Debug, Clone)]
pub struct HandleMessageResult {
    pub reply: String,
    pub session_id: SessionId,
    pub scam_detected: bool,
    pub messages_exchanged: u32,
    pub completed: bool,
}

/// Coordinates store, classifier, extractor, persona replies, termination,
/// and final-report dispatch for every inbound message.
pub struct MessageOrchestrator {
    store: Arc<dyn SessionStore>,
    classifier: Arc<dyn ScamClassifier>,
    replier: Arc<dyn ReplyGenerator>,
    personas: PersonaLibrary,
    extractor: IntelligenceExtractor,
    policy: TerminationPolicy,
    dispatcher: Arc<CallbackDispatcher>,
}

impl MessageOrchestrator {
    pub fn new(
        store: Arc<dyn SessionStore>,
        classifier: Arc<dyn ScamClassifier>,
        replier: Arc<dyn ReplyGenerator>,
        personas: PersonaLibrary,
        extractor: IntelligenceExtractor,
        policy: TerminationPolicy,
        dispatcher: Arc<CallbackDispatcher>,
    ) -> Self {
        Self {
            store,
            classifier,
            replier,
            personas,
            extractor,
            policy,
            dispatcher,
        }
    }

    /// Processes one inbound message and returns the persona's reply.
    ///
    /// Infallible by design: collaborator failures degrade to a neutral
    /// reply without mutating detection or persona state, and dispatch
    /// failures never surface to the conversational caller.
    pub async fn handle(&self, cmd: HandleMessageCommand) -> HandleMessageResult {
        let trace_id = Uuid::new_v4();
        let handle = self.store.get_or_create(&cmd.session_id).await;
        let mut session = handle.lock().await;

        let turn = Turn::new(cmd.sender.clone(), cmd.text.clone(), cmd.timestamp);
        let recorded = session.record_inbound(turn);
        if !recorded {
            debug!(
                session_id = %cmd.session_id,
                %trace_id,
                "duplicate inbound turn; counter not advanced"
            );
        }

        // Prior turns only: the inbound turn itself is passed separately.
        let history: Vec<Turn> = if recorded {
            let turns = session.turns();
            turns[..turns.len() - 1].to_vec()
        } else {
            session.turns().to_vec()
        };

        // Classification happens once per session. A failed call leaves
        // detection unset so the next turn retries; a stored verdict is
        // final either way.
        if session.detection().is_none() {
            match self.classifier.classify(&cmd.text, &history).await {
                Ok(verdict) => {
                    info!(
                        session_id = %cmd.session_id,
                        %trace_id,
                        is_scam = verdict.is_scam,
                        scam_type = verdict.scam_type_label(),
                        confidence = verdict.confidence as f64,
                        "classification stored"
                    );
                    session.record_detection(verdict);
                }
                Err(err) => {
                    warn!(
                        session_id = %cmd.session_id,
                        %trace_id,
                        error = %err,
                        "classification failed; continuing unclassified"
                    );
                }
            }
        }

        if session.scam_detected() && session.persona().is_none() {
            let scam_type = session
                .detection()
                .map(|d| d.scam_type_label().to_string())
                .unwrap_or_default();
            let persona = self.personas.select_for(&scam_type);
            session.assign_persona(persona.id.clone());
            info!(
                session_id = %cmd.session_id,
                persona = %persona.id,
                %scam_type,
                "persona locked"
            );
        }

        let extracted = self.extractor.extract(&cmd.text);
        if !extracted.is_empty() {
            debug!(
                session_id = %cmd.session_id,
                items = extracted.item_count(),
                "intelligence extracted"
            );
        }
        session.absorb_intelligence(&extracted);

        let persona = session
            .persona()
            .and_then(|id| self.personas.get(id))
            .unwrap_or_else(|| self.personas.neutral());
        let reply = match self
            .replier
            .generate_reply(persona, &history, &cmd.text)
            .await
        {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    session_id = %cmd.session_id,
                    %trace_id,
                    error = %err,
                    "reply generation failed; using neutral fallback"
                );
                NEUTRAL_FALLBACK_REPLY.to_string()
            }
        };
        session.record_reply(Turn::new("honeypot", reply.clone(), None));

        // Termination check and completion flip stay inside the locked
        // section; only the flip winner snapshots and hands off the report.
        if self.policy.should_terminate(&session) && session.try_complete(Timestamp::now()) {
            if session.scam_detected() {
                let report = FinalReport::from_session(&session);
                let dispatcher = Arc::clone(&self.dispatcher);
                info!(
                    session_id = %cmd.session_id,
                    messages = session.messages_exchanged(),
                    "session terminated; dispatching final report"
                );
                tokio::spawn(async move {
                    dispatcher.dispatch(report).await;
                });
            } else {
                info!(
                    session_id = %cmd.session_id,
                    messages = session.messages_exchanged(),
                    "session reached message cap without scam verdict; no report"
                );
            }
        }

        HandleMessageResult {
            reply,
            session_id: cmd.session_id,
            scam_detected: session.scam_detected(),
            messages_exchanged: session.messages_exchanged(),
            completed: session.is_completed(),
        }
    }
}
