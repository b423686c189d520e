//! Mock AI collaborators for testing.
//!
//! Configurable implementations of the classifier and reply-generator
//! ports, allowing tests to run without calling a real AI API. Verdicts
//! and replies are queued and consumed in order; error injection covers
//! the degraded paths; call counters let tests verify invocation counts.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::persona::Persona;
use crate::domain::session::{Detection, Turn};
use crate::ports::{AiError, ReplyGenerator, ScamClassifier};

/// Mock scam classifier with scripted verdicts.
///
/// Verdicts queue in FIFO order; when the queue is empty the fallback
/// verdict is returned. `failing()` makes every call error instead.
#[derive(Clone, Default)]
pub struct MockClassifier {
    verdicts: Arc<Mutex<VecDeque<Detection>>>,
    fallback: Option<Detection>,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockClassifier {
    /// Creates a classifier that answers "benign" by default.
    pub fn new() -> Self {
        Self {
            verdicts: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Some(Detection::benign()),
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queues a verdict to return on the next call.
    pub fn with_verdict(self, verdict: Detection) -> Self {
        self.verdicts.lock().unwrap().push_back(verdict);
        self
    }

    /// Sets the verdict returned once the queue is drained.
    pub fn with_fallback(mut self, verdict: Detection) -> Self {
        self.fallback = Some(verdict);
        self
    }

    /// Makes every call fail with a transient error.
    pub fn failing() -> Self {
        Self {
            verdicts: Arc::new(Mutex::new(VecDeque::new())),
            fallback: None,
            fail: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of classify calls observed.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScamClassifier for MockClassifier {
    async fn classify(&self, _text: &str, _history: &[Turn]) -> Result<Detection, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AiError::unavailable("mock classifier down"));
        }
        if let Some(verdict) = self.verdicts.lock().unwrap().pop_front() {
            return Ok(verdict);
        }
        self.fallback
            .clone()
            .ok_or_else(|| AiError::unavailable("mock classifier exhausted"))
    }
}

/// Mock reply generator with scripted replies.
#[derive(Clone, Default)]
pub struct MockReplyGenerator {
    replies: Arc<Mutex<VecDeque<String>>>,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockReplyGenerator {
    /// Creates a generator that echoes a canned phrase.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queues a reply to return on the next call.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(reply.into());
        self
    }

    /// Makes every call fail with a transient error.
    pub fn failing() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            fail: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of generate calls observed.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReplyGenerator for MockReplyGenerator {
    async fn generate_reply(
        &self,
        persona: &Persona,
        _history: &[Turn],
        _inbound: &str,
    ) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AiError::Timeout { timeout_secs: 20 });
        }
        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            return Ok(reply);
        }
        Ok(format!("Who is this? ({})", persona.name))
    }
}
