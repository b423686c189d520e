//! Mock report sink for testing dispatch behavior.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::session::FinalReport;
use crate::ports::{ReportDeliveryError, ReportSink};

/// Records delivered reports; optionally fails the first N attempts or
/// every attempt.
#[derive(Clone, Default)]
pub struct MockReportSink {
    delivered: Arc<Mutex<Vec<FinalReport>>>,
    attempts: Arc<AtomicUsize>,
    fail_first: usize,
    fail_all: bool,
}

impl MockReportSink {
    /// Creates a sink that accepts every delivery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the first `n` attempts with a retryable error, then accepts.
    pub fn failing_first(n: usize) -> Self {
        Self {
            fail_first: n,
            ..Self::default()
        }
    }

    /// Fails every attempt with a retryable error.
    pub fn always_failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Reports successfully delivered so far.
    pub fn delivered(&self) -> Vec<FinalReport> {
        self.delivered.lock().unwrap().clone()
    }

    /// Total attempts observed, including failures.
    pub fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReportSink for MockReportSink {
    async fn deliver(&self, report: &FinalReport) -> Result<(), ReportDeliveryError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_all || attempt < self.fail_first {
            return Err(ReportDeliveryError::Rejected {
                status: 503,
                body: "mock endpoint unavailable".to_string(),
            });
        }
        self.delivered.lock().unwrap().push(report.clone());
        Ok(())
    }
}
