//! Final-report dispatch with bounded retry.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::domain::session::FinalReport;
use crate::ports::ReportSink;

/// Outcome of a dispatch, after all attempts.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// Whether the endpoint accepted the report.
    pub delivered: bool,
    /// Attempts performed.
    pub attempts: u32,
    /// Last error, when not delivered.
    pub error: Option<String>,
}

/// Delivers final reports with bounded, linearly backed-off retries.
///
/// The dispatcher is only ever handed a report by the caller that won a
/// session's completion flip, so delivery is attempted at most once per
/// session lifetime. Exhausted retries are an operational warning, never
/// a reopened session: favoring "never double-report" over guaranteed
/// delivery is the deliberate tradeoff here, because a duplicate report
/// corrupts evaluation more than a dropped one.
pub struct CallbackDispatcher {
    sink: Arc<dyn ReportSink>,
    max_attempts: u32,
    backoff_step: Duration,
}

impl CallbackDispatcher {
    /// Creates a dispatcher over the given sink.
    pub fn new(sink: Arc<dyn ReportSink>, max_attempts: u32, backoff_step: Duration) -> Self {
        Self {
            sink,
            max_attempts: max_attempts.max(1),
            backoff_step,
        }
    }

    /// Attempts delivery until success, a permanent rejection, or the
    /// attempt budget runs out.
    pub async fn dispatch(&self, report: FinalReport) -> DispatchOutcome {
        let mut last_error = None;
        let mut attempts = 0;

        for attempt in 1..=self.max_attempts {
            attempts = attempt;
            match self.sink.deliver(&report).await {
                Ok(()) => {
                    info!(
                        session_id = %report.session_id,
                        attempt,
                        "final report delivered"
                    );
                    return DispatchOutcome {
                        delivered: true,
                        attempts: attempt,
                        error: None,
                    };
                }
                Err(err) => {
                    let retryable = err.is_retryable();
                    warn!(
                        session_id = %report.session_id,
                        attempt,
                        error = %err,
                        retryable,
                        "final report delivery failed"
                    );
                    last_error = Some(err.to_string());
                    if !retryable {
                        break;
                    }
                    if attempt < self.max_attempts {
                        sleep(self.backoff_step * attempt).await;
                    }
                }
            }
        }

        warn!(
            session_id = %report.session_id,
            attempts,
            "final report undeliverable; session stays completed"
        );
        DispatchOutcome {
            delivered: false,
            attempts,
            error: last_error,
        }
    }
}
