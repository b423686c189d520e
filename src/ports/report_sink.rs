//! Report sink port: one delivery attempt of the final report.

use async_trait::async_trait;

use crate::domain::session::FinalReport;

/// Port for delivering the final report to the evaluation endpoint.
///
/// A sink performs a single attempt; retry and backoff live in the
/// dispatcher so the policy is testable without a network.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Attempts to deliver `report` once.
    async fn deliver(&self, report: &FinalReport) -> Result<(), ReportDeliveryError>;
}

/// Delivery failures, classified for retry decisions.
#[derive(Debug, thiserror::Error)]
pub enum ReportDeliveryError {
    /// Endpoint answered with a non-success status.
    #[error("endpoint returned status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl ReportDeliveryError {
    /// True if a later attempt could succeed.
    ///
    /// Client-side rejections (4xx) are permanent; everything else is
    /// worth retrying within the bounded budget.
    pub fn is_retryable(&self) -> bool {
        match self {
            ReportDeliveryError::Rejected { status, .. } => *status >= 500,
            ReportDeliveryError::Network(_) | ReportDeliveryError::Timeout { .. } => true,
        }
    }
}
