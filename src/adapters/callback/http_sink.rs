//! HTTP report sink: POSTs the final report to the evaluation endpoint.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::domain::session::FinalReport;
use crate::ports::{ReportDeliveryError, ReportSink};

/// Single-attempt POST delivery over reqwest.
///
/// Retry policy lives in the dispatcher; this adapter only classifies
/// one attempt's outcome.
pub struct HttpReportSink {
    endpoint_url: String,
    timeout: Duration,
    client: Client,
}

impl HttpReportSink {
    /// Creates a sink for the given endpoint.
    pub fn new(endpoint_url: impl Into<String>, timeout: Duration) -> Result<Self, ReportDeliveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReportDeliveryError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint_url: endpoint_url.into(),
            timeout,
            client,
        })
    }

    /// Endpoint this sink posts to.
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

#[async_trait]
impl ReportSink for HttpReportSink {
    async fn deliver(&self, report: &FinalReport) -> Result<(), ReportDeliveryError> {
        let response = self
            .client
            .post(&self.endpoint_url)
            .json(report)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ReportDeliveryError::Timeout {
                        timeout_secs: self.timeout.as_secs(),
                    }
                } else {
                    ReportDeliveryError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        // Cap the echoed body so one verbose endpoint cannot flood logs.
        let body: String = body.chars().take(300).collect();
        Err(ReportDeliveryError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_keeps_configured_endpoint() {
        let sink =
            HttpReportSink::new("https://eval.example/api/final", Duration::from_secs(5)).unwrap();
        assert_eq!(sink.endpoint_url(), "https://eval.example/api/final");
    }
}
