//! Final-result callback configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for delivering final reports to the evaluation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackConfig {
    /// Endpoint URL the final report is POSTed to
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum delivery attempts
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff step between attempts, in milliseconds (linear)
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

impl CallbackConfig {
    /// Get per-attempt timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get backoff step as Duration
    pub fn backoff_step(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    /// Validate callback configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.endpoint_url.starts_with("http://") && !self.endpoint_url.starts_with("https://") {
            return Err(ValidationError::InvalidCallbackUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            timeout_secs: default_timeout(),
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

fn default_endpoint_url() -> String {
    "https://hackathon.guvi.in/api/updateHoneyPotFinalResult".to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_defaults() {
        let config = CallbackConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.backoff_step(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let config = CallbackConfig {
            endpoint_url: "not-a-url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = CallbackConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
