//! Engagement policy configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Tunables for how long sessions engage and what counts as an account.
#[derive(Debug, Clone, Deserialize)]
pub struct EngagementConfig {
    /// Inbound-message cap before a session is finalized
    #[serde(default = "default_max_messages")]
    pub max_messages: u32,

    /// Minimum digit count treated as a bank account number
    #[serde(default = "default_min_account_digits")]
    pub min_account_digits: usize,

    /// Extra suspicious phrases appended to the built-in lexicon
    /// (comma-separated)
    pub extra_keywords: Option<String>,
}

impl EngagementConfig {
    /// Extra keywords as a vector
    pub fn extra_keywords_list(&self) -> Vec<String> {
        self.extra_keywords
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate engagement configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_messages == 0 {
            return Err(ValidationError::InvalidMessageCap);
        }
        if self.min_account_digits < 6 || self.min_account_digits > 18 {
            return Err(ValidationError::InvalidAccountDigits);
        }
        Ok(())
    }
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
            min_account_digits: default_min_account_digits(),
            extra_keywords: None,
        }
    }
}

fn default_max_messages() -> u32 {
    16
}

fn default_min_account_digits() -> usize {
    11
}
