//! Monotone sets of extracted identifiers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Intelligence accumulated for one session.
///
/// Five independent sets of normalized strings. The only mutation is
/// [`merge`](Self::merge), a set union: values are never removed, and
/// merging the same value twice is a no-op. `BTreeSet` keeps each
/// category ordered so report payloads serialize deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedIntelligence {
    pub bank_accounts: BTreeSet<String>,
    pub upi_ids: BTreeSet<String>,
    pub phone_numbers: BTreeSet<String>,
    pub phishing_links: BTreeSet<String>,
    pub suspicious_keywords: BTreeSet<String>,
}

impl ExtractedIntelligence {
    /// Creates an empty set bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unions `other` into `self`.
    pub fn merge(&mut self, other: &ExtractedIntelligence) {
        self.bank_accounts.extend(other.bank_accounts.iter().cloned());
        self.upi_ids.extend(other.upi_ids.iter().cloned());
        self.phone_numbers.extend(other.phone_numbers.iter().cloned());
        self.phishing_links.extend(other.phishing_links.iter().cloned());
        self.suspicious_keywords
            .extend(other.suspicious_keywords.iter().cloned());
    }

    /// True when every category is empty.
    pub fn is_empty(&self) -> bool {
        self.bank_accounts.is_empty()
            && self.upi_ids.is_empty()
            && self.phone_numbers.is_empty()
            && self.phishing_links.is_empty()
            && self.suspicious_keywords.is_empty()
    }

    /// True when at least one *actionable* category holds a value.
    ///
    /// Keywords indicate tactic, not actionable intelligence, so they are
    /// excluded here.
    pub fn has_actionable(&self) -> bool {
        !self.bank_accounts.is_empty()
            || !self.upi_ids.is_empty()
            || !self.phone_numbers.is_empty()
            || !self.phishing_links.is_empty()
    }

    /// Total values across all five categories.
    pub fn item_count(&self) -> usize {
        self.bank_accounts.len()
            + self.upi_ids.len()
            + self.phone_numbers.len()
            + self.phishing_links.len()
            + self.suspicious_keywords.len()
    }

    /// True when `self` contains every value present in `other`.
    pub fn contains_all(&self, other: &ExtractedIntelligence) -> bool {
        other.bank_accounts.is_subset(&self.bank_accounts)
            && other.upi_ids.is_subset(&self.upi_ids)
            && other.phone_numbers.is_subset(&self.phone_numbers)
            && other.phishing_links.is_subset(&self.phishing_links)
            && other.suspicious_keywords.is_subset(&self.suspicious_keywords)
    }
}
