//! Entity extraction from free-form message text.
//!
//! Pure and synchronous so it can run on every turn without affecting
//! conversational latency. False positives are tolerated; the harvested
//! values are advisory and accumulate across turns.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ExtractedIntelligence;

/// Default fraud-indicator lexicon, matched case-insensitively as whole
/// words or phrases.
pub const DEFAULT_SUSPICIOUS_KEYWORDS: &[&str] = &[
    "verify",
    "suspended",
    "locked",
    "blocked",
    "otp",
    "password",
    "pin",
    "cvv",
    "urgent",
    "immediately",
    "suspicious activity",
    "won",
    "winner",
    "lottery",
    "prize",
    "congratulations",
    "guaranteed returns",
    "processing fee",
    "arrest warrant",
    "legal action",
    "gift card",
];

/// UPI providers recognized in `name@provider` payment handles.
const UPI_PROVIDERS: &str = "paytm|phonepe|googlepay|ybl|axl|okhdfcbank|okicici|okaxis|oksbi|upi";

static UPI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b[a-z0-9][a-z0-9._-]*@(?:{})\b", UPI_PROVIDERS)).unwrap()
});

// Digit runs with single optional separators; filtered by length and
// phone-shape after normalization.
static DIGIT_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d(?:[\-. ]?\d){5,17}\b").unwrap());

static PHONE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\+91[\-. ]?[6-9]\d{9}\b").unwrap(),
        Regex::new(r"\b0[6-9]\d{9}\b").unwrap(),
        Regex::new(r"\b[6-9]\d{9}\b").unwrap(),
        Regex::new(r"\b\d{3}[\-. ]\d{3}[\-. ]\d{4}\b").unwrap(),
    ]
});

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s]+").unwrap());

/// Punctuation commonly glued to the end of a pasted link.
const URL_TRAILING: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '"', '\'', '>'];

/// Extracts structured identifiers and indicator phrases from text.
///
/// Construction compiles the keyword lexicon; [`extract`](Self::extract)
/// is deterministic and side-effect free.
#[derive(Debug, Clone)]
pub struct IntelligenceExtractor {
    min_account_digits: usize,
    max_account_digits: usize,
    keywords: Vec<(String, Regex)>,
}

impl IntelligenceExtractor {
    /// Creates an extractor with the default lexicon and account length policy.
    pub fn new() -> Self {
        Self::with_lexicon(DEFAULT_SUSPICIOUS_KEYWORDS.iter().map(|s| s.to_string()))
    }

    /// Creates an extractor with a custom keyword lexicon.
    pub fn with_lexicon(lexicon: impl IntoIterator<Item = String>) -> Self {
        let keywords = lexicon
            .into_iter()
            .filter_map(|phrase| {
                let canonical = phrase.trim().to_lowercase();
                if canonical.is_empty() {
                    return None;
                }
                let escaped = regex::escape(&canonical).replace(' ', r"\s+");
                let pattern = format!(r"\b{}\b", escaped);
                Regex::new(&pattern).ok().map(|re| (canonical, re))
            })
            .collect();

        Self {
            min_account_digits: 11,
            max_account_digits: 18,
            keywords,
        }
    }

    /// Sets the minimum digit count treated as an account number.
    pub fn with_min_account_digits(mut self, min: usize) -> Self {
        self.min_account_digits = min;
        self
    }

    /// Appends extra phrases to the lexicon.
    pub fn with_extra_keywords(mut self, extra: &[String]) -> Self {
        for phrase in extra {
            let canonical = phrase.trim().to_lowercase();
            if canonical.is_empty() {
                continue;
            }
            let escaped = regex::escape(&canonical).replace(' ', r"\s+");
            if let Ok(re) = Regex::new(&format!(r"\b{}\b", escaped)) {
                self.keywords.push((canonical, re));
            }
        }
        self
    }

    /// Extracts all categories from `text`.
    ///
    /// Empty or irrelevant input yields empty sets; there is no failure mode.
    pub fn extract(&self, text: &str) -> ExtractedIntelligence {
        let mut intel = ExtractedIntelligence::new();
        if text.trim().is_empty() {
            return intel;
        }
        let lowered = text.to_lowercase();

        for m in UPI_RE.find_iter(&lowered) {
            intel.upi_ids.insert(m.as_str().to_string());
        }

        for m in URL_RE.find_iter(text) {
            let trimmed = m.as_str().trim_end_matches(URL_TRAILING);
            if !trimmed.is_empty() {
                intel.phishing_links.insert(trimmed.to_string());
            }
        }

        for re in PHONE_RES.iter() {
            for m in re.find_iter(text) {
                intel
                    .phone_numbers
                    .insert(normalize_phone(m.as_str()));
            }
        }

        for m in DIGIT_RUN_RE.find_iter(text) {
            let digits: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.len() < self.min_account_digits || digits.len() > self.max_account_digits {
                continue;
            }
            if looks_like_phone(&digits) {
                continue;
            }
            intel.bank_accounts.insert(digits);
        }

        for (canonical, re) in &self.keywords {
            if re.is_match(&lowered) {
                intel.suspicious_keywords.insert(canonical.clone());
            }
        }

        intel
    }
}

impl Default for IntelligenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical 10-digit form: country code and trunk prefix stripped,
/// separators removed, so `+91 98765-43210` and `9876543210` dedupe.
fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 12 && digits.starts_with("91") {
        digits[2..].to_string()
    } else if digits.len() == 11 && digits.starts_with('0') {
        digits[1..].to_string()
    } else {
        digits
    }
}

/// Indian mobile formats that would otherwise pass the account length check.
fn looks_like_phone(digits: &str) -> bool {
    let starts_mobile = |d: &str| d.starts_with(['6', '7', '8', '9']);
    (digits.len() == 11 && digits.starts_with('0') && starts_mobile(&digits[1..]))
        || (digits.len() == 12 && digits.starts_with("91") && starts_mobile(&digits[2..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_upi_handles_case_insensitively() {
        let extractor = IntelligenceExtractor::new();
        let intel = extractor.extract("Send to Scammer@UPI or backup@paytm today");

        assert!(intel.upi_ids.contains("scammer@upi"));
        assert!(intel.upi_ids.contains("backup@paytm"));
    }

    #[test]
    fn ignores_email_like_tokens_with_unknown_providers() {
        let extractor = IntelligenceExtractor::new();
        let intel = extractor.extract("Contact me at someone@gmail.com");

        assert!(intel.upi_ids.is_empty());
    }

    #[test]
    fn extracts_urls_and_trims_trailing_punctuation() {
        let extractor = IntelligenceExtractor::new();
        let intel = extractor.extract("Click https://secure-verify.example/login. Now!");

        assert!(intel
            .phishing_links
            .contains("https://secure-verify.example/login"));
    }

    #[test]
    fn extracts_phone_numbers_in_common_formats() {
        let extractor = IntelligenceExtractor::new();
        let intel = extractor.extract("Call +919876543210 or 09876543210 or 9876543210");

        // All three are the same number after normalization.
        assert_eq!(intel.phone_numbers.len(), 1);
        assert!(intel.phone_numbers.contains("9876543210"));
    }

    #[test]
    fn extracts_account_numbers_with_separators() {
        let extractor = IntelligenceExtractor::new();
        let intel = extractor.extract("Transfer to account 1234-5678-9012-345");

        assert!(intel.bank_accounts.contains("123456789012345"));
    }

    #[test]
    fn phone_shaped_digit_runs_are_not_accounts() {
        let extractor = IntelligenceExtractor::new();
        let intel = extractor.extract("My number is 09876543210 and also 919876543210");

        assert!(intel.bank_accounts.is_empty());
        assert!(!intel.phone_numbers.is_empty());
    }

    #[test]
    fn short_digit_runs_are_ignored() {
        let extractor = IntelligenceExtractor::new();
        let intel = extractor.extract("OTP is 482913");

        assert!(intel.bank_accounts.is_empty());
    }

    #[test]
    fn matches_keywords_as_whole_words() {
        let extractor = IntelligenceExtractor::new();
        let intel = extractor.extract("URGENT: your account will be blocked, verify now");

        assert!(intel.suspicious_keywords.contains("urgent"));
        assert!(intel.suspicious_keywords.contains("blocked"));
        assert!(intel.suspicious_keywords.contains("verify"));
    }

    #[test]
    fn keyword_substrings_do_not_match() {
        let extractor = IntelligenceExtractor::new();
        // "verify" inside "overVERIFYed" style tokens must not match
        let intel = extractor.extract("the universal winnings");

        assert!(!intel.suspicious_keywords.contains("verify"));
        assert!(!intel.suspicious_keywords.contains("won"));
    }

    #[test]
    fn multi_word_phrases_match_across_whitespace() {
        let extractor = IntelligenceExtractor::new();
        let intel = extractor.extract("We detected suspicious  activity on your card");

        assert!(intel.suspicious_keywords.contains("suspicious activity"));
    }

    #[test]
    fn empty_input_yields_empty_sets() {
        let extractor = IntelligenceExtractor::new();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("   ").is_empty());
        assert!(extractor.extract("hello, how are you?").is_empty());
    }

    #[test]
    fn extraction_is_deterministic() {
        let extractor = IntelligenceExtractor::new();
        let text = "Pay fraud@ybl, call 9876543210, see http://bad.example";

        assert_eq!(extractor.extract(text), extractor.extract(text));
    }

    #[test]
    fn extra_keywords_extend_the_lexicon() {
        let extractor = IntelligenceExtractor::new()
            .with_extra_keywords(&["kyc update".to_string()]);
        let intel = extractor.extract("Complete your KYC update today");

        assert!(intel.suspicious_keywords.contains("kyc update"));
    }

    #[test]
    fn min_account_digits_is_configurable() {
        let extractor = IntelligenceExtractor::new().with_min_account_digits(8);
        let intel = extractor.extract("account 12345678");

        assert!(intel.bank_accounts.contains("12345678"));
    }
}
