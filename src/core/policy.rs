//! Key validation policy.
//!
//! A [`ValidationPolicy`] is a set of declarative rules an encryption key
//! must satisfy. Every rule can be disabled by leaving it empty or zero;
//! a key passes only when all enabled rules hold.

use std::fmt;

/// Declarative rules for acceptable encryption keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Minimum key length in bytes.
    pub min_length: usize,
    /// Required prefix (case-sensitive).
    pub required_prefix: Option<String>,
    /// Required suffix (case-sensitive).
    pub required_suffix: Option<String>,
    /// Characters of which at least `min_required_chars_present` must occur.
    pub required_charset: String,
    /// How many distinct charset characters must appear in the key.
    pub min_required_chars_present: usize,
    /// Substring the key must contain.
    pub required_substring: Option<String>,
}

/// The first rule a key broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyViolation {
    TooShort { length: usize, min: usize },
    MissingPrefix,
    MissingSuffix,
    TooFewRequiredChars { found: usize, min: usize },
    MissingSubstring,
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { length, min } => {
                write!(f, "too short ({} < {})", length, min)
            }
            Self::MissingPrefix => write!(f, "missing required prefix"),
            Self::MissingSuffix => write!(f, "missing required suffix"),
            Self::TooFewRequiredChars { found, min } => {
                write!(f, "too few required characters ({} < {})", found, min)
            }
            Self::MissingSubstring => write!(f, "missing required substring"),
        }
    }
}

impl ValidationPolicy {
    /// A policy with every rule disabled.
    pub fn permissive() -> Self {
        Self {
            min_length: 0,
            required_prefix: None,
            required_suffix: None,
            required_charset: String::new(),
            min_required_chars_present: 0,
            required_substring: None,
        }
    }

    /// Check a candidate key against every enabled rule.
    ///
    /// Rules are evaluated in a fixed order (length, prefix, suffix,
    /// charset, substring) and the first violation is returned.
    ///
    /// # Errors
    ///
    /// Returns the first [`PolicyViolation`] encountered.
    pub fn check(&self, candidate: &str) -> Result<(), PolicyViolation> {
        if candidate.len() < self.min_length {
            return Err(PolicyViolation::TooShort {
                length: candidate.len(),
                min: self.min_length,
            });
        }

        if let Some(prefix) = non_empty(&self.required_prefix) {
            if !candidate.starts_with(prefix) {
                return Err(PolicyViolation::MissingPrefix);
            }
        }

        if let Some(suffix) = non_empty(&self.required_suffix) {
            if !candidate.ends_with(suffix) {
                return Err(PolicyViolation::MissingSuffix);
            }
        }

        // An empty charset disables the count requirement entirely.
        if !self.required_charset.is_empty() {
            let found = self.required_chars_present(candidate);
            if found < self.min_required_chars_present {
                return Err(PolicyViolation::TooFewRequiredChars {
                    found,
                    min: self.min_required_chars_present,
                });
            }
        }

        if let Some(needle) = non_empty(&self.required_substring) {
            if !candidate.contains(needle) {
                return Err(PolicyViolation::MissingSubstring);
            }
        }

        Ok(())
    }

    /// Whether the candidate satisfies every enabled rule.
    pub fn is_satisfied_by(&self, candidate: &str) -> bool {
        self.check(candidate).is_ok()
    }

    /// Number of distinct charset characters occurring in `candidate`.
    fn required_chars_present(&self, candidate: &str) -> usize {
        let mut seen: Vec<char> = Vec::new();
        for ch in self.required_charset.chars() {
            if !seen.contains(&ch) && candidate.contains(ch) {
                seen.push(ch);
            }
        }
        seen.len()
    }
}

impl Default for ValidationPolicy {
    /// The shipped rule set.
    fn default() -> Self {
        Self {
            min_length: 16,
            required_prefix: Some("lh-".to_string()),
            required_suffix: Some("u".to_string()),
            required_charset: "!@#$%^&*".to_string(),
            min_required_chars_present: 2,
            required_substring: Some("key".to_string()),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
