use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Accepted shape of a subject identifier after trimming.
static SUBJECT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._:-]{3,128}$").expect("subject pattern is a valid regex")
});

/// Canonical "who made this request" token.
///
/// Only constructed through [`SubjectId::normalize`] or [`SubjectId::from_value`],
/// so every instance is 3..=128 characters of `[A-Za-z0-9._:-]`. The token is
/// opaque: case is preserved and no further structure is assumed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// Trim and validate a raw string candidate. A leading or trailing byte-order
    /// mark counts as whitespace.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
        if trimmed.is_empty() || !SUBJECT_PATTERN.is_match(trimmed) {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// Validate an untyped candidate. Anything that is not a JSON string is rejected,
    /// numbers included.
    pub fn from_value(candidate: &Value) -> Option<Self> {
        candidate.as_str().and_then(Self::normalize)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
