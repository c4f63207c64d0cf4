//! Wire types for the question endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Path parameters of `GET /question/{prompt}/{number}`.
#[derive(Debug, Clone)]
pub struct QuestionParams {
    pub prompt: String,
    pub number: QuestionNumber,
}

/// An integer of any magnitude, kept in canonical decimal form
/// (no `+`, no leading zeros, no `-0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionNumber(String);

#[derive(Debug, Error)]
#[error("`number` must be an integer, got {0:?}")]
pub struct InvalidNumber(String);

impl QuestionNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for QuestionNumber {
    type Err = InvalidNumber;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidNumber(raw.to_string()));
        }

        let significant = digits.trim_start_matches('0');
        let canonical = match (significant.is_empty(), negative) {
            (true, _) => "0".to_string(),
            (false, true) => format!("-{}", significant),
            (false, false) => significant.to_string(),
        };
        Ok(Self(canonical))
    }
}

impl fmt::Display for QuestionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response envelope: the generated text, untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionsEnvelope {
    pub questions: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Option<String> {
        raw.parse::<QuestionNumber>().ok().map(|n| n.to_string())
    }

    #[test]
    fn accepts_integers_beyond_machine_width() {
        assert_eq!(
            parse("99999999999999999999").as_deref(),
            Some("99999999999999999999")
        );
        assert_eq!(
            parse("-123456789012345678901234567890").as_deref(),
            Some("-123456789012345678901234567890")
        );
    }

    #[test]
    fn canonicalizes_sign_zeros_and_whitespace() {
        assert_eq!(parse("+7").as_deref(), Some("7"));
        assert_eq!(parse("007").as_deref(), Some("7"));
        assert_eq!(parse("-0").as_deref(), Some("0"));
        assert_eq!(parse(" 3 ").as_deref(), Some("3"));
    }

    #[test]
    fn rejects_non_integers() {
        for raw in ["abc", "2.5", "", "-", "+", "1e3", "3a", "--1"] {
            assert!(parse(raw).is_none(), "{:?} should be rejected", raw);
        }
    }
}
