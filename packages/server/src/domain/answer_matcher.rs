//! Free-text answer validation against an answer key.
//!
//! Matching is exact equality after normalization (lowercase, trimmed).
//! Punctuation and inner whitespace are left untouched.

use super::question::AnswerEntry;

/// Result of validating one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerValidation {
    pub is_correct: bool,
    pub points: u32,
}

impl AnswerValidation {
    pub const INCORRECT: Self = Self {
        is_correct: false,
        points: 0,
    };
}

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Find the answer-key entry a submission matches, if any.
///
/// When two entries normalize to the same text the first one wins.
pub fn find_match<'a>(user_answer: &str, answer_key: &'a [AnswerEntry]) -> Option<&'a AnswerEntry> {
    let needle = normalize(user_answer);
    if needle.is_empty() {
        return None;
    }
    answer_key
        .iter()
        .find(|entry| normalize(&entry.text) == needle)
}

/// Validate `user_answer` against `answer_key`.
///
/// Side effect free. Submitting an already matched item matches again.
pub fn validate(user_answer: &str, answer_key: &[AnswerEntry]) -> AnswerValidation {
    match find_match(user_answer, answer_key) {
        Some(entry) => AnswerValidation {
            is_correct: true,
            points: entry.points,
        },
        None => AnswerValidation::INCORRECT,
    }
}
