//! Questions, answer keys and the provider seam.

use serde::{Deserialize, Serialize};

use super::value_object::CategoryId;

/// One ranked entry of a question's answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub text: String,
    pub rank: u32,
    pub points: u32,
}

impl AnswerEntry {
    /// Entry following the game's scoring convention (`points == rank`).
    pub fn ranked(text: impl Into<String>, rank: u32) -> Self {
        Self {
            text: text.into(),
            rank,
            points: rank,
        }
    }
}

/// A "top 10" question: a title and its ordered answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub title: String,
    pub answers: Vec<AnswerEntry>,
}

impl Question {
    /// Build a question whose answers are ranked by position, starting at 1.
    pub fn from_ranked(title: impl Into<String>, answers: &[&str]) -> Self {
        Self {
            title: title.into(),
            answers: answers
                .iter()
                .enumerate()
                .map(|(index, text)| AnswerEntry::ranked(*text, index as u32 + 1))
                .collect(),
        }
    }
}

/// Supplies a question for a category.
///
/// Implementations never fail: unknown or empty categories fall back to a
/// default question.
#[cfg_attr(test, mockall::automock)]
pub trait QuestionProvider: Send + Sync {
    fn pick(&self, category_id: &CategoryId) -> Question;
}
