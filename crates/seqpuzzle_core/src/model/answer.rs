//! Puzzle answer model.
//!
//! An answer is one element of a puzzle's canonical sequence. Its position is
//! `answer_index`, which the answer repository keeps dense per puzzle.

use super::puzzle::PuzzleId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable answer identifier.
pub type AnswerId = Uuid;

/// One ordered answer belonging to a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleAnswer {
    pub uuid: AnswerId,
    pub puzzle_uuid: PuzzleId,
    /// Opaque payload compared verbatim during verification.
    pub value: String,
    /// Zero-based position within the puzzle's canonical order.
    pub answer_index: i64,
}

/// Partial update for one answer. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerUpdate {
    pub value: Option<String>,
    pub answer_index: Option<i64>,
}

impl AnswerUpdate {
    /// Update that only rewrites the value.
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            answer_index: None,
        }
    }

    /// Update that only moves the answer.
    pub fn move_to(answer_index: i64) -> Self {
        Self {
            value: None,
            answer_index: Some(answer_index),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.answer_index.is_none()
    }
}

/// Extracts answer values in the order given.
pub fn answer_values(answers: &[PuzzleAnswer]) -> Vec<&str> {
    answers.iter().map(|answer| answer.value.as_str()).collect()
}
