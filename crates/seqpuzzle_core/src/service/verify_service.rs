//! Sequence verification against a puzzle's canonical answer order.
//!
//! # Invariants
//! - Canonical order is the answer repository's `list_ordered`.
//! - Comparison is exact, case-sensitive string equality.
//! - A longer guess is `TooMany`; a shorter guess is `Incorrect`. The two
//!   stay distinguishable even though both are wrong.

use crate::model::answer::answer_values;
use crate::model::puzzle::PuzzleId;
use crate::repo::answer_repo::AnswerRepository;
use crate::repo::RepoResult;
use log::info;
use serde::{Deserialize, Serialize};

/// Separator of the path form of a guess, e.g. `5/8/10`.
pub const GUESS_PATH_SEPARATOR: char = '/';

/// Result of comparing a guess with the canonical sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    Correct,
    Incorrect,
    TooMany,
    /// The puzzle has no answers configured (or is not visible).
    NotFound,
}

impl VerifyOutcome {
    /// Stable code for boundary mapping and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::TooMany => "too_many",
            Self::NotFound => "not_found",
        }
    }

    pub fn is_correct(self) -> bool {
        self == Self::Correct
    }
}

/// Compares `candidate` with `canonical` position by position.
pub fn compare_sequences<C: AsRef<str>>(canonical: &[&str], candidate: &[C]) -> VerifyOutcome {
    if canonical.is_empty() {
        return VerifyOutcome::NotFound;
    }
    if candidate.len() > canonical.len() {
        return VerifyOutcome::TooMany;
    }
    if candidate.len() < canonical.len() {
        return VerifyOutcome::Incorrect;
    }

    let matches = canonical
        .iter()
        .zip(candidate)
        .all(|(expected, provided)| {
            let provided: &str = provided.as_ref();
            *expected == provided
        });
    if matches {
        VerifyOutcome::Correct
    } else {
        VerifyOutcome::Incorrect
    }
}

/// Splits the path form of a guess into its elements.
///
/// Empty segments are kept, so `"a//b"` is three elements.
pub fn split_guess_path(path: &str) -> Vec<&str> {
    path.split(GUESS_PATH_SEPARATOR).collect()
}

/// Verifies guesses for any puzzle. Verification is not owner-gated.
pub struct SequenceVerifier<A: AnswerRepository> {
    answers: A,
}

impl<A: AnswerRepository> SequenceVerifier<A> {
    pub fn new(answers: A) -> Self {
        Self { answers }
    }

    /// Verifies an ordered guess against the puzzle's canonical sequence.
    pub fn verify<C: AsRef<str>>(
        &self,
        puzzle: PuzzleId,
        candidate: &[C],
    ) -> RepoResult<VerifyOutcome> {
        let canonical = self.answers.list_ordered(puzzle)?;
        let outcome = compare_sequences(&answer_values(&canonical), candidate);

        info!(
            "event=puzzle_verify module=service status=ok puzzle={} outcome={} expected_len={} provided_len={}",
            puzzle,
            outcome.as_str(),
            canonical.len(),
            candidate.len()
        );
        Ok(outcome)
    }

    /// Verifies a slash-separated guess such as `5/8/10`.
    pub fn verify_path(&self, puzzle: PuzzleId, path: &str) -> RepoResult<VerifyOutcome> {
        let candidate = split_guess_path(path);
        self.verify(puzzle, candidate.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::{compare_sequences, split_guess_path, VerifyOutcome};

    const CANONICAL: [&str; 3] = ["5", "8", "10"];

    #[test]
    fn exact_sequence_is_correct() {
        assert_eq!(
            compare_sequences(&CANONICAL, &["5", "8", "10"]),
            VerifyOutcome::Correct
        );
    }

    #[test]
    fn swapped_elements_are_incorrect() {
        assert_eq!(
            compare_sequences(&CANONICAL, &["5", "10", "8"]),
            VerifyOutcome::Incorrect
        );
    }

    #[test]
    fn longer_guess_is_too_many_even_with_matching_prefix() {
        assert_eq!(
            compare_sequences(&CANONICAL, &["5", "8", "10", "extra"]),
            VerifyOutcome::TooMany
        );
    }

    #[test]
    fn shorter_guess_is_incorrect() {
        assert_eq!(
            compare_sequences(&CANONICAL, &["5", "8"]),
            VerifyOutcome::Incorrect
        );
    }

    #[test]
    fn empty_canonical_is_not_found_regardless_of_guess() {
        let empty: [&str; 0] = [];
        assert_eq!(compare_sequences(&empty, &["5"]), VerifyOutcome::NotFound);
        assert_eq!(
            compare_sequences::<&str>(&empty, &[]),
            VerifyOutcome::NotFound
        );
    }

    #[test]
    fn comparison_is_case_sensitive_and_unnormalized() {
        assert_eq!(compare_sequences(&["Ab"], &["ab"]), VerifyOutcome::Incorrect);
        assert_eq!(compare_sequences(&["Ab"], &[" Ab"]), VerifyOutcome::Incorrect);
    }

    #[test]
    fn guess_path_keeps_empty_segments() {
        assert_eq!(split_guess_path("5/8/10"), vec!["5", "8", "10"]);
        assert_eq!(split_guess_path("a//b"), vec!["a", "", "b"]);
    }

    #[test]
    fn outcome_codes_are_stable() {
        assert_eq!(VerifyOutcome::TooMany.as_str(), "too_many");
        assert_eq!(
            serde_json::to_string(&VerifyOutcome::NotFound).unwrap(),
            "\"not_found\""
        );
    }
}
