//! Ordered answer use-case service.
//!
//! # Responsibility
//! - Expose the ordered collection engine (insert/remove/update/list).
//! - Provide owner-gated variants that run the ownership guard first.
//!
//! # Invariants
//! - Engine methods never re-authorize; callers that use them directly must
//!   have run `OwnershipGuard` for the puzzle.
//! - `*_as` methods check the caller before any answer read or write.

use super::ownership::OwnershipGuard;
use super::ServiceError;
use crate::model::answer::{AnswerId, AnswerUpdate, PuzzleAnswer};
use crate::model::puzzle::PuzzleId;
use crate::repo::answer_repo::AnswerRepository;
use crate::repo::puzzle_repo::PuzzleRepository;
use crate::repo::RepoResult;

/// Ordered answer service facade.
pub struct AnswerService<A: AnswerRepository, P: PuzzleRepository> {
    answers: A,
    guard: OwnershipGuard<P>,
}

impl<A: AnswerRepository, P: PuzzleRepository> AnswerService<A, P> {
    /// Creates service from answer and puzzle repository implementations.
    pub fn new(answers: A, puzzles: P) -> Self {
        Self {
            answers,
            guard: OwnershipGuard::new(puzzles),
        }
    }

    pub fn guard(&self) -> &OwnershipGuard<P> {
        &self.guard
    }

    /// Inserts one answer at `at_index` and returns its id.
    ///
    /// Answers at or after `at_index` shift forward; callers holding indices
    /// must re-fetch.
    pub fn insert(&self, puzzle: PuzzleId, value: &str, at_index: i64) -> RepoResult<AnswerId> {
        self.answers.insert_answer(puzzle, value, at_index)
    }

    pub fn append(&self, puzzle: PuzzleId, value: &str) -> RepoResult<AnswerId> {
        self.answers.append_answer(puzzle, value)
    }

    /// Removes one answer. Returns `false` when it does not exist.
    pub fn remove(&self, id: AnswerId) -> RepoResult<bool> {
        self.answers.remove_answer(id)
    }

    /// Updates value and/or position. Returns `false` when it does not exist.
    pub fn update(&self, id: AnswerId, update: &AnswerUpdate) -> RepoResult<bool> {
        self.answers.update_answer(id, update)
    }

    /// Canonical order for one puzzle.
    pub fn list_ordered(&self, puzzle: PuzzleId) -> RepoResult<Vec<PuzzleAnswer>> {
        self.answers.list_ordered(puzzle)
    }

    pub fn get_answer(&self, id: AnswerId) -> RepoResult<Option<PuzzleAnswer>> {
        self.answers.get_answer(id)
    }

    pub fn count(&self, puzzle: PuzzleId) -> RepoResult<i64> {
        self.answers.count_answers(puzzle)
    }

    /// Owner-gated insert.
    pub fn insert_as(
        &self,
        caller: Option<&str>,
        puzzle: PuzzleId,
        value: &str,
        at_index: i64,
    ) -> Result<AnswerId, ServiceError> {
        self.guard.ensure_owner(puzzle, caller)?;
        Ok(self.insert(puzzle, value, at_index)?)
    }

    /// Owner-gated append.
    pub fn append_as(
        &self,
        caller: Option<&str>,
        puzzle: PuzzleId,
        value: &str,
    ) -> Result<AnswerId, ServiceError> {
        self.guard.ensure_owner(puzzle, caller)?;
        Ok(self.append(puzzle, value)?)
    }

    /// Owner-gated remove. An unknown answer id yields `Ok(false)`.
    pub fn remove_as(&self, caller: Option<&str>, id: AnswerId) -> Result<bool, ServiceError> {
        let Some(answer) = self.answers.get_answer(id)? else {
            return Ok(false);
        };
        self.guard.ensure_owner(answer.puzzle_uuid, caller)?;
        Ok(self.remove(id)?)
    }

    /// Owner-gated update. An unknown answer id yields `Ok(false)`.
    pub fn update_as(
        &self,
        caller: Option<&str>,
        id: AnswerId,
        update: &AnswerUpdate,
    ) -> Result<bool, ServiceError> {
        let Some(answer) = self.answers.get_answer(id)? else {
            return Ok(false);
        };
        self.guard.ensure_owner(answer.puzzle_uuid, caller)?;
        Ok(self.update(id, update)?)
    }

    /// Owner-gated listing.
    pub fn list_ordered_as(
        &self,
        caller: Option<&str>,
        puzzle: PuzzleId,
    ) -> Result<Vec<PuzzleAnswer>, ServiceError> {
        self.guard.ensure_owner(puzzle, caller)?;
        Ok(self.list_ordered(puzzle)?)
    }

    /// Owner-gated point read. The answer is resolved first so the guard can
    /// check the puzzle it belongs to.
    pub fn get_answer_as(
        &self,
        caller: Option<&str>,
        id: AnswerId,
    ) -> Result<PuzzleAnswer, ServiceError> {
        let answer = self
            .answers
            .get_answer(id)?
            .ok_or(ServiceError::AnswerNotFound(id))?;
        self.guard.ensure_owner(answer.puzzle_uuid, caller)?;
        Ok(answer)
    }
}
