//! Ownership guard for puzzle-scoped operations.
//!
//! # Responsibility
//! - Decide whether a caller may read or mutate one puzzle's answers.
//!
//! # Invariants
//! - Deleted or missing puzzles yield `NotFound`, never `Forbidden`.
//! - An absent caller identity never matches an owner.
//! - The guard is a read-only point read outside any mutation transaction.
//!   A puzzle deleted between `authorize` and the following mutation is an
//!   accepted staleness window; the mutation still fails with
//!   `PuzzleNotFound` for inserts.

use super::ServiceError;
use crate::model::puzzle::PuzzleId;
use crate::repo::puzzle_repo::PuzzleRepository;
use crate::repo::RepoResult;
use log::warn;
use serde::{Deserialize, Serialize};

/// Tri-state authorization result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authorization {
    Allowed,
    Forbidden,
    NotFound,
}

impl Authorization {
    /// Stable code for boundary mapping and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
        }
    }

    /// Converts a denial into the matching service error.
    pub fn require(self, puzzle: PuzzleId) -> Result<(), ServiceError> {
        match self {
            Self::Allowed => Ok(()),
            Self::Forbidden => Err(ServiceError::Forbidden(puzzle)),
            Self::NotFound => Err(ServiceError::PuzzleNotFound(puzzle)),
        }
    }
}

/// Checks puzzle ownership against a caller identity.
pub struct OwnershipGuard<P: PuzzleRepository> {
    puzzles: P,
}

impl<P: PuzzleRepository> OwnershipGuard<P> {
    pub fn new(puzzles: P) -> Self {
        Self { puzzles }
    }

    /// Looks the puzzle up first, then compares owners.
    pub fn authorize(&self, puzzle: PuzzleId, caller: Option<&str>) -> RepoResult<Authorization> {
        let decision = match self.puzzles.get_puzzle(puzzle, false)? {
            None => Authorization::NotFound,
            Some(record) if record.is_owned_by(caller) => Authorization::Allowed,
            Some(_) => Authorization::Forbidden,
        };

        if decision != Authorization::Allowed {
            warn!(
                "event=authorize module=guard status=denied puzzle={} decision={} has_caller={}",
                puzzle,
                decision.as_str(),
                caller.is_some()
            );
        }
        Ok(decision)
    }

    /// Rejects an absent caller before touching the store.
    pub fn authorize_strict(
        &self,
        puzzle: PuzzleId,
        caller: Option<&str>,
    ) -> RepoResult<Authorization> {
        if caller.is_none() {
            warn!(
                "event=authorize module=guard status=denied puzzle={puzzle} decision=forbidden has_caller=false"
            );
            return Ok(Authorization::Forbidden);
        }
        self.authorize(puzzle, caller)
    }

    /// Strict check converted into a `ServiceError` on denial.
    pub fn ensure_owner(&self, puzzle: PuzzleId, caller: Option<&str>) -> Result<(), ServiceError> {
        self.authorize_strict(puzzle, caller)?.require(puzzle)
    }

    pub(crate) fn puzzles(&self) -> &P {
        &self.puzzles
    }
}
