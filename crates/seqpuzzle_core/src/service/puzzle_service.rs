//! Puzzle catalog use-case service.
//!
//! # Responsibility
//! - Create, list, rename and soft-delete puzzles.
//! - Normalize names and owner identities above the repository layer.
//!
//! # Invariants
//! - Rename and delete are owner-gated.
//! - Deleted puzzles disappear from every lookup, including the guard.

use super::ownership::OwnershipGuard;
use super::ServiceError;
use crate::model::puzzle::{normalize_puzzle_name, validate_owner, Puzzle, PuzzleId};
use crate::repo::puzzle_repo::PuzzleRepository;
use crate::repo::RepoResult;

/// Puzzle catalog facade.
pub struct PuzzleService<P: PuzzleRepository> {
    guard: OwnershipGuard<P>,
}

impl<P: PuzzleRepository> PuzzleService<P> {
    pub fn new(puzzles: P) -> Self {
        Self {
            guard: OwnershipGuard::new(puzzles),
        }
    }

    pub fn guard(&self) -> &OwnershipGuard<P> {
        &self.guard
    }

    /// Creates a puzzle owned by `owner`.
    pub fn create_puzzle(&self, name: &str, owner: &str) -> Result<Puzzle, ServiceError> {
        let name = normalize_puzzle_name(name)?;
        let owner = validate_owner(owner)?;
        Ok(self.guard.puzzles().create_puzzle(name.as_str(), owner)?)
    }

    /// Loads an active puzzle.
    pub fn get_puzzle(&self, id: PuzzleId) -> RepoResult<Option<Puzzle>> {
        self.guard.puzzles().get_puzzle(id, false)
    }

    /// Lists active puzzles created by `owner`.
    pub fn list_puzzles_for_owner(&self, owner: &str) -> RepoResult<Vec<Puzzle>> {
        self.guard.puzzles().list_puzzles_for_owner(owner)
    }

    pub fn rename_puzzle_as(
        &self,
        caller: Option<&str>,
        id: PuzzleId,
        name: &str,
    ) -> Result<(), ServiceError> {
        let name = normalize_puzzle_name(name)?;
        self.guard.ensure_owner(id, caller)?;
        Ok(self.guard.puzzles().rename_puzzle(id, name.as_str())?)
    }

    /// Soft-deletes a puzzle. Its answers stay in storage but are no longer
    /// listed or verifiable.
    pub fn delete_puzzle_as(&self, caller: Option<&str>, id: PuzzleId) -> Result<(), ServiceError> {
        self.guard.ensure_owner(id, caller)?;
        Ok(self.guard.puzzles().soft_delete_puzzle(id)?)
    }
}
