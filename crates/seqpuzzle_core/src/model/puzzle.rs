//! Puzzle domain model.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another puzzle.
//! - `owner` is the identity of the creating user and never changes.
//! - `is_deleted` is the source of truth for tombstone state; deleted puzzles
//!   are invisible to every lookup.

use super::ModelValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable puzzle identifier.
pub type PuzzleId = Uuid;

/// Puzzle record owning an ordered answer collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub uuid: PuzzleId,
    /// User-facing label, trimmed and non-blank.
    pub name: String,
    /// Caller identity of the creator.
    pub owner: String,
    pub is_deleted: bool,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
    /// Epoch ms update timestamp.
    pub updated_at: i64,
}

impl Puzzle {
    /// Returns whether `caller` owns this puzzle. An absent caller never does.
    pub fn is_owned_by(&self, caller: Option<&str>) -> bool {
        caller.is_some_and(|caller| caller == self.owner)
    }
}

/// Trims and validates a puzzle name.
pub fn normalize_puzzle_name(value: &str) -> Result<String, ModelValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ModelValidationError::BlankName);
    }
    Ok(trimmed.to_string())
}

/// Validates an owner identity. Identities are compared verbatim.
pub fn validate_owner(value: &str) -> Result<&str, ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::BlankOwner);
    }
    Ok(value)
}
