//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Gate puzzle-scoped operations behind the ownership guard.
//! - Keep boundary layers decoupled from storage details.

pub mod answer_service;
pub mod ownership;
pub mod puzzle_service;
pub mod verify_service;

use crate::db::DbError;
use crate::model::answer::AnswerId;
use crate::model::puzzle::PuzzleId;
use crate::model::ModelValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors surfaced by owner-gated service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller input rejected before any store access.
    Validation(ModelValidationError),
    /// Caller identity is absent or does not own the puzzle.
    Forbidden(PuzzleId),
    /// Puzzle does not exist or is soft-deleted.
    PuzzleNotFound(PuzzleId),
    /// Answer does not exist.
    AnswerNotFound(AnswerId),
    /// Move target lies outside the current answer range.
    IndexOutOfRange { index: i64, len: i64 },
    /// Storage failure after rollback.
    Storage(DbError),
    /// Any other repository failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Forbidden(id) => write!(f, "caller does not own puzzle {id}"),
            Self::PuzzleNotFound(id) => write!(f, "puzzle not found: {id}"),
            Self::AnswerNotFound(id) => write!(f, "puzzle answer not found: {id}"),
            Self::IndexOutOfRange { index, len } => write!(
                f,
                "answer index {index} is out of range for {len} answers"
            ),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::Db(err) => Self::Storage(err),
            RepoError::PuzzleNotFound(id) => Self::PuzzleNotFound(id),
            RepoError::IndexOutOfRange { index, len } => Self::IndexOutOfRange { index, len },
            other => Self::Repo(other),
        }
    }
}

impl From<ModelValidationError> for ServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}
