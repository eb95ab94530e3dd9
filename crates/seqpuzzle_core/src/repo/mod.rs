//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for puzzles and answers.
//! - Keep SQL details, transactions and index shifting inside the repository
//!   boundary.
//!
//! # Invariants
//! - Every answer mutation that touches `answer_index` runs in one
//!   `TransactionBehavior::Immediate` transaction; dropping the transaction
//!   without `commit()` rolls the whole shift back.
//! - Soft-deleted puzzles are invisible to every read path.
//! - Repository APIs return semantic errors (`PuzzleNotFound`,
//!   `IndexOutOfRange`) in addition to DB transport errors.

pub mod answer_repo;
pub mod puzzle_repo;
mod schema;

use crate::db::DbError;
use crate::model::puzzle::PuzzleId;
use crate::model::ModelValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from puzzle and answer repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// Caller input rejected before any store access.
    Validation(ModelValidationError),
    /// Underlying SQLite/bootstrap error. The enclosing transaction, if any,
    /// has been rolled back.
    Db(DbError),
    /// Puzzle does not exist or is soft-deleted.
    PuzzleNotFound(PuzzleId),
    /// Move target lies outside `[0, len)`.
    IndexOutOfRange { index: i64, len: i64 },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::PuzzleNotFound(id) => write!(f, "puzzle not found: {id}"),
            Self::IndexOutOfRange { index, len } => write!(
                f,
                "answer index {index} is out of range for {len} answers"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "puzzle repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "puzzle repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "puzzle repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted puzzle data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
