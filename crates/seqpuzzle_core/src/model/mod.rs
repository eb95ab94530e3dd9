//! Domain model for puzzles and their ordered answers.
//!
//! # Responsibility
//! - Define the records shared by repositories, services and boundary callers.
//! - Validate caller-supplied values before any store access.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - Puzzles are soft-deleted; answers are physically removed.
//! - Answer indices of one puzzle form exactly `{0, ..., N-1}` after commit.

pub mod answer;
pub mod puzzle;

use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Validation failures detected before a transaction is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Identifier text is not a UUID.
    MalformedId(String),
    /// Puzzle name is blank after trim.
    BlankName,
    /// Owner identity is blank after trim.
    BlankOwner,
    /// Answer index is below zero.
    NegativeIndex(i64),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedId(value) => write!(f, "malformed identifier `{value}`"),
            Self::BlankName => write!(f, "puzzle name must not be blank"),
            Self::BlankOwner => write!(f, "puzzle owner must not be blank"),
            Self::NegativeIndex(index) => {
                write!(f, "answer index must be non-negative, got {index}")
            }
        }
    }
}

impl Error for ModelValidationError {}

/// Parses a boundary-supplied identifier.
pub fn parse_id(value: &str) -> Result<Uuid, ModelValidationError> {
    Uuid::parse_str(value.trim()).map_err(|_| ModelValidationError::MalformedId(value.to_string()))
}

/// Rejects negative answer positions.
pub fn validate_index(index: i64) -> Result<i64, ModelValidationError> {
    if index < 0 {
        return Err(ModelValidationError::NegativeIndex(index));
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::{parse_id, validate_index, ModelValidationError};
    use uuid::Uuid;

    #[test]
    fn parse_id_accepts_padded_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&format!(" {id} ")).unwrap(), id);
    }

    #[test]
    fn parse_id_rejects_numeric_ids() {
        let err = parse_id("42").unwrap_err();
        assert_eq!(err, ModelValidationError::MalformedId("42".to_string()));
    }

    #[test]
    fn validate_index_rejects_negative_values() {
        assert_eq!(validate_index(0).unwrap(), 0);
        assert_eq!(
            validate_index(-1).unwrap_err(),
            ModelValidationError::NegativeIndex(-1)
        );
    }
}
