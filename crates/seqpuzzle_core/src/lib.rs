//! Core domain logic for SeqPuzzle.
//! This crate owns the ordered answer invariant and guess verification.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, init_logging_with, logging_status, LogConfig};
pub use model::answer::{answer_values, AnswerId, AnswerUpdate, PuzzleAnswer};
pub use model::puzzle::{Puzzle, PuzzleId};
pub use model::{parse_id, ModelValidationError};
pub use repo::answer_repo::{AnswerRepository, SqliteAnswerRepository};
pub use repo::puzzle_repo::{PuzzleRepository, SqlitePuzzleRepository};
pub use repo::{RepoError, RepoResult};
pub use service::answer_service::AnswerService;
pub use service::ownership::{Authorization, OwnershipGuard};
pub use service::puzzle_service::PuzzleService;
pub use service::verify_service::{
    compare_sequences, split_guess_path, SequenceVerifier, VerifyOutcome,
};
pub use service::ServiceError;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
