//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `seqpuzzle_core` linkage with a deterministic probe.
//! - Run one guess verification against a database file:
//!   `seqpuzzle_cli verify <db-path> <puzzle-uuid> <a/b/c>`.

use seqpuzzle_core::db::open_db;
use seqpuzzle_core::{parse_id, SequenceVerifier, SqliteAnswerRepository, VerifyOutcome};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            println!("seqpuzzle_core ping={}", seqpuzzle_core::ping());
            println!("seqpuzzle_core version={}", seqpuzzle_core::core_version());
            ExitCode::SUCCESS
        }
        [command, db_path, puzzle, guess] if command == "verify" => {
            match verify(db_path, puzzle, guess) {
                Ok(outcome) => {
                    println!("{}", outcome.as_str());
                    ExitCode::from(outcome_status(outcome))
                }
                Err(err) => {
                    eprintln!("error: {err}");
                    ExitCode::from(2)
                }
            }
        }
        _ => {
            eprintln!("usage: seqpuzzle_cli [verify <db-path> <puzzle-uuid> <a/b/c>]");
            ExitCode::from(2)
        }
    }
}

fn verify(db_path: &str, puzzle: &str, guess: &str) -> Result<VerifyOutcome, Box<dyn Error>> {
    let puzzle = parse_id(puzzle)?;
    let conn = open_db(db_path)?;
    let verifier = SequenceVerifier::new(SqliteAnswerRepository::try_new(&conn)?);
    Ok(verifier.verify_path(puzzle, guess)?)
}

/// `0` for a correct guess, `1` for any other outcome.
fn outcome_status(outcome: VerifyOutcome) -> u8 {
    if outcome.is_correct() {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::outcome_status;
    use seqpuzzle_core::VerifyOutcome;

    #[test]
    fn only_correct_guess_exits_zero() {
        assert_eq!(outcome_status(VerifyOutcome::Correct), 0);
        assert_eq!(outcome_status(VerifyOutcome::Incorrect), 1);
        assert_eq!(outcome_status(VerifyOutcome::TooMany), 1);
        assert_eq!(outcome_status(VerifyOutcome::NotFound), 1);
    }
}
