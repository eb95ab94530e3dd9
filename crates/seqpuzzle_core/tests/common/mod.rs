#![allow(dead_code)]

use rusqlite::Connection;
use seqpuzzle_core::db::open_db_in_memory;
use seqpuzzle_core::{
    AnswerService, PuzzleId, PuzzleService, SqliteAnswerRepository, SqlitePuzzleRepository,
};

pub const OWNER: &str = "owner-1";

pub fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

pub fn puzzle_service(conn: &Connection) -> PuzzleService<SqlitePuzzleRepository<'_>> {
    PuzzleService::new(SqlitePuzzleRepository::try_new(conn).unwrap())
}

pub fn answer_service(
    conn: &Connection,
) -> AnswerService<SqliteAnswerRepository<'_>, SqlitePuzzleRepository<'_>> {
    AnswerService::new(
        SqliteAnswerRepository::try_new(conn).unwrap(),
        SqlitePuzzleRepository::try_new(conn).unwrap(),
    )
}

pub fn create_puzzle(conn: &Connection, name: &str) -> PuzzleId {
    puzzle_service(conn).create_puzzle(name, OWNER).unwrap().uuid
}

/// Creates a puzzle whose answers are `values` in order.
pub fn puzzle_with_answers(conn: &Connection, values: &[&str]) -> PuzzleId {
    let puzzle = create_puzzle(conn, "fixture");
    let answers = answer_service(conn);
    for value in values {
        answers.append(puzzle, value).unwrap();
    }
    puzzle
}

/// Canonical values of one puzzle.
pub fn ordered_values(conn: &Connection, puzzle: PuzzleId) -> Vec<String> {
    answer_service(conn)
        .list_ordered(puzzle)
        .unwrap()
        .into_iter()
        .map(|answer| answer.value)
        .collect()
}

/// Reads `answer_index` straight from storage and asserts it is exactly
/// `0..N` for the puzzle, independent of the repository read path.
pub fn assert_dense(conn: &Connection, puzzle: PuzzleId) {
    let mut stmt = conn
        .prepare(
            "SELECT answer_index
             FROM puzzle_answers
             WHERE puzzle_uuid = ?1
             ORDER BY answer_index ASC;",
        )
        .unwrap();
    let indices: Vec<i64> = stmt
        .query_map([puzzle.to_string()], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    let expected: Vec<i64> = (0..indices.len() as i64).collect();
    assert_eq!(indices, expected, "answer indices of {puzzle} are not dense");
}
