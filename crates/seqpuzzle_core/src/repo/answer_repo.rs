//! Ordered answer repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Insert, remove and move answers while keeping `answer_index` dense.
//! - Serve the canonical ordered read used by listing and verification.
//!
//! # Invariants
//! - After every commit the indices of one puzzle's answers are exactly
//!   `{0, ..., N-1}`.
//! - Every mutation is a range shift of neighbouring rows plus one row write,
//!   executed in a single immediate transaction. There is no bulk reindex.
//! - Shifts are always scoped to the answer's own puzzle.
//! - Canonical order is `answer_index ASC`; no other order is exposed.
//!
//! # Concurrency
//! - `TransactionBehavior::Immediate` takes SQLite's write lock at `BEGIN`,
//!   so the rows read to compute a shift range cannot change before commit.
//!   A competing writer waits for `db::BUSY_TIMEOUT`, then fails with
//!   `RepoError::Db`.

use super::schema::{
    ensure_connection_ready, parse_uuid, PUZZLES_TABLE, PUZZLE_ANSWERS_TABLE,
};
use super::{RepoError, RepoResult};
use crate::model::answer::{AnswerId, AnswerUpdate, PuzzleAnswer};
use crate::model::puzzle::PuzzleId;
use crate::model::validate_index;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

/// Repository interface for one puzzle's ordered answer collection.
///
/// Callers are expected to authorize the puzzle before invoking mutations;
/// the repository only checks that the puzzle is active.
pub trait AnswerRepository {
    /// Inserts `value` at `at_index`, shifting answers at or after it forward.
    ///
    /// `at_index` greater than the current count is treated as an append.
    fn insert_answer(&self, puzzle: PuzzleId, value: &str, at_index: i64)
        -> RepoResult<AnswerId>;
    /// Appends `value` after the last answer.
    fn append_answer(&self, puzzle: PuzzleId, value: &str) -> RepoResult<AnswerId>;
    /// Removes one answer and closes the gap. Returns `false` when absent.
    fn remove_answer(&self, id: AnswerId) -> RepoResult<bool>;
    /// Rewrites value and/or position. Returns `false` when absent.
    fn update_answer(&self, id: AnswerId, update: &AnswerUpdate) -> RepoResult<bool>;
    /// Lists answers of an active puzzle in canonical order.
    fn list_ordered(&self, puzzle: PuzzleId) -> RepoResult<Vec<PuzzleAnswer>>;
    /// Loads one answer by id.
    fn get_answer(&self, id: AnswerId) -> RepoResult<Option<PuzzleAnswer>>;
    /// Counts answers of an active puzzle.
    fn count_answers(&self, puzzle: PuzzleId) -> RepoResult<i64>;
}

/// SQLite-backed ordered answer repository.
pub struct SqliteAnswerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAnswerRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[PUZZLES_TABLE, PUZZLE_ANSWERS_TABLE])?;
        Ok(Self { conn })
    }

    fn begin_write(&self) -> RepoResult<Transaction<'conn>> {
        Ok(Transaction::new_unchecked(
            self.conn,
            TransactionBehavior::Immediate,
        )?)
    }

    fn insert_clamped(
        &self,
        puzzle: PuzzleId,
        value: &str,
        at_index: Option<i64>,
    ) -> RepoResult<AnswerId> {
        let tx = self.begin_write()?;
        ensure_active_puzzle(&tx, puzzle)?;

        let len = count_rows(&tx, puzzle)?;
        let target = at_index.map_or(len, |index| index.min(len));

        let shifted = tx.execute(
            "UPDATE puzzle_answers
             SET answer_index = answer_index + 1,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE puzzle_uuid = ?1
               AND answer_index >= ?2;",
            params![puzzle.to_string(), target],
        )?;

        let id = Uuid::new_v4();
        tx.execute(
            "INSERT INTO puzzle_answers (uuid, puzzle_uuid, value, answer_index)
             VALUES (?1, ?2, ?3, ?4);",
            params![id.to_string(), puzzle.to_string(), value, target],
        )?;
        tx.commit()?;

        debug!(
            "event=answer_insert module=repo status=ok puzzle={} index={} shifted={}",
            puzzle, target, shifted
        );
        Ok(id)
    }
}

impl AnswerRepository for SqliteAnswerRepository<'_> {
    fn insert_answer(
        &self,
        puzzle: PuzzleId,
        value: &str,
        at_index: i64,
    ) -> RepoResult<AnswerId> {
        let at_index = validate_index(at_index)?;
        self.insert_clamped(puzzle, value, Some(at_index))
    }

    fn append_answer(&self, puzzle: PuzzleId, value: &str) -> RepoResult<AnswerId> {
        self.insert_clamped(puzzle, value, None)
    }

    fn remove_answer(&self, id: AnswerId) -> RepoResult<bool> {
        let tx = self.begin_write()?;
        let Some((puzzle, removed_index)) = load_position(&tx, id)? else {
            return Ok(false);
        };

        tx.execute(
            "DELETE FROM puzzle_answers WHERE uuid = ?1;",
            [id.to_string()],
        )?;
        let shifted = tx.execute(
            "UPDATE puzzle_answers
             SET answer_index = answer_index - 1,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE puzzle_uuid = ?1
               AND answer_index > ?2;",
            params![puzzle.to_string(), removed_index],
        )?;
        tx.commit()?;

        debug!(
            "event=answer_remove module=repo status=ok puzzle={} index={} shifted={}",
            puzzle, removed_index, shifted
        );
        Ok(true)
    }

    fn update_answer(&self, id: AnswerId, update: &AnswerUpdate) -> RepoResult<bool> {
        if update.is_empty() {
            return Ok(true);
        }

        let Some(new_index) = update.answer_index else {
            let changed = self.conn.execute(
                "UPDATE puzzle_answers
                 SET value = ?2,
                     updated_at = (strftime('%s', 'now') * 1000)
                 WHERE uuid = ?1;",
                params![id.to_string(), update.value.as_deref()],
            )?;
            return Ok(changed > 0);
        };
        let new_index = validate_index(new_index)?;

        let tx = self.begin_write()?;
        let Some((puzzle, old_index)) = load_position(&tx, id)? else {
            return Ok(false);
        };

        let len = count_rows(&tx, puzzle)?;
        if new_index >= len {
            return Err(RepoError::IndexOutOfRange {
                index: new_index,
                len,
            });
        }

        let shifted = if new_index < old_index {
            tx.execute(
                "UPDATE puzzle_answers
                 SET answer_index = answer_index + 1,
                     updated_at = (strftime('%s', 'now') * 1000)
                 WHERE puzzle_uuid = ?1
                   AND uuid != ?2
                   AND answer_index >= ?3
                   AND answer_index < ?4;",
                params![puzzle.to_string(), id.to_string(), new_index, old_index],
            )?
        } else if new_index > old_index {
            tx.execute(
                "UPDATE puzzle_answers
                 SET answer_index = answer_index - 1,
                     updated_at = (strftime('%s', 'now') * 1000)
                 WHERE puzzle_uuid = ?1
                   AND uuid != ?2
                   AND answer_index > ?3
                   AND answer_index <= ?4;",
                params![puzzle.to_string(), id.to_string(), old_index, new_index],
            )?
        } else {
            0
        };

        tx.execute(
            "UPDATE puzzle_answers
             SET answer_index = ?2,
                 value = COALESCE(?3, value),
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![id.to_string(), new_index, update.value.as_deref()],
        )?;
        tx.commit()?;

        if shifted > 0 {
            debug!(
                "event=answer_move module=repo status=ok puzzle={} from_index={} to_index={} shifted={}",
                puzzle, old_index, new_index, shifted
            );
        }
        Ok(true)
    }

    fn list_ordered(&self, puzzle: PuzzleId) -> RepoResult<Vec<PuzzleAnswer>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                a.uuid AS uuid,
                a.puzzle_uuid AS puzzle_uuid,
                a.value AS value,
                a.answer_index AS answer_index
             FROM puzzle_answers a
             INNER JOIN puzzles p ON p.uuid = a.puzzle_uuid
             WHERE a.puzzle_uuid = ?1
               AND p.is_deleted = 0
             ORDER BY a.answer_index ASC;",
        )?;

        let mut rows = stmt.query([puzzle.to_string()])?;
        let mut answers = Vec::new();
        while let Some(row) = rows.next()? {
            answers.push(parse_answer_row(row)?);
        }
        Ok(answers)
    }

    fn get_answer(&self, id: AnswerId) -> RepoResult<Option<PuzzleAnswer>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, puzzle_uuid, value, answer_index
             FROM puzzle_answers
             WHERE uuid = ?1;",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_answer_row(row)?));
        }
        Ok(None)
    }

    fn count_answers(&self, puzzle: PuzzleId) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*)
             FROM puzzle_answers a
             INNER JOIN puzzles p ON p.uuid = a.puzzle_uuid
             WHERE a.puzzle_uuid = ?1
               AND p.is_deleted = 0;",
            [puzzle.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn ensure_active_puzzle(conn: &Connection, puzzle: PuzzleId) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM puzzles
            WHERE uuid = ?1
              AND is_deleted = 0
        );",
        [puzzle.to_string()],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::PuzzleNotFound(puzzle));
    }
    Ok(())
}

fn count_rows(conn: &Connection, puzzle: PuzzleId) -> RepoResult<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM puzzle_answers WHERE puzzle_uuid = ?1;",
        [puzzle.to_string()],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn load_position(conn: &Connection, id: AnswerId) -> RepoResult<Option<(PuzzleId, i64)>> {
    let position = conn
        .query_row(
            "SELECT puzzle_uuid, answer_index
             FROM puzzle_answers
             WHERE uuid = ?1;",
            [id.to_string()],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
        )
        .optional()?;

    match position {
        None => Ok(None),
        Some((puzzle_text, index)) => Ok(Some((
            parse_uuid(&puzzle_text, "puzzle_answers.puzzle_uuid")?,
            index,
        ))),
    }
}

fn parse_answer_row(row: &Row<'_>) -> RepoResult<PuzzleAnswer> {
    let uuid_text: String = row.get("uuid")?;
    let puzzle_text: String = row.get("puzzle_uuid")?;
    let answer_index: i64 = row.get("answer_index")?;
    if answer_index < 0 {
        return Err(RepoError::InvalidData(format!(
            "negative answer_index `{answer_index}` in puzzle_answers.answer_index"
        )));
    }

    Ok(PuzzleAnswer {
        uuid: parse_uuid(&uuid_text, "puzzle_answers.uuid")?,
        puzzle_uuid: parse_uuid(&puzzle_text, "puzzle_answers.puzzle_uuid")?,
        value: row.get("value")?,
        answer_index,
    })
}
