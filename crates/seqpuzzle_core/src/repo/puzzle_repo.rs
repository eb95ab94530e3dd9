//! Puzzle repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/rename/soft-delete APIs over `puzzles` storage.
//! - Serve the non-transactional point read used by the ownership guard.
//!
//! # Invariants
//! - Only active (`is_deleted=0`) puzzles are returned unless explicitly
//!   requested.
//! - Puzzle rows are never physically deleted.
//! - Owner listing is deterministic: `created_at ASC, uuid ASC`.

use super::schema::{ensure_connection_ready, parse_deleted_flag, parse_uuid, PUZZLES_TABLE};
use super::{RepoError, RepoResult};
use crate::model::puzzle::{Puzzle, PuzzleId};
use log::info;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const PUZZLE_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    owner,
    is_deleted,
    created_at,
    updated_at
FROM puzzles";

/// Repository interface for puzzle records.
pub trait PuzzleRepository {
    /// Creates one puzzle owned by `owner`.
    fn create_puzzle(&self, name: &str, owner: &str) -> RepoResult<Puzzle>;
    /// Loads one puzzle by id.
    fn get_puzzle(&self, id: PuzzleId, include_deleted: bool) -> RepoResult<Option<Puzzle>>;
    /// Lists active puzzles created by `owner`.
    fn list_puzzles_for_owner(&self, owner: &str) -> RepoResult<Vec<Puzzle>>;
    /// Renames one active puzzle.
    fn rename_puzzle(&self, id: PuzzleId, name: &str) -> RepoResult<()>;
    /// Marks one active puzzle as deleted.
    fn soft_delete_puzzle(&self, id: PuzzleId) -> RepoResult<()>;
}

impl<T: PuzzleRepository + ?Sized> PuzzleRepository for &T {
    fn create_puzzle(&self, name: &str, owner: &str) -> RepoResult<Puzzle> {
        (**self).create_puzzle(name, owner)
    }

    fn get_puzzle(&self, id: PuzzleId, include_deleted: bool) -> RepoResult<Option<Puzzle>> {
        (**self).get_puzzle(id, include_deleted)
    }

    fn list_puzzles_for_owner(&self, owner: &str) -> RepoResult<Vec<Puzzle>> {
        (**self).list_puzzles_for_owner(owner)
    }

    fn rename_puzzle(&self, id: PuzzleId, name: &str) -> RepoResult<()> {
        (**self).rename_puzzle(id, name)
    }

    fn soft_delete_puzzle(&self, id: PuzzleId) -> RepoResult<()> {
        (**self).soft_delete_puzzle(id)
    }
}

/// SQLite-backed puzzle repository.
pub struct SqlitePuzzleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePuzzleRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[PUZZLES_TABLE])?;
        Ok(Self { conn })
    }
}

impl PuzzleRepository for SqlitePuzzleRepository<'_> {
    fn create_puzzle(&self, name: &str, owner: &str) -> RepoResult<Puzzle> {
        let uuid = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO puzzles (uuid, name, owner, is_deleted)
             VALUES (?1, ?2, ?3, 0);",
            params![uuid.to_string(), name, owner],
        )?;
        info!("event=puzzle_create module=repo status=ok puzzle={uuid}");

        self.get_puzzle(uuid, false)?
            .ok_or(RepoError::PuzzleNotFound(uuid))
    }

    fn get_puzzle(&self, id: PuzzleId, include_deleted: bool) -> RepoResult<Option<Puzzle>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PUZZLE_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), i64::from(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_puzzle_row(row)?));
        }

        Ok(None)
    }

    fn list_puzzles_for_owner(&self, owner: &str) -> RepoResult<Vec<Puzzle>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PUZZLE_SELECT_SQL}
             WHERE owner = ?1
               AND is_deleted = 0
             ORDER BY created_at ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([owner])?;
        let mut puzzles = Vec::new();
        while let Some(row) = rows.next()? {
            puzzles.push(parse_puzzle_row(row)?);
        }
        Ok(puzzles)
    }

    fn rename_puzzle(&self, id: PuzzleId, name: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE puzzles
             SET name = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1
               AND is_deleted = 0;",
            params![id.to_string(), name],
        )?;
        if changed == 0 {
            return Err(RepoError::PuzzleNotFound(id));
        }
        Ok(())
    }

    fn soft_delete_puzzle(&self, id: PuzzleId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE puzzles
             SET is_deleted = 1,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1
               AND is_deleted = 0;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::PuzzleNotFound(id));
        }
        info!("event=puzzle_delete module=repo status=ok puzzle={id}");
        Ok(())
    }
}

fn parse_puzzle_row(row: &Row<'_>) -> RepoResult<Puzzle> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Puzzle {
        uuid: parse_uuid(&uuid_text, "puzzles.uuid")?,
        name: row.get("name")?,
        owner: row.get("owner")?,
        is_deleted: parse_deleted_flag(row.get("is_deleted")?, "puzzles.is_deleted")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
