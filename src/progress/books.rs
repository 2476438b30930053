// SPDX-License-Identifier: MPL-2.0

use crate::progress::{ProgressDb, ProgressError};
use rusqlite::{OptionalExtension, params};
use serde::{Deserialize, Serialize};

/// Reading progress for one tractate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookProgress {
    pub id: i64,
    pub book_id: String,
    pub book_name: String,
    pub current_chapter_index: u32,
    pub current_episode_index: u32,
    /// Epoch millis of the last progress write
    pub last_accessed: i64,
    /// Epoch millis of the first insert, never updated
    pub created_at: i64,
    pub times_completed: u32,
    pub notes: Option<String>,
}

const SELECT_PROGRESS: &str = r#"
    SELECT id, bookId, bookName, currentChapterIndex, currentEpisodeIndex,
           lastAccessed, createdAt, timesCompleted, notes
    FROM books_progress
"#;

/// Operations on the `books_progress` table
pub struct ProgressRepository<'a> {
    db: &'a ProgressDb,
}

impl<'a> ProgressRepository<'a> {
    pub fn new(db: &'a ProgressDb) -> Self {
        Self { db }
    }

    /// Start tracking a book. An already tracked book is left exactly as it is.
    /// Returns whether a new row was created.
    pub fn initialize(&self, book_id: &str, book_name: &str) -> Result<bool, ProgressError> {
        let conn = self.db.conn();
        let now = ProgressDb::now();

        let inserted = conn.execute(
            r#"
            INSERT INTO books_progress (bookId, bookName, lastAccessed, createdAt)
            VALUES (?1, ?2, ?3, ?3)
            ON CONFLICT(bookId) DO NOTHING
            "#,
            params![book_id, book_name, now],
        )?;

        Ok(inserted > 0)
    }

    /// Get progress for a book, `None` if it was never opened
    pub fn get(&self, book_id: &str) -> Result<Option<BookProgress>, ProgressError> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(&format!("{SELECT_PROGRESS} WHERE bookId = ?"))?;

        let progress = stmt
            .query_row([book_id], Self::row_to_progress)
            .optional()?;

        Ok(progress)
    }

    /// Most recently read first
    pub fn list(&self, offset: usize, limit: usize) -> Result<Vec<BookProgress>, ProgressError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let conn = self.db.conn();
        let mut stmt = conn.prepare(&format!(
            "{SELECT_PROGRESS} ORDER BY lastAccessed DESC, id DESC LIMIT ? OFFSET ?"
        ))?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let mut rows = stmt.query(params![limit, offset])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(Self::row_to_progress(row)?);
        }

        Ok(books)
    }

    /// Move the reading position. Notes, completions and createdAt are untouched.
    pub fn update_position(
        &self,
        book_id: &str,
        chapter_index: u32,
        episode_index: u32,
    ) -> Result<(), ProgressError> {
        let conn = self.db.conn();

        let updated = conn.execute(
            r#"
            UPDATE books_progress SET
                currentChapterIndex = ?2,
                currentEpisodeIndex = ?3,
                lastAccessed = MAX(lastAccessed, ?4)
            WHERE bookId = ?1
            "#,
            params![book_id, chapter_index, episode_index, ProgressDb::now()],
        )?;

        Self::require_row(updated, book_id)
    }

    /// Replace the notes (or clear them with `None`). Counts as an access,
    /// so the book moves to the front of the recent list.
    pub fn set_notes(&self, book_id: &str, notes: Option<&str>) -> Result<(), ProgressError> {
        let conn = self.db.conn();

        let updated = conn.execute(
            r#"
            UPDATE books_progress SET
                notes = ?2,
                lastAccessed = MAX(lastAccessed, ?3)
            WHERE bookId = ?1
            "#,
            params![book_id, notes, ProgressDb::now()],
        )?;

        Self::require_row(updated, book_id)
    }

    /// Back to the first episode with a clean completion count. Notes survive.
    pub fn reset(&self, book_id: &str) -> Result<(), ProgressError> {
        let conn = self.db.conn();

        let updated = conn.execute(
            r#"
            UPDATE books_progress SET
                currentChapterIndex = 0,
                currentEpisodeIndex = 0,
                timesCompleted = 0,
                lastAccessed = MAX(lastAccessed, ?2)
            WHERE bookId = ?1
            "#,
            params![book_id, ProgressDb::now()],
        )?;

        Self::require_row(updated, book_id)
    }

    /// Count one more read-through and rewind to the start
    pub fn complete(&self, book_id: &str) -> Result<(), ProgressError> {
        let conn = self.db.conn();

        let updated = conn.execute(
            r#"
            UPDATE books_progress SET
                currentChapterIndex = 0,
                currentEpisodeIndex = 0,
                timesCompleted = timesCompleted + 1,
                lastAccessed = MAX(lastAccessed, ?2)
            WHERE bookId = ?1
            "#,
            params![book_id, ProgressDb::now()],
        )?;

        Self::require_row(updated, book_id)
    }

    /// Remove the book and its reading sessions. Returns the number of
    /// progress rows removed (0 when the book was not tracked).
    pub fn delete(&self, book_id: &str) -> Result<usize, ProgressError> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        let removed = tx.execute("DELETE FROM books_progress WHERE bookId = ?", [book_id])?;
        tx.execute("DELETE FROM reading_sessions WHERE bookId = ?", [book_id])?;

        tx.commit()?;
        Ok(removed)
    }

    /// Number of tracked books
    pub fn count(&self) -> Result<usize, ProgressError> {
        let conn = self.db.conn();

        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM books_progress", [], |row| row.get(0))?;

        Ok(count as usize)
    }

    fn require_row(updated: usize, book_id: &str) -> Result<(), ProgressError> {
        if updated == 0 {
            return Err(ProgressError::NotFound(book_id.to_string()));
        }
        Ok(())
    }

    fn row_to_progress(row: &rusqlite::Row) -> Result<BookProgress, rusqlite::Error> {
        Ok(BookProgress {
            id: row.get(0)?,
            book_id: row.get(1)?,
            book_name: row.get(2)?,
            current_chapter_index: row.get(3)?,
            current_episode_index: row.get(4)?,
            last_accessed: row.get(5)?,
            created_at: row.get(6)?,
            times_completed: row.get(7)?,
            notes: row.get(8)?,
        })
    }
}
