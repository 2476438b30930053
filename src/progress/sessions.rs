// SPDX-License-Identifier: MPL-2.0

use crate::progress::{ProgressDb, ProgressError};
use rusqlite::params;
use serde::{Deserialize, Serialize};

/// One stint of reading a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSession {
    pub id: i64,
    pub book_id: String,
    pub started_at: i64,
    /// `None` while the session is still open
    pub ended_at: Option<i64>,
    pub start_chapter_index: u32,
    pub start_episode_index: u32,
    pub end_chapter_index: Option<u32>,
    pub end_episode_index: Option<u32>,
    pub duration_millis: Option<i64>,
}

/// Operations on the `reading_sessions` table
pub struct SessionRepository<'a> {
    db: &'a ProgressDb,
}

impl<'a> SessionRepository<'a> {
    pub fn new(db: &'a ProgressDb) -> Self {
        Self { db }
    }

    /// Open a session at the given position. The book must already be tracked.
    pub fn start(
        &self,
        book_id: &str,
        chapter_index: u32,
        episode_index: u32,
    ) -> Result<i64, ProgressError> {
        let conn = self.db.conn();

        let inserted = conn.execute(
            r#"
            INSERT INTO reading_sessions (bookId, startedAt, startChapterIndex, startEpisodeIndex)
            SELECT bookId, ?2, ?3, ?4 FROM books_progress WHERE bookId = ?1
            "#,
            params![book_id, ProgressDb::now(), chapter_index, episode_index],
        )?;

        if inserted == 0 {
            return Err(ProgressError::NotFound(book_id.to_string()));
        }

        Ok(conn.last_insert_rowid())
    }

    /// Close an open session. Returns false if no open session has this id.
    pub fn end(
        &self,
        session_id: i64,
        chapter_index: u32,
        episode_index: u32,
    ) -> Result<bool, ProgressError> {
        let conn = self.db.conn();
        let now = ProgressDb::now();

        let updated = conn.execute(
            r#"
            UPDATE reading_sessions SET
                endedAt = MAX(startedAt, ?2),
                endChapterIndex = ?3,
                endEpisodeIndex = ?4,
                durationMillis = MAX(0, ?2 - startedAt)
            WHERE id = ?1 AND endedAt IS NULL
            "#,
            params![session_id, now, chapter_index, episode_index],
        )?;

        Ok(updated > 0)
    }

    /// Sessions for a book, newest first
    pub fn list_for_book(&self, book_id: &str) -> Result<Vec<ReadingSession>, ProgressError> {
        let conn = self.db.conn();

        let mut stmt = conn.prepare(
            r#"
            SELECT id, bookId, startedAt, endedAt, startChapterIndex, startEpisodeIndex,
                   endChapterIndex, endEpisodeIndex, durationMillis
            FROM reading_sessions
            WHERE bookId = ?
            ORDER BY startedAt DESC, id DESC
            "#,
        )?;

        let sessions = stmt
            .query_map([book_id], |row| {
                Ok(ReadingSession {
                    id: row.get(0)?,
                    book_id: row.get(1)?,
                    started_at: row.get(2)?,
                    ended_at: row.get(3)?,
                    start_chapter_index: row.get(4)?,
                    start_episode_index: row.get(5)?,
                    end_chapter_index: row.get(6)?,
                    end_episode_index: row.get(7)?,
                    duration_millis: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sessions)
    }

    /// Total time of finished sessions for a book
    pub fn total_millis(&self, book_id: &str) -> Result<i64, ProgressError> {
        let conn = self.db.conn();

        let total: i64 = conn.query_row(
            "SELECT COALESCE(SUM(durationMillis), 0) FROM reading_sessions WHERE bookId = ?",
            [book_id],
            |row| row.get(0),
        )?;

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{ProgressRepository, StoreLocation};

    fn db_with_book(book_id: &str) -> ProgressDb {
        let db = ProgressDb::open(&StoreLocation::Memory).unwrap();
        ProgressRepository::new(&db).initialize(book_id, book_id).unwrap();
        db
    }

    #[test]
    fn start_requires_tracked_book() {
        let db = ProgressDb::open(&StoreLocation::Memory).unwrap();
        let sessions = SessionRepository::new(&db);

        let err = sessions.start("nazir", 0, 0).unwrap_err();
        assert!(matches!(err, ProgressError::NotFound(_)));
        assert!(sessions.list_for_book("nazir").unwrap().is_empty());
    }

    #[test]
    fn end_records_position_and_duration() {
        let db = db_with_book("sotah");
        let sessions = SessionRepository::new(&db);

        let id = sessions.start("sotah", 1, 2).unwrap();
        db.conn()
            .execute(
                "UPDATE reading_sessions SET startedAt = startedAt - 5000 WHERE id = ?",
                [id],
            )
            .unwrap();

        assert!(sessions.end(id, 2, 0).unwrap());
        assert!(!sessions.end(id, 3, 0).unwrap(), "already closed");

        let listed = sessions.list_for_book("sotah").unwrap();
        assert_eq!(listed.len(), 1);
        let session = &listed[0];
        assert_eq!((session.start_chapter_index, session.start_episode_index), (1, 2));
        assert_eq!(session.end_chapter_index, Some(2));
        assert!(session.duration_millis.unwrap() >= 5000);
        assert_eq!(sessions.total_millis("sotah").unwrap(), session.duration_millis.unwrap());
    }

    #[test]
    fn open_sessions_do_not_count_towards_total() {
        let db = db_with_book("gittin");
        let sessions = SessionRepository::new(&db);

        sessions.start("gittin", 0, 0).unwrap();
        assert_eq!(sessions.total_millis("gittin").unwrap(), 0);
        assert_eq!(sessions.total_millis("unknown").unwrap(), 0);
    }
}
