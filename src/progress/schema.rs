// SPDX-License-Identifier: MPL-2.0

/// SQL schema for the progress database.
///
/// Column names match the files written by earlier releases of the app, so an
/// existing `books_progress.db` opens without conversion.
pub const SCHEMA: &str = r#"
PRAGMA user_version = 1;

-- books_progress: one row per tracked tractate, keyed by bookId
CREATE TABLE IF NOT EXISTS books_progress (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bookId TEXT UNIQUE NOT NULL,
    bookName TEXT NOT NULL,
    currentChapterIndex INTEGER NOT NULL DEFAULT 0 CHECK (currentChapterIndex >= 0),
    currentEpisodeIndex INTEGER NOT NULL DEFAULT 0 CHECK (currentEpisodeIndex >= 0),
    lastAccessed INTEGER NOT NULL,
    createdAt INTEGER NOT NULL,
    timesCompleted INTEGER NOT NULL DEFAULT 0 CHECK (timesCompleted >= 0),
    notes TEXT DEFAULT NULL
);

CREATE INDEX IF NOT EXISTS idx_books_progress_last_accessed
    ON books_progress(lastAccessed DESC);

-- reading_sessions: log of reading stints, purged together with the book
CREATE TABLE IF NOT EXISTS reading_sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bookId TEXT NOT NULL,
    startedAt INTEGER NOT NULL,
    endedAt INTEGER,
    startChapterIndex INTEGER NOT NULL CHECK (startChapterIndex >= 0),
    startEpisodeIndex INTEGER NOT NULL CHECK (startEpisodeIndex >= 0),
    endChapterIndex INTEGER CHECK (endChapterIndex >= 0),
    endEpisodeIndex INTEGER CHECK (endEpisodeIndex >= 0),
    durationMillis INTEGER
);

CREATE INDEX IF NOT EXISTS idx_reading_sessions_book ON reading_sessions(bookId, startedAt DESC);
"#;
