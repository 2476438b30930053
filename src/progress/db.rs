// SPDX-License-Identifier: MPL-2.0

use crate::config::{APP_ID, DB_FILE_NAME};
use crate::progress::ProgressError;
use crate::progress::schema::SCHEMA;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Where the progress database lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    /// Private in-memory database, gone when the store is dropped
    Memory,
}

impl StoreLocation {
    /// Default database file: ~/.local/share/{APP_ID}/books_progress.db
    pub fn default_file() -> Result<Self, ProgressError> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| ProgressError::Path("could not find data directory".to_string()))?;

        Ok(Self::File(data_dir.join(APP_ID).join(DB_FILE_NAME)))
    }
}

/// Handle to the progress database
#[derive(Clone)]
pub struct ProgressDb {
    conn: Arc<Mutex<Connection>>,
}

impl ProgressDb {
    /// Open or create the database and make sure the schema exists
    pub fn open(location: &StoreLocation) -> Result<Self, ProgressError> {
        let conn = match location {
            StoreLocation::File(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        ProgressError::Path(format!("failed to create data dir: {}", e))
                    })?;
                }
                Connection::open(path)?
            }
            StoreLocation::Memory => Connection::open_in_memory()?,
        };

        // In-memory databases answer "memory" here, which is fine
        let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        tracing::debug!(journal_mode = %mode, "progress database opened");

        Self::migrate(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// All statements are CREATE IF NOT EXISTS, so this is safe to repeat
    fn migrate(conn: &Connection) -> Result<(), ProgressError> {
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Access connection for operations
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        // Statements are single-shot, so a panic mid-call leaves nothing half-applied
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current time in epoch milliseconds
    pub fn now() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
