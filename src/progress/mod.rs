// SPDX-License-Identifier: MPL-2.0

//! Local reading-progress persistence.
//!
//! [`ProgressStore`] is the only entry point callers need; the repositories
//! underneath are synchronous and run on the blocking pool.

mod books;
mod db;
mod schema;
mod sessions;
mod store;

pub use books::{BookProgress, ProgressRepository};
pub use db::{ProgressDb, StoreLocation};
pub use sessions::{ReadingSession, SessionRepository};
pub use store::{ProgressStore, StoreState};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProgressError {
    /// Storage could not be opened or the schema could not be created.
    /// Once seen, every later call on the same store returns it again.
    #[error("progress store unavailable: {0}")]
    Init(String),
    /// The operation needs an existing row for this book.
    #[error("no progress recorded for book {0:?}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("database path error: {0}")]
    Path(String),
    #[error("storage task failed: {0}")]
    Task(String),
}

impl ProgressError {
    /// Progress tracking is unavailable for the rest of the session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProgressError::Init(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_init_failures_are_fatal() {
        assert!(ProgressError::Init("disk gone".into()).is_fatal());
        assert!(!ProgressError::NotFound("berakhot".into()).is_fatal());
        assert!(!ProgressError::Task("cancelled".into()).is_fatal());
    }

    #[test]
    fn not_found_names_the_book() {
        let err = ProgressError::NotFound("peah".into());
        assert_eq!(err.to_string(), "no progress recorded for book \"peah\"");
    }
}
