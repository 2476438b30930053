// SPDX-License-Identifier: MPL-2.0

//! Async facade over the progress database.
//!
//! The store opens its database lazily: the first operation (or an explicit
//! [`ProgressStore::initialize`]) opens the file and creates the schema. That
//! initialization is single-flight. Concurrent callers all await the same
//! attempt, and its outcome, success or failure, is kept for the lifetime of
//! the store.

use crate::progress::{
    BookProgress, ProgressDb, ProgressError, ProgressRepository, ReadingSession,
    SessionRepository, StoreLocation,
};
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(test)]
use std::sync::atomic::AtomicUsize;
use tokio::sync::OnceCell;
use tokio::task;
use tracing::{debug, error, info, warn};

/// Lifecycle of a [`ProgressStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Initializing,
    Ready,
    /// Initialization failed; terminal for this instance
    Failed,
}

/// Owner of the persisted reading progress.
///
/// Construct one per application session and share it (e.g. behind an `Arc`).
pub struct ProgressStore {
    location: StoreLocation,
    db: OnceCell<Result<ProgressDb, String>>,
    initializing: AtomicBool,
    #[cfg(test)]
    init_attempts: AtomicUsize,
}

/// Clears the in-flight flag even if the initializing future is dropped
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ProgressStore {
    /// Does not touch storage; see [`ProgressStore::initialize`]
    pub fn new(location: StoreLocation) -> Self {
        Self {
            location,
            db: OnceCell::new(),
            initializing: AtomicBool::new(false),
            #[cfg(test)]
            init_attempts: AtomicUsize::new(0),
        }
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    pub fn state(&self) -> StoreState {
        match self.db.get() {
            Some(Ok(_)) => StoreState::Ready,
            Some(Err(_)) => StoreState::Failed,
            None if self.initializing.load(Ordering::SeqCst) => StoreState::Initializing,
            None => StoreState::Uninitialized,
        }
    }

    /// Open storage and ensure the schema. Safe to call repeatedly.
    pub async fn initialize(&self) -> Result<(), ProgressError> {
        self.ready().await.map(|_| ())
    }

    /// Start tracking a book. Returns true if it was not tracked before;
    /// an existing row is never modified.
    pub async fn initialize_book_progress(
        &self,
        book_id: &str,
        book_name: &str,
    ) -> Result<bool, ProgressError> {
        let (id, name) = (book_id.to_owned(), book_name.to_owned());
        let created = self
            .run("initialize_book_progress", move |db| {
                ProgressRepository::new(db).initialize(&id, &name)
            })
            .await?;

        if created {
            debug!(book_id, "started tracking book");
        }
        Ok(created)
    }

    /// Fails with [`ProgressError::NotFound`] unless the book is tracked
    pub async fn update_progress(
        &self,
        book_id: &str,
        chapter_index: u32,
        episode_index: u32,
    ) -> Result<(), ProgressError> {
        let id = book_id.to_owned();
        self.run("update_progress", move |db| {
            ProgressRepository::new(db).update_position(&id, chapter_index, episode_index)
        })
        .await
    }

    /// `Ok(None)` simply means the book was never opened
    pub async fn get_book_progress(
        &self,
        book_id: &str,
    ) -> Result<Option<BookProgress>, ProgressError> {
        let id = book_id.to_owned();
        self.run("get_book_progress", move |db| {
            ProgressRepository::new(db).get(&id)
        })
        .await
    }

    /// Page through tracked books, most recently read first
    pub async fn get_books_progress(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<BookProgress>, ProgressError> {
        self.run("get_books_progress", move |db| {
            ProgressRepository::new(db).list(offset, limit)
        })
        .await
    }

    pub async fn update_book_notes(
        &self,
        book_id: &str,
        notes: Option<&str>,
    ) -> Result<(), ProgressError> {
        let id = book_id.to_owned();
        let notes = notes.map(str::to_owned);
        self.run("update_book_notes", move |db| {
            ProgressRepository::new(db).set_notes(&id, notes.as_deref())
        })
        .await
    }

    /// Rewind to the start and clear the completion count; notes are kept
    pub async fn reset_book_progress(&self, book_id: &str) -> Result<(), ProgressError> {
        let id = book_id.to_owned();
        self.run("reset_book_progress", move |db| {
            ProgressRepository::new(db).reset(&id)
        })
        .await
    }

    /// Record a finished read-through and rewind to the start
    pub async fn complete_book(&self, book_id: &str) -> Result<(), ProgressError> {
        let id = book_id.to_owned();
        self.run("complete_book", move |db| {
            ProgressRepository::new(db).complete(&id)
        })
        .await
    }

    /// Drop the book and its sessions. Deleting an untracked book succeeds
    /// and reports 0 rows.
    pub async fn delete_book_progress(&self, book_id: &str) -> Result<usize, ProgressError> {
        let id = book_id.to_owned();
        let removed = self
            .run("delete_book_progress", move |db| {
                ProgressRepository::new(db).delete(&id)
            })
            .await?;

        debug!(book_id, removed, "deleted book progress");
        Ok(removed)
    }

    pub async fn count_books(&self) -> Result<usize, ProgressError> {
        self.run("count_books", |db| ProgressRepository::new(db).count())
            .await
    }

    /// Open a reading session; returns its id
    pub async fn start_session(
        &self,
        book_id: &str,
        chapter_index: u32,
        episode_index: u32,
    ) -> Result<i64, ProgressError> {
        let id = book_id.to_owned();
        self.run("start_session", move |db| {
            SessionRepository::new(db).start(&id, chapter_index, episode_index)
        })
        .await
    }

    /// Returns false if the session does not exist or was already closed
    pub async fn end_session(
        &self,
        session_id: i64,
        chapter_index: u32,
        episode_index: u32,
    ) -> Result<bool, ProgressError> {
        self.run("end_session", move |db| {
            SessionRepository::new(db).end(session_id, chapter_index, episode_index)
        })
        .await
    }

    pub async fn sessions_for_book(
        &self,
        book_id: &str,
    ) -> Result<Vec<ReadingSession>, ProgressError> {
        let id = book_id.to_owned();
        self.run("sessions_for_book", move |db| {
            SessionRepository::new(db).list_for_book(&id)
        })
        .await
    }

    pub async fn total_reading_millis(&self, book_id: &str) -> Result<i64, ProgressError> {
        let id = book_id.to_owned();
        self.run("total_reading_millis", move |db| {
            SessionRepository::new(db).total_millis(&id)
        })
        .await
    }

    /// Wait for (or perform) initialization and hand out the database
    async fn ready(&self) -> Result<ProgressDb, ProgressError> {
        let outcome = self
            .db
            .get_or_init(|| async {
                let _in_flight = InFlight::enter(&self.initializing);
                #[cfg(test)]
                self.init_attempts.fetch_add(1, Ordering::SeqCst);

                let location = self.location.clone();
                let outcome = match task::spawn_blocking(move || ProgressDb::open(&location)).await
                {
                    Ok(Ok(db)) => Ok(db),
                    Ok(Err(e)) => Err(e.to_string()),
                    Err(e) => Err(format!("initialization task failed: {}", e)),
                };

                match &outcome {
                    Ok(_) => info!(location = ?self.location, "progress store initialized"),
                    Err(e) => error!(location = ?self.location, error = %e, "progress store initialization failed"),
                }
                outcome
            })
            .await;

        match outcome {
            Ok(db) => Ok(db.clone()),
            Err(message) => Err(ProgressError::Init(message.clone())),
        }
    }

    /// Run one repository operation on the blocking pool
    async fn run<T, F>(&self, op_name: &'static str, op: F) -> Result<T, ProgressError>
    where
        F: FnOnce(&ProgressDb) -> Result<T, ProgressError> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.ready().await?;

        let result = task::spawn_blocking(move || op(&db))
            .await
            .map_err(|e| ProgressError::Task(e.to_string()))
            .and_then(|inner| inner);

        match &result {
            Ok(_) => debug!(op = op_name, "progress operation succeeded"),
            Err(ProgressError::NotFound(book_id)) => {
                debug!(op = op_name, book_id = %book_id, "book not tracked")
            }
            Err(e) => warn!(op = op_name, error = %e, "progress operation failed"),
        }
        result
    }
}
