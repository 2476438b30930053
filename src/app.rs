// SPDX-License-Identifier: MPL-2.0

//! Application composition root.
//!
//! Builds the single [`ProgressStore`] for the session and hands it, together
//! with the book loader and the catalog, to the screens that need them.

use crate::catalog::{self, Tractate};
use crate::config::{APP_NAME, BOOKS_DIR_NAME};
use crate::content::{BookContent, BookLoader, ContentError};
use crate::progress::{BookProgress, ProgressError, ProgressStore, StoreLocation};
use crate::runtime;
use crate::state::AppSettings;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

/// A book opened from the catalog
#[derive(Debug)]
pub struct OpenedBook {
    pub tractate: &'static Tractate,
    pub progress: BookProgress,
    /// Progress is tracked even when the text file is missing
    pub content: Result<BookContent, ContentError>,
}

pub struct ReaderApp {
    settings: AppSettings,
    store: Arc<ProgressStore>,
    loader: BookLoader,
}

impl ReaderApp {
    pub fn new(settings: AppSettings) -> Self {
        let location = match &settings.database_path {
            Some(path) => StoreLocation::File(path.clone()),
            None => StoreLocation::default_file().unwrap_or_else(|e| {
                warn!(error = %e, "no data directory, progress will not persist");
                StoreLocation::Memory
            }),
        };

        let books_root = settings
            .books_dir
            .clone()
            .or_else(BookLoader::default_root)
            .unwrap_or_else(|| PathBuf::from(BOOKS_DIR_NAME));

        let store = Arc::new(ProgressStore::new(location));
        Self::with_parts(settings, store, BookLoader::new(books_root))
    }

    pub fn with_parts(settings: AppSettings, store: Arc<ProgressStore>, loader: BookLoader) -> Self {
        Self {
            settings,
            store,
            loader,
        }
    }

    pub fn store(&self) -> &Arc<ProgressStore> {
        &self.store
    }

    pub fn loader(&self) -> &BookLoader {
        &self.loader
    }

    /// Initialize the store once, before any screen uses it
    pub async fn start(&self) -> Result<(), ProgressError> {
        self.store.initialize().await?;
        info!(location = ?self.store.location(), "{} ready", APP_NAME);
        Ok(())
    }

    /// Home screen list. Failures degrade to an empty list.
    pub async fn recent_books(&self) -> Vec<BookProgress> {
        match self
            .store
            .get_books_progress(0, self.settings.recent_books_limit)
            .await
        {
            Ok(books) => books,
            Err(e) => {
                error!(error = %e, "failed to fetch recent books");
                Vec::new()
            }
        }
    }

    pub fn search(&self, term: &str) -> Vec<&'static Tractate> {
        catalog::search(term)
    }

    /// Start (or resume) tracking a tractate and load its text
    pub async fn open_book(&self, tractate: &'static Tractate) -> Result<OpenedBook, ProgressError> {
        let book_id = tractate.id();

        self.store
            .initialize_book_progress(&book_id, tractate.name)
            .await?;

        let progress = self
            .store
            .get_book_progress(&book_id)
            .await?
            .ok_or_else(|| ProgressError::NotFound(book_id.clone()))?;

        let content = self.loader.load(tractate.name).await;
        if let Err(e) = &content {
            warn!(book_id = %book_id, error = %e, "book text unavailable");
        }

        info!(book_id = %book_id, "opened book");
        Ok(OpenedBook {
            tractate,
            progress,
            content,
        })
    }

    /// Text rendering of the home screen
    pub fn home_lines(books: &[BookProgress]) -> Vec<String> {
        if books.is_empty() {
            return vec!["No books opened yet. Open a tractate to start reading.".to_string()];
        }

        books
            .iter()
            .map(|book| {
                format!(
                    "{}  (chapter {}, mishna {})  last read {}",
                    book.book_name,
                    u64::from(book.current_chapter_index) + 1,
                    u64::from(book.current_episode_index) + 1,
                    format_date(book.last_accessed),
                )
            })
            .collect()
    }

    /// Blocking entry point for the binary
    pub fn run(self) -> ExitCode {
        runtime::block_on(async move {
            if let Err(e) = self.start().await {
                error!(error = %e, "progress tracking unavailable");
                eprintln!("{}: {}", APP_NAME, e);
                return ExitCode::FAILURE;
            }

            let books = self.recent_books().await;
            println!("{}", APP_NAME);
            for line in Self::home_lines(&books) {
                println!("  {}", line);
            }

            ExitCode::SUCCESS
        })
    }
}

fn format_date(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
