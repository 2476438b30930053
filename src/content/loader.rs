// SPDX-License-Identifier: MPL-2.0

use crate::config::{APP_ID, BOOKS_DIR_NAME};
use crate::content::{BookContent, ContentError, count_words};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads tractate JSON files from a local directory. Nothing is cached;
/// every call goes to disk.
#[derive(Debug, Clone)]
pub struct BookLoader {
    root: PathBuf,
}

impl BookLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// ~/.local/share/{APP_ID}/mishna
    pub fn default_root() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(APP_ID).join(BOOKS_DIR_NAME))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load `<root>/<file_name>.json`
    pub async fn load(&self, file_name: &str) -> Result<BookContent, ContentError> {
        let path = self.book_path(file_name)?;

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ContentError::NotFound(path.clone()),
                _ => ContentError::Io(e),
            })?;

        let book: BookContent = serde_json::from_str(&contents)?;
        Self::check_metadata(&book);

        debug!(book = %book.name, chapters = book.chapters.len(), "loaded book");
        Ok(book)
    }

    fn book_path(&self, file_name: &str) -> Result<PathBuf, ContentError> {
        let invalid = file_name.trim().is_empty()
            || file_name.starts_with('.')
            || file_name.contains(['/', '\\'])
            || file_name.contains("..");

        if invalid {
            return Err(ContentError::InvalidName(file_name.to_string()));
        }

        Ok(self.root.join(format!("{}.json", file_name)))
    }

    /// The files are generated offline; a stale summary is worth a log line,
    /// not a failed load.
    fn check_metadata(book: &BookContent) {
        let (episodes, words) = book.totals();

        if episodes != book.metadata.episode_count || words != book.metadata.word_count {
            warn!(
                book = %book.name,
                episodes,
                words,
                recorded_episodes = book.metadata.episode_count,
                recorded_words = book.metadata.word_count,
                "book metadata does not match its chapters"
            );
        }

        let miscounted = book
            .chapters
            .values()
            .flat_map(|c| c.episodes.values())
            .filter(|e| count_words(&e.text) != e.word_count as usize)
            .count();

        if miscounted > 0 {
            debug!(book = %book.name, miscounted, "episodes with stale word counts");
        }
    }
}
