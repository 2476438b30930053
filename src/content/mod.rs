// SPDX-License-Identifier: MPL-2.0

//! Tractate text as shipped in per-book JSON files.

mod loader;
mod model;

pub use loader::BookLoader;
pub use model::{BookContent, BookMetadata, Chapter, Episode, count_words};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("book file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("invalid book file name: {0:?}")]
    InvalidName(String),
    #[error("failed to read book file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse book file: {0}")]
    Parse(#[from] serde_json::Error),
}
