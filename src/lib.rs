// SPDX-License-Identifier: MPL-2.0

//! Offline Mishna reader.
//!
//! Reading progress for each tractate lives in a local SQLite database owned
//! by a single [`ProgressStore`]; tractate text is read on demand from
//! per-book JSON files by [`BookLoader`].

pub mod app;
pub mod catalog;
pub mod config;
pub mod content;
pub mod progress;
pub mod runtime;
pub mod state;

pub use app::{OpenedBook, ReaderApp};
pub use catalog::Tractate;
pub use content::{BookContent, BookLoader, ContentError};
pub use progress::{BookProgress, ProgressError, ProgressStore, StoreLocation, StoreState};
pub use state::AppSettings;
