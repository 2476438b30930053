// SPDX-License-Identifier: MPL-2.0

#[cfg(not(feature = "devel"))]
pub const APP_ID: &str = "io.github.mishna.Reader";
#[cfg(feature = "devel")]
pub const APP_ID: &str = "io.github.mishna.Reader.Devel";

pub const APP_NAME: &str = "Mishna Reader";

/// File name of the progress database inside the data directory
pub const DB_FILE_NAME: &str = "books_progress.db";

/// Directory (under the data directory) holding one JSON file per tractate
pub const BOOKS_DIR_NAME: &str = "mishna";

/// How many books the home screen lists as "recently read"
pub const DEFAULT_RECENT_BOOKS: usize = 5;
