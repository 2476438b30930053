// SPDX-License-Identifier: MPL-2.0

//! Shared async runtime for the application.
//!
//! Store operations suspend on blocking SQLite work and file reads; they all
//! run on this one runtime instead of each entry point building its own.

use once_cell::sync::Lazy;
use std::future::Future;
use tokio::runtime::Runtime;

/// Two workers are plenty: the work is local disk I/O, and the blocking
/// SQLite calls go to tokio's separate blocking pool anyway.
static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("mishna-async")
        .build()
        .expect("failed to create async runtime")
});

/// Execute a future on the shared runtime, blocking until completion.
/// Use this from synchronous code that needs to call async functions.
pub fn block_on<F: Future>(future: F) -> F::Output {
    RUNTIME.block_on(future)
}
