// SPDX-License-Identifier: MPL-2.0

use mishna_reader::{AppSettings, ReaderApp};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,mishna_reader=info".into()),
        )
        .init();

    let settings = AppSettings::load();
    ReaderApp::new(settings).run()
}
