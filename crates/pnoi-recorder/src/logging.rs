//! Log output: stdout plus `pnoi.log` in the configured directory.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_NAME: &str = "pnoi.log";

const DEFAULT_LOG_FILTER: &str = "pnoi_recorder=debug,pnoi_core=info";

/// Install the global subscriber. Dropping the guard flushes the file writer.
pub fn init(directory: &Path) -> WorkerGuard {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, LOG_FILE_NAME));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .init();

    guard
}
