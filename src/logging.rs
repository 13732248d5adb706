//! File logging for the binary.

use std::ffi::OsStr;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "tabtint.log";

/// Install a subscriber writing this crate's events to `config.file`.
///
/// The returned guard flushes the file when dropped, so hold it until exit.
/// Span enter/close events are recorded in debug builds only.
pub fn init_logging(config: &LoggingConfig) -> WorkerGuard {
    let dir = match config.file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let filename = config
        .file
        .file_name()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE));

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, filename));

    let filter =
        EnvFilter::try_new(config.directive()).unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    #[cfg(debug_assertions)]
    let layer = layer.with_span_events(fmt::format::FmtSpan::ENTER | fmt::format::FmtSpan::CLOSE);

    tracing_subscriber::registry().with(filter).with(layer).init();

    guard
}
