use std::path::Path;

use fmt::format::FmtSpan;
use roster_client::HTTP_LOG_TARGET;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{self, FilterExt, LevelFilter};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const MAIN_LOG: &str = "roster.log";
pub const HTTP_LOG: &str = "http.log";

pub struct LoggingGuards {
    /// Guard for the main app log
    pub main: WorkerGuard,
    /// Guard for the request log
    pub http: WorkerGuard,
}

/// Install the file subscribers. Logs never go to the terminal the UI owns.
pub fn init_tracing(log_dir: &Path) -> Result<LoggingGuards, roster_error::Error> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,roster_tui=debug,hyper_util=warn"));

    std::fs::create_dir_all(log_dir)
        .map_err(|e| roster_error::Error::io("create log directory", log_dir, e))?;

    let file_appender = tracing_appender::rolling::daily(log_dir, MAIN_LOG);
    let (non_blocking_file, main_guard) = tracing_appender::non_blocking(file_appender);

    let main_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(false)
        .with_writer(non_blocking_file);

    // One line per request, kept apart from the app log.
    let http_appender = tracing_appender::rolling::daily(log_dir, HTTP_LOG);
    let (http_non_blocking, http_guard) = tracing_appender::non_blocking(http_appender);
    let http_layer = fmt::layer()
        .with_writer(http_non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let only_http = filter::filter_fn(|meta| meta.target() == HTTP_LOG_TARGET)
        .and(LevelFilter::INFO);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(main_layer)
        .with(http_layer.with_filter(only_http))
        .try_init();

    Ok(LoggingGuards {
        main: main_guard,
        http: http_guard,
    })
}

/// Stderr subscriber for tests; safe to call from every test.
pub fn init_tracing_tests(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},hyper_util=error")));

    let console = fmt::layer()
        .with_target(true)
        .with_level(true)
        .without_time()
        .with_line_number(true)
        .with_ansi(true)
        .with_test_writer();

    // try_init: a global subscriber may already be set by another test
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .try_init();
}
