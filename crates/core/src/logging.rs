use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directory for rolling log files: `$KWIRE_LOG_DIR`, else `~/.kwire/logs`.
pub fn log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("KWIRE_LOG_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".kwire/logs")
}

/// Installs the global subscriber for `component`.
///
/// Logs go to a daily-rolling file named after the component and, when
/// `to_stderr` is set, to stderr as well. If the log directory cannot be
/// created only the stderr layer is installed and `None` is returned.
/// The returned guard must be held until shutdown to flush the file writer.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let dir = log_dir();
    if std::fs::create_dir_all(&dir).is_err() {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(to_stderr.then(stderr_layer))
            .try_init();
        return None;
    }

    // e.g. cli.log.2026-10-16
    let file_appender = tracing_appender::rolling::daily(&dir, format!("{component}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(to_stderr.then(stderr_layer))
        .try_init()
        .ok()?;

    Some(guard)
}

fn stderr_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
}
