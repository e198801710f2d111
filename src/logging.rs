use std::env;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::SystemTime;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "TZCLOCK_LOG";
const LOG_FILE_NAME: &str = "tzclock.log";

/// Where log output goes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LogSink {
    /// Headless runs print the clock on stdout, logs go to stderr.
    Stderr,
    /// The TUI owns the terminal, logs go to a file.
    File(PathBuf),
}

/// Installs the global subscriber. Keep the returned guard alive until exit so
/// buffered file output is flushed.
pub fn init(verbose: bool, sink: LogSink) -> io::Result<Option<WorkerGuard>> {
    let filter = build_filter(verbose);
    match sink {
        LogSink::Stderr => {
            let layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_timer(SystemTime)
                .with_writer(io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
                .map_err(io::Error::other)?;
            Ok(None)
        }
        LogSink::File(path) => {
            let (dir, file_name) = split_log_path(&path)?;
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(false)
                .with_timer(SystemTime)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
                .map_err(io::Error::other)?;
            Ok(Some(guard))
        }
    }
}

/// `<data dir>/tzclock/tzclock.log`, relative to the working directory when
/// no data directory is known.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tzclock")
        .join(LOG_FILE_NAME)
}

fn build_filter(verbose: bool) -> EnvFilter {
    match env::var(LOG_ENV) {
        Ok(value) if !value.trim().is_empty() => EnvFilter::new(value),
        _ => {
            if verbose {
                EnvFilter::new("debug")
            } else {
                EnvFilter::new("info")
            }
        }
    }
}

fn split_log_path(path: &Path) -> io::Result<(PathBuf, String)> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("log path has no file name: {}", path.display()),
            )
        })?;
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((dir, file_name))
}
