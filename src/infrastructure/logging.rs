use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive, e.g. `debug` or `boolterm=trace`.
pub const LOG_ENV: &str = "BOOLTERM_LOG";
/// Environment variable overriding the log file path.
pub const LOG_FILE_ENV: &str = "BOOLTERM_LOG_FILE";
pub const DEFAULT_LOG_FILE: &str = "boolterm.log";

/// Installs a file-backed `tracing` subscriber when `BOOLTERM_LOG` is set.
///
/// The terminal belongs to the UI, so nothing is ever written to stdout or
/// stderr. Returns `Ok(false)` when logging is disabled.
pub fn init_logging() -> io::Result<bool> {
    let Ok(directive) = std::env::var(LOG_ENV) else {
        return Ok(false);
    };

    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let path = std::env::var(LOG_FILE_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    tracing::info!(path = %path, "logging initialised");
    Ok(true)
}
