//! File logging setup.
//!
//! The terminal belongs to the UI, so tracing output goes to a log file
//! under the platform state directory. Failure to set up logging is never
//! worth failing startup over; the binary just runs silent.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter.
pub const LOG_FILTER_ENV: &str = "STASHVIEW_LOG";

const LOG_FILE_NAME: &str = "stashview.log";

/// Platform log directory, e.g. `~/.local/state/stashview`.
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|dir| dir.join("stashview"))
}

/// Open the log file in append mode, creating the directory as needed.
pub fn open_log_file(dir: &Path) -> io::Result<File> {
    std::fs::create_dir_all(dir)?;
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
}

/// The filter from `STASHVIEW_LOG`, defaulting to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `file`.
pub fn init(file: File) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .init();
}
