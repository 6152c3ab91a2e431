//! Log output setup
//!
//! The terminal belongs to the UI, so logs only go to a file when one is
//! requested. Filtering follows `RUST_LOG`, defaulting to `incomeview=info`.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "incomeview=info";

/// Installs a global subscriber appending to `path`
///
/// Returns an error if the file cannot be opened. If a subscriber is already
/// installed the call is a no-op.
pub fn init_file_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(())
}
