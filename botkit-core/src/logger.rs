//! Tracing for the recipe binaries: every event goes to stdout and is appended to a log file.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Filter used when RUST_LOG is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Opens `path` for appending, creating it and any missing parent directories.
pub fn open_log_file(path: impl AsRef<Path>) -> io::Result<File> {
    let path = path.as_ref();
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)?,
        _ => {}
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber. Call after `dotenvy::dotenv()` so RUST_LOG from `.env` applies
/// (e.g. `RUST_LOG=botkit_chain=debug,info`). Fails if a subscriber is already set.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    let file = Arc::new(open_log_file(log_file_path)?);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout.and(file))
        .with_span_events(FmtSpan::CLOSE)
        .with_thread_ids(true)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing already initialised: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};

    #[test]
    fn test_open_log_file_creates_dirs_and_appends() {
        let dir = std::env::temp_dir().join(format!("botkit-logger-{}", std::process::id()));
        let path = dir.join("nested").join("bot.log");

        open_log_file(&path).unwrap().write_all(b"one\n").unwrap();
        open_log_file(&path).unwrap().write_all(b"two\n").unwrap();

        let mut content = String::new();
        File::open(&path).unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "one\ntwo\n");

        fs::remove_dir_all(&dir).unwrap();
    }
}
