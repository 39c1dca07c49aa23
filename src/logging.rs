//! File-based tracing setup. The terminal belongs to the UI, so log lines go to
//! `examdash.log` in the cache directory.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::LOG_FILE;

/// Log files past this size are truncated when logging starts.
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;

/// Filter directive for `level`, scoped to this crate.
pub fn default_filter(level: &str) -> String {
    format!("examdash={},polars=warn", level.to_lowercase())
}

/// Start writing tracing events to `{cache_dir}/examdash.log`.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_logging(cache_dir: &Path, level: &str) -> color_eyre::Result<PathBuf> {
    fs::create_dir_all(cache_dir)?;
    let log_path = cache_dir.join(LOG_FILE);

    let oversized = fs::metadata(&log_path)
        .map(|meta| meta.len() > MAX_LOG_SIZE)
        .unwrap_or(false);
    let file = OpenOptions::new()
        .create(true)
        .append(!oversized)
        .write(true)
        .truncate(oversized)
        .open(&log_path)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()?;

    tracing::info!(log_path = %log_path.display(), "logging initialized");
    Ok(log_path)
}
