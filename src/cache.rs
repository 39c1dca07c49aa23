use color_eyre::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Log file written when debug logging is enabled.
pub const LOG_FILE: &str = "examdash.log";

/// Files owned by examdash in the cache directory.
const CACHE_FILES: &[&str] = &[LOG_FILE];

/// Manages the cache directory, which holds the log file
#[derive(Clone)]
pub struct CacheManager {
    pub(crate) cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(app_name: &str) -> Result<Self> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine cache directory"))?
            .join(app_name);

        Ok(Self { cache_dir })
    }

    /// Use a specific directory (tests)
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn cache_file(&self, filename: &str) -> PathBuf {
        self.cache_dir.join(filename)
    }

    pub fn ensure_cache_dir(&self) -> Result<()> {
        if !self.cache_dir.exists() {
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Remove every known cache file; returns how many were removed.
    /// A file that cannot be removed is reported and skipped.
    pub fn clear_all(&self) -> Result<usize> {
        let mut removed = 0;
        for filename in CACHE_FILES {
            let file_path = self.cache_file(filename);
            if !file_path.exists() {
                continue;
            }
            match fs::remove_file(&file_path) {
                Ok(()) => removed += 1,
                Err(e) => {
                    warn!(file = %file_path.display(), error = %e, "could not remove cache file");
                    eprintln!("Warning: Could not remove cache file {}: {}", filename, e);
                }
            }
        }
        Ok(removed)
    }
}
