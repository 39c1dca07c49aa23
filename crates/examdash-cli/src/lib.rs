//! Shared CLI definitions for examdash.
//!
//! Used by the main application and by the build script (manpage).

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Data file opened when no path is given on the command line or in the config.
pub const DEFAULT_DATA_FILE: &str = "exams.csv";

/// Page shown when the dashboard starts.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StartPage {
    /// Charts plus aggregate score statistics
    #[value(name = "dashboard")]
    Dashboard,
    /// Student demographics with frequency counts
    #[value(name = "data_siswa")]
    DataSiswa,
    /// Math score table and statistics
    #[value(name = "data_math")]
    DataMath,
    /// Reading score table and statistics
    #[value(name = "data_reading")]
    DataReading,
    /// Writing score table and statistics
    #[value(name = "data_writing")]
    DataWriting,
}

/// Compression format for data files
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Gzip compression (.gz)
    Gzip,
    /// Zstandard compression (.zst)
    Zstd,
    /// Bzip2 compression (.bz2)
    Bzip2,
    /// XZ compression (.xz)
    Xz,
}

impl CompressionFormat {
    /// Detect compression format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_lowercase().as_str() {
            "gz" => Some(Self::Gzip),
            "zst" | "zstd" => Some(Self::Zstd),
            "bz2" | "bz" => Some(Self::Bzip2),
            "xz" => Some(Self::Xz),
            _ => None,
        }
    }

    /// Get file extension for this compression format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Gzip => "gz",
            Self::Zstd => "zst",
            Self::Bzip2 => "bz2",
            Self::Xz => "xz",
        }
    }
}

/// Command-line arguments for examdash
#[derive(Clone, Parser, Debug)]
#[command(
    name = "examdash",
    version,
    about = "Student exam dashboard in the terminal",
    long_about = "Browse a CSV of student exam records, view score statistics and \
                  render box, histogram and scatter charts in the terminal."
)]
pub struct Args {
    /// Path to the exam records CSV (default: exams.csv, or [data] path from the config file)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Page to open on startup
    #[arg(long = "page", value_enum)]
    pub page: Option<StartPage>,

    /// Initial number of table rows shown on every page (clamped to the table size)
    #[arg(long = "rows", value_name = "N")]
    pub rows: Option<usize>,

    /// Specify the delimiter to use when reading the file
    #[arg(long = "delimiter")]
    pub delimiter: Option<u8>,

    /// Specify that the file has no header
    #[arg(long = "no-header")]
    pub no_header: Option<bool>,

    /// Specify the compression format explicitly (gzip, zstd, bzip2, xz).
    /// If not specified, compression is auto-detected from file extension.
    #[arg(long = "compression", value_enum)]
    pub compression: Option<CompressionFormat>,

    /// Print the statistics of the selected page as JSON and exit
    #[arg(long = "summary", action)]
    pub summary: bool,

    /// Enable debug mode: status row in the UI and a log file in the cache directory
    #[arg(long = "debug", action)]
    pub debug: bool,

    /// Clear all cache data (log file) and exit
    #[arg(long = "clear-cache", action)]
    pub clear_cache: bool,

    /// Generate default configuration file at ~/.config/examdash/config.toml
    #[arg(long = "generate-config", action)]
    pub generate_config: bool,

    /// Force overwrite existing config file when using --generate-config
    #[arg(long = "force", requires = "generate_config", action)]
    pub force: bool,
}

impl Args {
    /// Data path from the command line, falling back to `configured`, then to `exams.csv`.
    pub fn data_path(&self, configured: Option<&str>) -> PathBuf {
        self.path
            .clone()
            .or_else(|| configured.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }
}
