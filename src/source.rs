//! Loading the exam records file into a DataFrame.
//!
//! The file is read in full on every call; callers re-load on each render cycle
//! so edits to the CSV show up on the next interaction.

use polars::prelude::*;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error_display::{user_message_from_io, user_message_from_polars};
use crate::{Args, CompressionFormat};

pub const GENDER: &str = "gender";
pub const RACE_ETHNICITY: &str = "race/ethnicity";
pub const PARENTAL_EDUCATION: &str = "parental level of education";
pub const MATH_SCORE: &str = "math score";
pub const READING_SCORE: &str = "reading score";
pub const WRITING_SCORE: &str = "writing score";

/// The three numeric score columns, in selector order.
pub const SCORE_COLUMNS: [&str; 3] = [MATH_SCORE, READING_SCORE, WRITING_SCORE];

/// Why the data file could not be turned into a table.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decompress {} as {}: {source}", .path.display(), .format.extension())]
    Decompress {
        path: PathBuf,
        format: CompressionFormat,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("{} contains no rows", .path.display())]
    Empty { path: PathBuf },
}

impl DataLoadError {
    /// Short message for the page surface.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { path, source } => {
                format!("Failed to load {}: {}", path.display(), user_message_from_io(source, None))
            }
            Self::Decompress {
                path,
                format,
                source,
            } => format!(
                "Failed to decompress {} ({}): {}",
                path.display(),
                format.extension(),
                user_message_from_io(source, None)
            ),
            Self::Parse { path, source } => format!(
                "Failed to load {}: {}",
                path.display(),
                user_message_from_polars(source)
            ),
            Self::Empty { path } => format!("{} has a header but no data rows.", path.display()),
        }
    }
}

/// Required columns absent from the loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing columns: {}", .missing.join(", "))]
pub struct MissingColumnsError {
    pub missing: Vec<String>,
}

/// Checks that every name in `required` is a column of `df`.
pub fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), MissingColumnsError> {
    let names = column_names(df);
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !names.iter().any(|n| n == *name))
        .map(|name| name.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingColumnsError { missing })
    }
}

/// Column names of `df` in file order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

/// Options controlling how the data file is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: Option<u8>,
    pub has_header: Option<bool>,
    pub compression: Option<CompressionFormat>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Create LoadOptions from CLI args and config, with CLI args taking precedence
    pub fn from_args_and_config(args: &Args, config: &AppConfig) -> Self {
        let data = &config.data;
        let compression = args.compression.or_else(|| {
            data.compression
                .as_deref()
                .and_then(|name| compression_from_name(name))
        });
        Self {
            delimiter: args.delimiter.or(data.delimiter),
            has_header: args.no_header.map(|no_header| !no_header).or(data.has_header),
            compression,
        }
    }
}

/// Parse a compression name as written in the config file.
pub fn compression_from_name(name: &str) -> Option<CompressionFormat> {
    match name.trim().to_lowercase().as_str() {
        "gzip" | "gz" => Some(CompressionFormat::Gzip),
        "zstd" | "zst" => Some(CompressionFormat::Zstd),
        "bzip2" | "bz2" => Some(CompressionFormat::Bzip2),
        "xz" => Some(CompressionFormat::Xz),
        _ => None,
    }
}

/// Read the CSV at `path` into a DataFrame.
///
/// A table with zero data rows is an error: every page needs at least one row
/// for its row-count slider.
pub fn load_table(path: &Path, options: &LoadOptions) -> Result<DataFrame, DataLoadError> {
    let compression = options
        .compression
        .or_else(|| CompressionFormat::from_extension(path));
    debug!(path = %path.display(), ?compression, "reading data file");

    let bytes = read_bytes(path, compression).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "could not read data file");
    })?;

    let mut read_options = CsvReadOptions::default();
    if let Some(has_header) = options.has_header {
        read_options.has_header = has_header;
    }
    if let Some(delimiter) = options.delimiter {
        read_options = read_options.map_parse_options(|opts| opts.with_separator(delimiter));
    }

    let df = CsvReader::new(Cursor::new(bytes))
        .with_options(read_options)
        .finish()
        .map_err(|source| {
            warn!(path = %path.display(), error = %source, "could not parse data file");
            DataLoadError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

    if df.height() == 0 {
        warn!(path = %path.display(), "data file has no rows");
        return Err(DataLoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded exam records"
    );
    Ok(df)
}

fn read_bytes(path: &Path, compression: Option<CompressionFormat>) -> Result<Vec<u8>, DataLoadError> {
    let io_err = |source: std::io::Error| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let Some(format) = compression else {
        return std::fs::read(path).map_err(io_err);
    };

    let file = BufReader::new(File::open(path).map_err(io_err)?);
    let mut decompressed = Vec::new();
    let result = match format {
        CompressionFormat::Gzip => {
            flate2::read::GzDecoder::new(file).read_to_end(&mut decompressed)
        }
        CompressionFormat::Zstd => zstd::stream::read::Decoder::with_buffer(file)
            .and_then(|mut decoder| decoder.read_to_end(&mut decompressed)),
        CompressionFormat::Bzip2 => {
            bzip2::read::BzDecoder::new(file).read_to_end(&mut decompressed)
        }
        CompressionFormat::Xz => xz2::read::XzDecoder::new(file).read_to_end(&mut decompressed),
    };
    result.map_err(|source| DataLoadError::Decompress {
        path: path.to_path_buf(),
        format,
        source,
    })?;
    Ok(decompressed)
}
