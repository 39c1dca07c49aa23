//! User-facing error message formatting.
//!
//! Matches on PolarsError variants and io::ErrorKind rather than parsing
//! message strings.

use polars::prelude::PolarsError;
use std::io;

/// Format a PolarsError as a user-facing message by matching on its variant.
pub fn user_message_from_polars(err: &PolarsError) -> String {
    use polars::prelude::PolarsError as PE;

    match err {
        PE::ColumnNotFound(msg) => format!(
            "Column not found: {}. Check the CSV header and the delimiter.",
            msg
        ),
        PE::Duplicate(msg) => format!("Duplicate column name in header: {}", msg),
        PE::IO { error, msg } => {
            user_message_from_io(error.as_ref(), msg.as_ref().map(|m| m.as_ref()))
        }
        PE::NoData(msg) => format!("No data: {}", msg),
        PE::SchemaMismatch(msg) => format!("Schema mismatch: {}", msg),
        PE::ShapeMismatch(msg) => format!("Rows have different numbers of fields: {}", msg),
        PE::InvalidOperation(msg) => format!("Operation not allowed: {}", msg),
        PE::ComputeError(msg) => first_line(msg),
        PE::Context { error, msg } => {
            let inner = user_message_from_polars(error);
            format!("{}: {}", msg, inner)
        }
        #[allow(unreachable_patterns)]
        _ => first_line(&err.to_string()),
    }
}

/// Format an io::Error as a user-facing message by matching on ErrorKind.
pub fn user_message_from_io(err: &io::Error, context: Option<&str>) -> String {
    use std::io::ErrorKind;

    let base: String = match err.kind() {
        ErrorKind::NotFound => "File not found.".to_string(),
        ErrorKind::PermissionDenied => "Permission denied. Check read access.".to_string(),
        ErrorKind::InvalidData | ErrorKind::InvalidInput => {
            "Invalid or corrupted data.".to_string()
        }
        ErrorKind::UnexpectedEof => "Unexpected end of file.".to_string(),
        ErrorKind::Interrupted => "Operation interrupted.".to_string(),
        ErrorKind::OutOfMemory => "Out of memory.".to_string(),
        ErrorKind::IsADirectory => "Path is a directory, not a file.".to_string(),
        _ => first_line(&err.to_string()),
    };

    match context {
        Some(ctx) if !ctx.is_empty() => format!("{} {}", base, ctx),
        _ => base,
    }
}

/// Format a color_eyre Report by walking its cause chain for known error types.
pub fn user_message_from_report(report: &color_eyre::eyre::Report) -> String {
    for cause in report.chain() {
        if let Some(load) = cause.downcast_ref::<crate::source::DataLoadError>() {
            return load.user_message();
        }
        if let Some(pe) = cause.downcast_ref::<PolarsError>() {
            return user_message_from_polars(pe);
        }
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            return user_message_from_io(io_err, None);
        }
    }
    first_line(&report.to_string())
}

/// Long polars messages carry hints and backtraces after the first line.
fn first_line(msg: &str) -> String {
    msg.lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .unwrap_or("An error occurred")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_from_io_not_found() {
        let err = io::Error::new(io::ErrorKind::NotFound, "No such file");
        let msg = user_message_from_io(&err, None);
        assert!(msg.contains("not found"), "expected 'not found', got: {}", msg);
    }

    #[test]
    fn test_user_message_from_io_with_context() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");
        let msg = user_message_from_io(&err, Some("(exams.csv)"));
        assert_eq!(msg, "Permission denied. Check read access. (exams.csv)");
    }

    #[test]
    fn test_user_message_from_polars_column_not_found() {
        let err = PolarsError::ColumnNotFound("math score".into());
        let msg = user_message_from_polars(&err);
        assert!(msg.contains("math score"), "got: {}", msg);
        assert!(msg.starts_with("Column not found"), "got: {}", msg);
    }

    #[test]
    fn test_compute_error_keeps_first_line() {
        let err = PolarsError::ComputeError("could not parse `abc` as i64\n\nhint: ...".into());
        assert_eq!(user_message_from_polars(&err), "could not parse `abc` as i64");
    }

    #[test]
    fn test_report_finds_io_error_in_chain() {
        use color_eyre::eyre::WrapErr;
        let result: Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let report = result.wrap_err("opening data").unwrap_err();
        assert_eq!(user_message_from_report(&report), "File not found.");
    }
}
