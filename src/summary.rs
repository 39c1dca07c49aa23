//! Headless `--summary` output: the statistics of one page as JSON.

use polars::prelude::DataFrame;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use crate::pages::descriptor;
use crate::session::Menu;
use crate::source::{load_table, LoadOptions, SCORE_COLUMNS};
use crate::statistics::{score_statistics, value_frequencies, Frequencies, ScoreStatistics};

/// Statistics of one page, independent of the terminal UI.
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub page: String,
    pub title: String,
    pub total_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ScoreStatistics>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frequencies: Vec<Frequencies>,
    /// Dashboard only: mode per score column.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub modes: BTreeMap<String, f64>,
    /// Dashboard only: mean per score column, rounded to 2 decimals.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub averages: BTreeMap<String, f64>,
    /// Anything that could not be computed, e.g. missing columns.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

pub fn summarize(menu: Menu, df: &DataFrame) -> PageSummary {
    let page = descriptor(menu);
    let mut summary = PageSummary {
        page: menu.key().to_string(),
        title: page.title.to_string(),
        total_rows: df.height(),
        statistics: None,
        frequencies: Vec::new(),
        modes: BTreeMap::new(),
        averages: BTreeMap::new(),
        errors: Vec::new(),
    };

    if let Some(column) = page.statistic_column {
        match score_statistics(df, column) {
            Ok(stats) => summary.statistics = Some(stats),
            Err(e) => summary.errors.push(e.to_string()),
        }
    }

    for (column, _) in page.frequency_columns {
        match value_frequencies(df, column) {
            Ok(freq) => summary.frequencies.push(freq),
            Err(e) => summary.errors.push(e.to_string()),
        }
    }

    if page.charts {
        for column in SCORE_COLUMNS {
            match score_statistics(df, column) {
                Ok(stats) => {
                    summary.modes.insert(column.to_string(), stats.mode);
                    summary
                        .averages
                        .insert(column.to_string(), (stats.mean * 100.0).round() / 100.0);
                }
                Err(e) => summary.errors.push(e.to_string()),
            }
        }
    }

    summary
}

pub fn to_json(summary: &PageSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

/// Load `path` and write the page summary to `out`, or the load error to `err`.
/// Returns the process exit code: 0 on success, 1 when the file cannot be loaded.
pub fn write_summary(
    path: &Path,
    options: &LoadOptions,
    menu: Menu,
    out: &mut impl Write,
    err: &mut impl Write,
) -> color_eyre::Result<i32> {
    match load_table(path, options) {
        Ok(df) => {
            writeln!(out, "{}", to_json(&summarize(menu, &df))?)?;
            Ok(0)
        }
        Err(e) => {
            writeln!(
                err,
                "{} ({}): {}",
                descriptor(menu).title,
                menu.key(),
                e.user_message()
            )?;
            Ok(1)
        }
    }
}
