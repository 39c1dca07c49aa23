//! Prepare chart data from the loaded table: box plot groups, histogram bins and
//! scatter series, plus the equality filter applied before the scatter plot.

use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::source::{column_names, require_columns, MissingColumnsError, SCORE_COLUMNS};
use crate::statistics::{numeric_values, string_values};

/// Fixed number of histogram bins.
pub const HISTOGRAM_BINS: usize = 10;

/// Label of the filter option that keeps every row.
///
/// A data value spelled `All` cannot be filtered on; it reads as this option.
pub const FILTER_ALL: &str = "All";

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("column '{0}' not found")]
    MissingColumn(String),
    #[error("column '{0}' has no numeric values")]
    NoValues(String),
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Columns available to the dashboard chart selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartColumns {
    /// Score columns, in `SCORE_COLUMNS` order.
    pub scores: Vec<String>,
    /// Every column that is not a score column; box plot categories.
    pub categories: Vec<String>,
    /// All columns in file order.
    pub all: Vec<String>,
}

impl ChartColumns {
    /// Fails with the missing names unless all three score columns are present.
    pub fn from_frame(df: &DataFrame) -> Result<Self, MissingColumnsError> {
        require_columns(df, &SCORE_COLUMNS)?;
        let all = column_names(df);
        let categories = all
            .iter()
            .filter(|name| !SCORE_COLUMNS.contains(&name.as_str()))
            .cloned()
            .collect();
        Ok(Self {
            scores: SCORE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            categories,
            all,
        })
    }
}

/// Five-number summary of one category's scores, with 1.5×IQR whiskers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub category: String,
    pub count: usize,
    pub min: f64,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub max: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotData {
    pub x_column: String,
    pub y_column: String,
    pub boxes: Vec<BoxStats>,
}

impl BoxPlotData {
    pub fn title(&self) -> String {
        format!("Box Plot: {} by {}", self.y_column, self.x_column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramData {
    pub column: String,
    pub bins: Vec<HistogramBin>,
}

impl HistogramData {
    pub fn title(&self) -> String {
        format!("Bar Plot: {}", self.column)
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Points of one color group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterData {
    pub x_column: String,
    pub y_column: String,
    pub color_column: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterData {
    pub fn title(&self) -> String {
        format!("Scatter Plot: {} vs {}", self.y_column, self.x_column)
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Equality filter applied before the scatter plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    pub column: String,
    /// `None` keeps every row.
    pub value: Option<String>,
}

impl RowFilter {
    pub fn all(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: None,
        }
    }

    pub fn equals(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: Some(value.into()),
        }
    }

    /// Builds a filter from a selector value, where `FILTER_ALL` means no filtering.
    pub fn from_selection(column: impl Into<String>, selected: &str) -> Self {
        if selected == FILTER_ALL {
            Self::all(column)
        } else {
            Self::equals(column, selected)
        }
    }
}

fn series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series, ChartError> {
    df.column(name)
        .map(|c| c.as_materialized_series())
        .map_err(|_| ChartError::MissingColumn(name.to_string()))
}

/// Distinct non-null values of `column` as strings, in order of first appearance.
pub fn distinct_values(df: &DataFrame, column: &str) -> Result<Vec<String>, ChartError> {
    let mut seen = std::collections::HashSet::new();
    Ok(string_values(series(df, column)?)
        .into_iter()
        .flatten()
        .filter(|v| seen.insert(v.clone()))
        .collect())
}

/// Rows where `filter.column` (rendered as a string) equals the value; the
/// whole table when the filter has no value.
pub fn apply_filter(df: &DataFrame, filter: &RowFilter) -> Result<DataFrame, ChartError> {
    series(df, &filter.column)?;
    let Some(value) = &filter.value else {
        return Ok(df.clone());
    };
    let filtered = df
        .clone()
        .lazy()
        .filter(
            col(filter.column.as_str())
                .cast(DataType::String)
                .eq(lit(value.as_str())),
        )
        .collect()?;
    Ok(filtered)
}

/// Quantile with linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Box statistics for a set of values; `None` when empty.
pub fn box_stats(category: impl Into<String>, values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    let inside = || sorted.iter().copied().filter(|v| *v >= lower_fence && *v <= upper_fence);
    let lower_whisker = inside().next().unwrap_or(q1);
    let upper_whisker = inside().last().unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < lower_fence || *v > upper_fence)
        .collect();

    Some(BoxStats {
        category: category.into(),
        count: sorted.len(),
        min: sorted[0],
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        max: sorted[sorted.len() - 1],
        outliers,
    })
}

/// One box of `y_column` scores per distinct value of `x_column`, in order of first appearance.
/// Rows with a null category or score are skipped.
pub fn prepare_box_plot(
    df: &DataFrame,
    x_column: &str,
    y_column: &str,
) -> Result<BoxPlotData, ChartError> {
    let categories = string_values(series(df, x_column)?);
    let scores = optional_f64(series(df, y_column)?, y_column)?;

    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for (category, score) in categories.into_iter().zip(scores) {
        let (Some(category), Some(score)) = (category, score) else {
            continue;
        };
        match groups.iter_mut().find(|(name, _)| *name == category) {
            Some((_, values)) => values.push(score),
            None => groups.push((category, vec![score])),
        }
    }

    Ok(BoxPlotData {
        x_column: x_column.to_string(),
        y_column: y_column.to_string(),
        boxes: groups
            .into_iter()
            .filter_map(|(category, values)| box_stats(category, &values))
            .collect(),
    })
}

/// `HISTOGRAM_BINS` equal-width bins over the observed range of `values`.
/// The last bin includes its right edge so the maximum is counted.
pub fn histogram_bins(values: &[f64]) -> Vec<HistogramBin> {
    if values.is_empty() {
        return Vec::new();
    }
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    // A constant column still gets a non-empty range centered on its value
    let (start, end) = if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    };
    let width = (end - start) / HISTOGRAM_BINS as f64;

    let mut bins: Vec<HistogramBin> = (0..HISTOGRAM_BINS)
        .map(|i| HistogramBin {
            start: start + i as f64 * width,
            end: if i + 1 == HISTOGRAM_BINS {
                end
            } else {
                start + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - start) / width).floor() as usize).min(HISTOGRAM_BINS - 1);
        bins[idx].count += 1;
    }
    bins
}

pub fn prepare_histogram(df: &DataFrame, column: &str) -> Result<HistogramData, ChartError> {
    let values = numeric_values(series(df, column)?);
    if values.is_empty() {
        return Err(ChartError::NoValues(column.to_string()));
    }
    Ok(HistogramData {
        column: column.to_string(),
        bins: histogram_bins(&values),
    })
}

/// Points of `y_column` against `x_column`, one series per distinct value of
/// `color_column` in order of first appearance. Rows with a null coordinate are skipped;
/// a null color value is grouped under `"null"`.
pub fn prepare_scatter(
    df: &DataFrame,
    x_column: &str,
    y_column: &str,
    color_column: &str,
) -> Result<ScatterData, ChartError> {
    let xs = optional_f64(series(df, x_column)?, x_column)?;
    let ys = optional_f64(series(df, y_column)?, y_column)?;
    let colors = string_values(series(df, color_column)?);

    let mut groups: Vec<ScatterSeries> = Vec::new();
    for ((x, y), color) in xs.into_iter().zip(ys).zip(colors) {
        let (Some(x), Some(y)) = (x, y) else {
            continue;
        };
        let label = color.unwrap_or_else(|| "null".to_string());
        match groups.iter_mut().find(|s| s.label == label) {
            Some(group) => group.points.push((x, y)),
            None => groups.push(ScatterSeries {
                label,
                points: vec![(x, y)],
            }),
        }
    }

    Ok(ScatterData {
        x_column: x_column.to_string(),
        y_column: y_column.to_string(),
        color_column: color_column.to_string(),
        series: groups,
    })
}

/// Row-aligned numeric values, keeping nulls as `None`.
fn optional_f64(series: &Series, name: &str) -> Result<Vec<Option<f64>>, ChartError> {
    let cast = series
        .cast(&DataType::Float64)
        .map_err(|_| ChartError::NoValues(name.to_string()))?;
    let ca = cast.f64()?;
    Ok(ca
        .iter()
        .map(|v| v.filter(|f| f.is_finite()))
        .collect())
}
