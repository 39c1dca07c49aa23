use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatisticsError {
    #[error("column '{0}' not found")]
    MissingColumn(String),
    #[error("column '{0}' is not numeric")]
    NotNumeric(String),
    #[error("column '{0}' has no values")]
    Empty(String),
}

/// Descriptive statistics for one numeric score column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreStatistics {
    pub column: String,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub mode: f64,
}

impl ScoreStatistics {
    /// Mean rounded for display, e.g. `60.00`.
    pub fn mean_display(&self) -> String {
        format!("{:.2}", self.mean)
    }

    pub fn mode_display(&self) -> String {
        format_number(self.mode)
    }
}

/// Frequency of each distinct value of a categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frequencies {
    pub column: String,
    pub counts: Vec<(String, usize)>,
}

fn is_numeric_type(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

fn numeric_series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series, StatisticsError> {
    let col = df
        .column(name)
        .map_err(|_| StatisticsError::MissingColumn(name.to_string()))?;
    if !is_numeric_type(col.dtype()) {
        return Err(StatisticsError::NotNumeric(name.to_string()));
    }
    Ok(col.as_materialized_series())
}

/// Non-null values of a numeric series as f64, in row order.
pub fn numeric_values(series: &Series) -> Vec<f64> {
    match series.cast(&DataType::Float64) {
        Ok(cast) => cast
            .f64()
            .map(|ca| ca.iter().flatten().filter(|v| !v.is_nan()).collect())
            .unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}

/// Values of any column rendered as strings, `None` for nulls.
pub fn string_values(series: &Series) -> Vec<Option<String>> {
    match series.cast(&DataType::String) {
        Ok(cast) => cast
            .str()
            .map(|ca| ca.iter().map(|v| v.map(str::to_string)).collect())
            .unwrap_or_default(),
        Err(_) => vec![None; series.len()],
    }
}

/// Minimum, maximum, mean and mode of a numeric column, ignoring nulls.
pub fn score_statistics(df: &DataFrame, column: &str) -> Result<ScoreStatistics, StatisticsError> {
    let series = numeric_series(df, column)?;
    let values = numeric_values(series);
    if values.is_empty() {
        return Err(StatisticsError::Empty(column.to_string()));
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let mode = compute_mode(&values).ok_or_else(|| StatisticsError::Empty(column.to_string()))?;

    Ok(ScoreStatistics {
        column: column.to_string(),
        count: values.len(),
        min,
        max,
        mean,
        mode,
    })
}

/// Most frequent value. Ties resolve to the smallest of the tied values.
pub fn compute_mode(values: &[f64]) -> Option<f64> {
    let mut counts: HashMap<u64, (f64, usize)> = HashMap::new();
    for &v in values {
        // -0.0 and 0.0 count as the same value
        let key = if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() };
        counts.entry(key).or_insert((v, 0)).1 += 1;
    }

    counts
        .into_values()
        .max_by(|(a, count_a), (b, count_b)| {
            count_a
                .cmp(count_b)
                .then_with(|| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal))
        })
        .map(|(value, _)| value)
}

/// Counts per distinct value, most frequent first; equal counts are ordered by value.
pub fn value_frequencies(df: &DataFrame, column: &str) -> Result<Frequencies, StatisticsError> {
    let series = df
        .column(column)
        .map_err(|_| StatisticsError::MissingColumn(column.to_string()))?
        .as_materialized_series()
        .drop_nulls();

    let mut counts: Vec<(String, usize)> = Vec::new();
    if let Ok(value_counts) = series.value_counts(true, false, "count".into(), false) {
        let columns = value_counts.get_columns();
        if let [values, freq] = columns {
            let values = string_values(values.as_materialized_series());
            let freq = freq
                .as_materialized_series()
                .cast(&DataType::UInt64)
                .ok()
                .and_then(|s| s.u64().ok().map(|ca| ca.iter().collect::<Vec<_>>()))
                .unwrap_or_default();
            counts = values
                .into_iter()
                .zip(freq)
                .filter_map(|(value, count)| Some((value?, count? as usize)))
                .collect();
        }
    }
    counts.sort_by(|(va, ca), (vb, cb)| cb.cmp(ca).then_with(|| va.cmp(vb)));

    Ok(Frequencies {
        column: column.to_string(),
        counts,
    })
}

/// Integral values print without a fractional part (`60`), others as-is (`60.5`).
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn math_scenario() {
        let df = df!("math score" => &[50i64, 60, 60, 70]).unwrap();
        let stats = score_statistics(&df, "math score").unwrap();
        assert_eq!(stats.min, 50.0);
        assert_eq!(stats.max, 70.0);
        assert_eq!(stats.mode, 60.0);
        assert_eq!(stats.mean_display(), "60.00");
        assert_eq!(stats.mode_display(), "60");
        assert_eq!(stats.count, 4);
    }

    #[test]
    fn nulls_are_ignored() {
        let df = df!("s" => &[Some(10i64), None, Some(20), Some(20)]).unwrap();
        let stats = score_statistics(&df, "s").unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.mean - 50.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.mean_display(), "16.67");
    }

    #[test]
    fn nan_is_ignored_like_null() {
        let df = df!("math score" => &[50.0f64, f64::NAN, 60.0, 60.0, 70.0]).unwrap();
        let stats = score_statistics(&df, "math score").unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.min, 50.0);
        assert_eq!(stats.max, 70.0);
        assert_eq!(stats.mode, 60.0);
        assert_eq!(stats.mean_display(), "60.00");
    }

    #[test]
    fn mode_tie_picks_smallest() {
        assert_eq!(compute_mode(&[3.0, 1.0, 3.0, 1.0, 2.0]), Some(1.0));
        assert_eq!(compute_mode(&[]), None);
        assert_eq!(compute_mode(&[7.5]), Some(7.5));
    }

    #[test]
    fn errors_for_bad_columns() {
        let df = df!("gender" => &["female", "male"], "empty" => &[None::<i64>, None]).unwrap();
        assert_eq!(
            score_statistics(&df, "gender"),
            Err(StatisticsError::NotNumeric("gender".into()))
        );
        assert_eq!(
            score_statistics(&df, "missing"),
            Err(StatisticsError::MissingColumn("missing".into()))
        );
        assert_eq!(
            score_statistics(&df, "empty"),
            Err(StatisticsError::Empty("empty".into()))
        );
    }

    #[test]
    fn frequencies_sorted_by_count_then_value() {
        let df = df!("gender" => &[Some("male"), Some("female"), None, Some("male"), Some("other"), Some("female")])
            .unwrap();
        let freq = value_frequencies(&df, "gender").unwrap();
        assert_eq!(
            freq.counts,
            vec![
                ("female".to_string(), 2),
                ("male".to_string(), 2),
                ("other".to_string(), 1)
            ]
        );
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(60.0), "60");
        assert_eq!(format_number(60.5), "60.5");
        assert_eq!(format_number(-3.0), "-3");
    }
}
