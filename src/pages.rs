//! One table of page descriptors and a single builder that turns the loaded
//! table plus the session state into everything a page displays.

use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::chart_data::{
    apply_filter, distinct_values, prepare_box_plot, prepare_histogram, prepare_scatter,
    BoxPlotData, ChartColumns, HistogramData, RowFilter, ScatterData, FILTER_ALL,
};
use crate::session::{Menu, SessionState};
use crate::source::{
    load_table, require_columns, DataLoadError, LoadOptions, MissingColumnsError, GENDER,
    MATH_SCORE, PARENTAL_EDUCATION, RACE_ETHNICITY, READING_SCORE, SCORE_COLUMNS, WRITING_SCORE,
};
use crate::statistics::{
    format_number, score_statistics, string_values, value_frequencies,
};

/// Which columns a page projects, as `(column, display name)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    All,
    Columns(&'static [(&'static str, &'static str)]),
}

/// Static description of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    pub menu: Menu,
    pub title: &'static str,
    pub projection: Projection,
    /// Score column summarized under STATISTICS.
    pub statistic_column: Option<&'static str>,
    /// Categorical columns counted under FREQUENCY, with display names.
    pub frequency_columns: &'static [(&'static str, &'static str)],
    /// Dashboard charts plus MODE and AVERAGE across the score columns.
    pub charts: bool,
}

const STUDENT_COLUMNS: &[(&str, &str)] = &[
    (GENDER, "Gender"),
    (RACE_ETHNICITY, "Race/Ethnicity"),
    (PARENTAL_EDUCATION, "Parental Level of Education"),
];

pub static PAGES: [PageDescriptor; 5] = [
    PageDescriptor {
        menu: Menu::Dashboard,
        title: "Student Data Analysis",
        projection: Projection::All,
        statistic_column: None,
        frequency_columns: &[],
        charts: true,
    },
    PageDescriptor {
        menu: Menu::DataSiswa,
        title: "Student Data",
        projection: Projection::Columns(STUDENT_COLUMNS),
        statistic_column: None,
        frequency_columns: STUDENT_COLUMNS,
        charts: false,
    },
    PageDescriptor {
        menu: Menu::DataMath,
        title: "Math Score Data",
        projection: Projection::Columns(&[(GENDER, "Gender"), (MATH_SCORE, "Math Score")]),
        statistic_column: Some(MATH_SCORE),
        frequency_columns: &[],
        charts: false,
    },
    PageDescriptor {
        menu: Menu::DataReading,
        title: "Reading Score Data",
        projection: Projection::Columns(&[
            (GENDER, "Gender"),
            (READING_SCORE, "Reading Score"),
        ]),
        statistic_column: Some(READING_SCORE),
        frequency_columns: &[],
        charts: false,
    },
    PageDescriptor {
        menu: Menu::DataWriting,
        title: "Writing Score Data",
        projection: Projection::Columns(&[
            (GENDER, "Gender"),
            (WRITING_SCORE, "Writing Score"),
        ]),
        statistic_column: Some(WRITING_SCORE),
        frequency_columns: &[],
        charts: false,
    },
];

pub fn descriptor(menu: Menu) -> &'static PageDescriptor {
    match menu {
        Menu::Dashboard => &PAGES[0],
        Menu::DataSiswa => &PAGES[1],
        Menu::DataMath => &PAGES[2],
        Menu::DataReading => &PAGES[3],
        Menu::DataWriting => &PAGES[4],
    }
}

/// Dashboard chart panel a selector belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPanel {
    Box,
    Histogram,
    Scatter,
}

/// Dashboard chart selectors, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    BoxY,
    BoxX,
    BarX,
    ScatterX,
    ScatterY,
    ScatterColor,
    FilterColumn,
    FilterValue,
}

impl Selector {
    pub const ALL: [Selector; 8] = [
        Selector::BoxY,
        Selector::BoxX,
        Selector::BarX,
        Selector::ScatterX,
        Selector::ScatterY,
        Selector::ScatterColor,
        Selector::FilterColumn,
        Selector::FilterValue,
    ];

    /// Session key holding the selected value.
    pub fn key(self) -> &'static str {
        match self {
            Selector::BoxY => "box_y",
            Selector::BoxX => "box_x",
            Selector::BarX => "bar_x",
            Selector::ScatterX => "scatter_x_axis",
            Selector::ScatterY => "scatter_y_axis",
            Selector::ScatterColor => "scatter_category_column",
            Selector::FilterColumn => "scatter_filter_column",
            Selector::FilterValue => "scatter_filter_value",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Selector::BoxY => "Box Y (score)",
            Selector::BoxX => "Box X (category)",
            Selector::BarX => "Bar X (score)",
            Selector::ScatterX => "Scatter X",
            Selector::ScatterY => "Scatter Y",
            Selector::ScatterColor => "Color by",
            Selector::FilterColumn => "Filter column",
            Selector::FilterValue => "Filter value",
        }
    }

    /// Index into the domain used when nothing valid is stored.
    pub fn default_index(self) -> usize {
        match self {
            Selector::ScatterY => 1,
            _ => 0,
        }
    }

    pub fn panel(self) -> ChartPanel {
        match self {
            Selector::BoxY | Selector::BoxX => ChartPanel::Box,
            Selector::BarX => ChartPanel::Histogram,
            _ => ChartPanel::Scatter,
        }
    }

    /// Next selector in focus order, wrapping.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A selector with its resolved value and domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorView {
    pub selector: Selector,
    pub value: Option<String>,
    pub options: Vec<String>,
}

impl SelectorView {
    /// The option `delta` steps away from the current value, wrapping around.
    pub fn cycled(&self, delta: isize) -> Option<String> {
        if self.options.is_empty() {
            return None;
        }
        let len = self.options.len() as isize;
        let current = self
            .value
            .as_ref()
            .and_then(|v| self.options.iter().position(|o| o == v))
            .unwrap_or(0) as isize;
        let idx = (current + delta).rem_euclid(len) as usize;
        self.options.get(idx).cloned()
    }
}

/// Rows of a table rendered as strings; nulls are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSnapshot {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableSnapshot {
    /// First `n` rows of `columns`, with display names as headers.
    pub fn from_frame(df: &DataFrame, columns: &[(String, String)], n: usize) -> Self {
        let head = df.head(Some(n));
        let cells: Vec<Vec<Option<String>>> = columns
            .iter()
            .map(|(name, _)| match head.column(name) {
                Ok(col) => string_values(col.as_materialized_series()),
                Err(_) => vec![None; head.height()],
            })
            .collect();
        let rows = (0..head.height())
            .map(|row| {
                cells
                    .iter()
                    .map(|col| col.get(row).cloned().flatten().unwrap_or_default())
                    .collect()
            })
            .collect();
        Self {
            headers: columns.iter().map(|(_, display)| display.clone()).collect(),
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A labelled block in the page sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarSection {
    pub heading: String,
    /// `(label, value)` lines, or a message when they could not be computed.
    pub body: Result<Vec<(String, String)>, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardCharts {
    pub selectors: Vec<SelectorView>,
    pub box_plot: Result<BoxPlotData, String>,
    pub histogram: Result<HistogramData, String>,
    pub scatter: Result<ScatterData, String>,
    pub filtered: Result<TableSnapshot, String>,
}

impl DashboardCharts {
    pub fn selector(&self, selector: Selector) -> Option<&SelectorView> {
        self.selectors.iter().find(|view| view.selector == selector)
    }
}

/// Everything one page shows for one render cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub menu: Menu,
    pub title: &'static str,
    pub total_rows: usize,
    /// Slider value, always in `[1, total_rows]`.
    pub rows_shown: usize,
    pub table: Result<TableSnapshot, MissingColumnsError>,
    pub sections: Vec<SidebarSection>,
    /// Set on pages with charts; an error when score columns are missing.
    pub charts: Option<Result<DashboardCharts, MissingColumnsError>>,
}

/// Load the data file and build the active page.
pub fn render_page(
    path: &Path,
    options: &LoadOptions,
    session: &mut SessionState,
) -> Result<PageView, DataLoadError> {
    let df = load_table(path, options)?;
    let menu = session.active_menu();
    Ok(build_page(menu, &df, session))
}

/// Build the view of `menu` over `df`, reading and defaulting selections in `session`.
pub fn build_page(menu: Menu, df: &DataFrame, session: &mut SessionState) -> PageView {
    let page = descriptor(menu);
    let total_rows = df.height();
    let rows_shown = session.row_count(menu, total_rows);
    debug!(page = %menu, total_rows, rows_shown, "building page");

    let table = projected_columns(df, page.projection)
        .map(|columns| TableSnapshot::from_frame(df, &columns, rows_shown));

    let mut sections = Vec::new();
    if let Some(column) = page.statistic_column {
        sections.push(statistics_section(df, column));
    }
    if !page.frequency_columns.is_empty() {
        sections.extend(frequency_sections(df, page.frequency_columns));
    }

    let charts = if page.charts {
        sections.extend(score_summary_sections(df));
        Some(ChartColumns::from_frame(df).map(|columns| dashboard_charts(df, &columns, session)))
    } else {
        None
    };

    PageView {
        menu,
        title: page.title,
        total_rows,
        rows_shown,
        table,
        sections,
        charts,
    }
}

fn projected_columns(
    df: &DataFrame,
    projection: Projection,
) -> Result<Vec<(String, String)>, MissingColumnsError> {
    match projection {
        Projection::All => Ok(df
            .get_column_names()
            .into_iter()
            .map(|name| (name.to_string(), name.to_string()))
            .collect()),
        Projection::Columns(columns) => {
            let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
            require_columns(df, &names)?;
            Ok(columns
                .iter()
                .map(|(name, display)| (name.to_string(), display.to_string()))
                .collect())
        }
    }
}

fn statistics_section(df: &DataFrame, column: &str) -> SidebarSection {
    let body = require_columns(df, &[column])
        .map_err(|e| e.to_string())
        .and_then(|_| score_statistics(df, column).map_err(|e| e.to_string()))
        .map(|stats| {
            vec![
                ("Minimum".to_string(), format_number(stats.min)),
                ("Maximum".to_string(), format_number(stats.max)),
                ("Average".to_string(), stats.mean_display()),
                ("Mode".to_string(), stats.mode_display()),
            ]
        });
    SidebarSection {
        heading: "STATISTICS".to_string(),
        body,
    }
}

fn frequency_sections(df: &DataFrame, columns: &[(&str, &str)]) -> Vec<SidebarSection> {
    let mut sections: Vec<SidebarSection> = columns
        .iter()
        .map(|(column, display)| SidebarSection {
            heading: format!("FREQUENCY: {}", display),
            body: value_frequencies(df, column)
                .map(|freq| {
                    freq.counts
                        .into_iter()
                        .map(|(value, count)| (value, count.to_string()))
                        .collect()
                })
                .map_err(|e| e.to_string()),
        })
        .collect();
    sections.push(SidebarSection {
        heading: "TOTAL".to_string(),
        body: Ok(vec![("Students".to_string(), df.height().to_string())]),
    });
    sections
}

fn score_summary_sections(df: &DataFrame) -> Vec<SidebarSection> {
    let stats = require_columns(df, &SCORE_COLUMNS)
        .map_err(|e| e.to_string())
        .and_then(|_| {
            SCORE_COLUMNS
                .iter()
                .map(|column| score_statistics(df, column).map_err(|e| e.to_string()))
                .collect::<Result<Vec<_>, _>>()
        });

    let section = |heading: &str, value: fn(&crate::statistics::ScoreStatistics) -> String| {
        SidebarSection {
            heading: heading.to_string(),
            body: stats.clone().map(|all| {
                all.iter()
                    .map(|s| (s.column.clone(), value(s)))
                    .collect()
            }),
        }
    };
    vec![
        section("MODE", |s| format!("{:.2}", s.mode)),
        section("AVERAGE", |s| s.mean_display()),
    ]
}

/// Domain of each selector; the filter value domain depends on the resolved filter column.
fn selector_options(
    selector: Selector,
    df: &DataFrame,
    columns: &ChartColumns,
    resolved: &HashMap<Selector, String>,
) -> Vec<String> {
    match selector {
        Selector::BoxY
        | Selector::BarX
        | Selector::ScatterX
        | Selector::ScatterY => columns.scores.clone(),
        Selector::BoxX => columns.categories.clone(),
        Selector::ScatterColor | Selector::FilterColumn => columns.all.clone(),
        Selector::FilterValue => {
            // A data value equal to `FILTER_ALL` folds into the no-filter option
            let mut options = vec![FILTER_ALL.to_string()];
            if let Some(column) = resolved.get(&Selector::FilterColumn) {
                options.extend(
                    distinct_values(df, column)
                        .unwrap_or_default()
                        .into_iter()
                        .filter(|v| v != FILTER_ALL),
                );
            }
            options
        }
    }
}

fn dashboard_charts(
    df: &DataFrame,
    columns: &ChartColumns,
    session: &mut SessionState,
) -> DashboardCharts {
    let mut resolved = HashMap::new();
    let mut selectors = Vec::with_capacity(Selector::ALL.len());
    for selector in Selector::ALL {
        let options = selector_options(selector, df, columns, &resolved);
        let value = session.selection(selector.key(), &options, selector.default_index());
        if let Some(value) = &value {
            resolved.insert(selector, value.clone());
        }
        selectors.push(SelectorView {
            selector,
            value,
            options,
        });
    }
    let pick = |selector: Selector| resolved.get(&selector).map(String::as_str);

    let box_plot = match (pick(Selector::BoxX), pick(Selector::BoxY)) {
        (Some(x), Some(y)) => prepare_box_plot(df, x, y).map_err(|e| e.to_string()),
        _ => Err("No non-score columns to group the box plot by.".to_string()),
    };

    let histogram = match pick(Selector::BarX) {
        Some(x) => prepare_histogram(df, x).map_err(|e| e.to_string()),
        None => Err("No score column selected.".to_string()),
    };

    let filter = match (pick(Selector::FilterColumn), pick(Selector::FilterValue)) {
        (Some(column), Some(value)) => Some(RowFilter::from_selection(column, value)),
        _ => None,
    };
    let filtered_df = match &filter {
        Some(filter) => apply_filter(df, filter).map_err(|e| e.to_string()),
        None => Ok(df.clone()),
    };

    let scatter = match (
        &filtered_df,
        pick(Selector::ScatterX),
        pick(Selector::ScatterY),
        pick(Selector::ScatterColor),
    ) {
        (Ok(rows), Some(x), Some(y), Some(color)) => {
            prepare_scatter(rows, x, y, color).map_err(|e| e.to_string())
        }
        (Err(e), ..) => Err(e.clone()),
        _ => Err("No scatter axes selected.".to_string()),
    };

    let filtered = filtered_df.map(|rows| {
        let all: Vec<(String, String)> = columns
            .all
            .iter()
            .map(|name| (name.clone(), name.clone()))
            .collect();
        TableSnapshot::from_frame(&rows, &all, rows.height())
    });

    DashboardCharts {
        selectors,
        box_plot,
        histogram,
        scatter,
        filtered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::StateValue;

    fn sample() -> DataFrame {
        df!(
            "gender" => &["female", "male", "female", "male", "female", "male"],
            "race/ethnicity" => &["group B", "group C", "group B", "group A", "group C", "group B"],
            "parental level of education" => &[
                "bachelor's degree", "some college", "master's degree",
                "associate's degree", "some college", "high school"
            ],
            "lunch" => &["standard", "free/reduced", "standard", "standard", "free/reduced", "standard"],
            "math score" => &[50i64, 60, 60, 70, 80, 90],
            "reading score" => &[55i64, 65, 62, 71, 85, 88],
            "writing score" => &[52i64, 61, 66, 69, 83, 91]
        )
        .unwrap()
    }

    fn section<'a>(view: &'a PageView, heading: &str) -> &'a SidebarSection {
        view.sections
            .iter()
            .find(|s| s.heading == heading)
            .unwrap_or_else(|| panic!("no section {}", heading))
    }

    #[test]
    fn descriptors_cover_every_menu() {
        for menu in Menu::ALL {
            assert_eq!(descriptor(menu).menu, menu);
        }
        assert!(descriptor(Menu::Dashboard).charts);
        assert_eq!(descriptor(Menu::DataReading).statistic_column, Some(READING_SCORE));
    }

    #[test]
    fn math_page_shows_gender_and_math_with_statistics() {
        let mut session = SessionState::default();
        let view = build_page(Menu::DataMath, &sample(), &mut session);
        assert_eq!(view.title, "Math Score Data");
        assert_eq!(view.rows_shown, 5);
        let table = view.table.as_ref().unwrap();
        assert_eq!(table.headers, vec!["Gender", "Math Score"]);
        assert_eq!(table.rows[0], vec!["female", "50"]);
        assert_eq!(table.row_count(), 5);

        let stats = section(&view, "STATISTICS").body.as_ref().unwrap();
        assert_eq!(stats[0], ("Minimum".to_string(), "50".to_string()));
        assert_eq!(stats[1], ("Maximum".to_string(), "90".to_string()));
        assert_eq!(stats[2], ("Average".to_string(), "68.33".to_string()));
        assert_eq!(stats[3], ("Mode".to_string(), "60".to_string()));
        assert!(view.charts.is_none());
    }

    #[test]
    fn slider_at_total_shows_whole_table() {
        let df = sample();
        let mut session = SessionState::default();
        session.set_row_count(Menu::DataSiswa, 1000, df.height());
        let view = build_page(Menu::DataSiswa, &df, &mut session);
        assert_eq!(view.rows_shown, df.height());
        assert_eq!(view.table.unwrap().row_count(), df.height());
    }

    #[test]
    fn student_page_counts_categories() {
        let mut session = SessionState::default();
        let view = build_page(Menu::DataSiswa, &sample(), &mut session);
        assert_eq!(
            view.table.as_ref().unwrap().headers,
            vec!["Gender", "Race/Ethnicity", "Parental Level of Education"]
        );
        let gender = section(&view, "FREQUENCY: Gender").body.as_ref().unwrap();
        assert_eq!(
            gender,
            &vec![("female".to_string(), "3".to_string()), ("male".to_string(), "3".to_string())]
        );
        let total = section(&view, "TOTAL").body.as_ref().unwrap();
        assert_eq!(total[0].1, "6");
    }

    #[test]
    fn dashboard_builds_all_charts_with_defaults() {
        let mut session = SessionState::default();
        let view = build_page(Menu::Dashboard, &sample(), &mut session);
        assert_eq!(view.table.as_ref().unwrap().headers.len(), 7);

        let charts = view.charts.as_ref().unwrap().as_ref().unwrap();
        let y = charts.selector(Selector::ScatterY).unwrap();
        assert_eq!(y.value.as_deref(), Some("reading score"));
        let filter = charts.selector(Selector::FilterValue).unwrap();
        assert_eq!(filter.value.as_deref(), Some(FILTER_ALL));
        assert_eq!(filter.options, vec!["All", "female", "male"]);

        assert_eq!(charts.box_plot.as_ref().unwrap().x_column, "gender");
        assert_eq!(charts.histogram.as_ref().unwrap().total(), 6);
        assert_eq!(charts.scatter.as_ref().unwrap().point_count(), 6);
        assert_eq!(charts.filtered.as_ref().unwrap().row_count(), 6);

        let mode = section(&view, "MODE").body.as_ref().unwrap();
        assert_eq!(mode[0], ("math score".to_string(), "60.00".to_string()));
        let average = section(&view, "AVERAGE").body.as_ref().unwrap();
        assert_eq!(average[0].1, "68.33");
    }

    #[test]
    fn dashboard_filter_narrows_scatter_and_table() {
        let mut session = SessionState::default();
        session.set_selection("scatter_filter_value", "male".into());
        let view = build_page(Menu::Dashboard, &sample(), &mut session);
        let charts = view.charts.unwrap().unwrap();
        assert_eq!(charts.scatter.unwrap().point_count(), 3);
        assert_eq!(charts.filtered.unwrap().row_count(), 3);
    }

    #[test]
    fn filter_value_named_all_folds_into_no_filter() {
        let df = df!(
            "group" => &["All", "x", "All"],
            "math score" => &[1i64, 2, 3],
            "reading score" => &[4i64, 5, 6],
            "writing score" => &[7i64, 8, 9]
        )
        .unwrap();
        let mut session = SessionState::default();
        session.set_selection("scatter_filter_value", FILTER_ALL.into());
        let view = build_page(Menu::Dashboard, &df, &mut session);
        let charts = view.charts.unwrap().unwrap();
        let filter = charts.selector(Selector::FilterValue).unwrap();
        assert_eq!(filter.options, vec!["All", "x"]);
        assert_eq!(charts.filtered.unwrap().row_count(), 3);
    }

    #[test]
    fn changing_filter_column_resets_value() {
        let mut session = SessionState::default();
        session.set_selection("scatter_filter_value", "male".into());
        session.set_selection("scatter_filter_column", "lunch".into());
        let view = build_page(Menu::Dashboard, &sample(), &mut session);
        let charts = view.charts.unwrap().unwrap();
        let filter = charts.selector(Selector::FilterValue).unwrap();
        assert_eq!(filter.value.as_deref(), Some(FILTER_ALL));
        assert_eq!(
            session.get("scatter_filter_value"),
            Some(&StateValue::Text(FILTER_ALL.to_string()))
        );
    }

    #[test]
    fn missing_writing_score_disables_only_dashboard_charts() {
        let df = sample().drop(WRITING_SCORE).unwrap();
        let mut session = SessionState::default();

        let dashboard = build_page(Menu::Dashboard, &df, &mut session);
        let err = dashboard.charts.as_ref().unwrap().as_ref().unwrap_err();
        assert_eq!(err.missing, vec![WRITING_SCORE]);
        assert!(dashboard.table.is_ok());
        assert!(section(&dashboard, "MODE").body.is_err());

        for menu in [Menu::DataSiswa, Menu::DataMath, Menu::DataReading] {
            let view = build_page(menu, &df, &mut session);
            assert!(view.table.is_ok(), "{} table", menu);
            assert!(view.sections.iter().all(|s| s.body.is_ok()), "{} sections", menu);
        }

        let writing = build_page(Menu::DataWriting, &df, &mut session);
        assert!(writing.table.is_err());
        assert_eq!(writing.rows_shown, 5);
    }

    #[test]
    fn dashboard_without_categories_skips_box_plot_only() {
        let df = df!(
            "math score" => &[1i64, 2, 3],
            "reading score" => &[4i64, 5, 6],
            "writing score" => &[7i64, 8, 9]
        )
        .unwrap();
        let mut session = SessionState::default();
        let view = build_page(Menu::Dashboard, &df, &mut session);
        let charts = view.charts.unwrap().unwrap();
        assert!(charts.box_plot.is_err());
        assert!(charts.histogram.is_ok());
        assert!(charts.scatter.is_ok());
    }

    #[test]
    fn selector_cycling_wraps() {
        let view = SelectorView {
            selector: Selector::BarX,
            value: Some("math score".into()),
            options: SCORE_COLUMNS.iter().map(|s| s.to_string()).collect(),
        };
        assert_eq!(view.cycled(1).as_deref(), Some("reading score"));
        assert_eq!(view.cycled(-1).as_deref(), Some("writing score"));
        assert_eq!(Selector::FilterValue.next(), Selector::BoxY);
        assert_eq!(Selector::BoxY.prev(), Selector::FilterValue);
    }
}
