use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, LegendPosition,
        Paragraph, Tabs, Widget, Wrap,
    },
};

use crate::chart_data::{BoxPlotData, HistogramData, ScatterData};
use crate::config::Theme;
use crate::pages::{ChartPanel, DashboardCharts};
use crate::source::MissingColumnsError;
use crate::statistics::format_number;
use crate::widgets::datatable::DataTable;

const BOX_HALF_WIDTH: f64 = 0.3;

fn format_axis_label(v: f64) -> String {
    if v.fract() == 0.0 {
        format_number(v)
    } else {
        format!("{:.1}", v)
    }
}

/// Padded `[lo, hi]` around the data so points do not sit on the border.
fn padded_bounds(lo: f64, hi: f64) -> [f64; 2] {
    if hi > lo {
        let pad = (hi - lo) * 0.05;
        [lo - pad, hi + pad]
    } else {
        [lo - 1.0, hi + 1.0]
    }
}

/// Dashboard chart area: a tab strip naming the panels, then the panel that
/// follows the focused selector.
pub struct ChartsPanel<'a> {
    charts: &'a Result<DashboardCharts, MissingColumnsError>,
    panel: ChartPanel,
    theme: &'a Theme,
}

impl<'a> ChartsPanel<'a> {
    pub fn new(
        charts: &'a Result<DashboardCharts, MissingColumnsError>,
        panel: ChartPanel,
        theme: &'a Theme,
    ) -> Self {
        Self {
            charts,
            panel,
            theme,
        }
    }

    fn block(&self, title: String) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.get("sidebar_border")))
            .title(title)
    }

    fn message(&self, title: &str, text: &str, area: Rect, buf: &mut Buffer) {
        Paragraph::new(text.to_string())
            .style(Style::default().fg(self.theme.get("warning")))
            .wrap(Wrap { trim: true })
            .block(self.block(title.to_string()))
            .render(area, buf);
    }

    fn render_box_plot(&self, plot: &BoxPlotData, area: Rect, buf: &mut Buffer) {
        if plot.boxes.is_empty() {
            self.message(&plot.title(), "No values to plot", area, buf);
            return;
        }
        let lo = plot.boxes.iter().map(|b| b.min).fold(f64::INFINITY, f64::min);
        let hi = plot
            .boxes
            .iter()
            .map(|b| b.max)
            .fold(f64::NEG_INFINITY, f64::max);
        let [y_lo, y_hi] = padded_bounds(lo, hi);
        // Room under the boxes for category labels
        let label_y = y_lo - (y_hi - y_lo) * 0.08;
        let y_min = y_lo - (y_hi - y_lo) * 0.12;

        let box_color = self.theme.get("box_plot");
        let outlier_color = self.theme.get("outlier_marker");
        let label_color = self.theme.get("text_secondary");
        let width = plot.boxes.len() as f64 + 0.5;

        Canvas::default()
            .block(self.block(plot.title()))
            .marker(Marker::Braille)
            .x_bounds([-0.5, width])
            .y_bounds([y_min, y_hi])
            .paint(|ctx| {
                ctx.print(
                    -0.5,
                    y_hi,
                    Span::styled(format_axis_label(hi), Style::default().fg(label_color)),
                );
                ctx.print(
                    -0.5,
                    y_lo,
                    Span::styled(format_axis_label(lo), Style::default().fg(label_color)),
                );
                for (i, stats) in plot.boxes.iter().enumerate() {
                    let center = i as f64 + 0.5;
                    let (left, right) = (center - BOX_HALF_WIDTH, center + BOX_HALF_WIDTH);
                    let mut segment = |x1: f64, y1: f64, x2: f64, y2: f64| {
                        ctx.draw(&CanvasLine::new(x1, y1, x2, y2, box_color));
                    };
                    // Box from Q1 to Q3 with the median across it
                    segment(left, stats.q1, right, stats.q1);
                    segment(left, stats.q3, right, stats.q3);
                    segment(left, stats.q1, left, stats.q3);
                    segment(right, stats.q1, right, stats.q3);
                    segment(left, stats.median, right, stats.median);
                    // Whiskers with caps
                    segment(center, stats.q3, center, stats.upper_whisker);
                    segment(center, stats.q1, center, stats.lower_whisker);
                    let cap = BOX_HALF_WIDTH / 2.0;
                    segment(center - cap, stats.upper_whisker, center + cap, stats.upper_whisker);
                    segment(center - cap, stats.lower_whisker, center + cap, stats.lower_whisker);

                    let outliers: Vec<(f64, f64)> =
                        stats.outliers.iter().map(|y| (center, *y)).collect();
                    ctx.draw(&Points {
                        coords: &outliers,
                        color: outlier_color,
                    });
                    ctx.print(
                        left,
                        label_y,
                        Span::styled(stats.category.clone(), Style::default().fg(label_color)),
                    );
                }
            })
            .render(area, buf);
    }

    fn render_histogram(&self, histogram: &HistogramData, area: Rect, buf: &mut Buffer) {
        let block = self.block(format!("{} (n={})", histogram.title(), histogram.total()));
        let inner = block.inner(area);
        let bins = histogram.bins.len().max(1) as u16;
        let gap = 1u16;
        let bar_width = (inner.width.saturating_sub(gap * (bins - 1)) / bins).max(1);

        let color = self.theme.get("histogram");
        let bars: Vec<Bar> = histogram
            .bins
            .iter()
            .map(|bin| {
                Bar::default()
                    .value(bin.count as u64)
                    .label(Line::from(format_axis_label(bin.start)))
                    .text_value(bin.count.to_string())
                    .style(Style::default().fg(color))
            })
            .collect();

        BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(gap)
            .value_style(
                Style::default()
                    .fg(self.theme.get("background"))
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            )
            .label_style(Style::default().fg(self.theme.get("text_secondary")))
            .render(area, buf);
    }

    fn render_scatter(&self, scatter: &ScatterData, area: Rect, buf: &mut Buffer) {
        if scatter.point_count() == 0 {
            self.message(&scatter.title(), "No rows match the filter", area, buf);
            return;
        }
        let points = scatter.series.iter().flat_map(|s| s.points.iter());
        let (x_lo, x_hi, y_lo, y_hi) = points.fold(
            (
                f64::INFINITY,
                f64::NEG_INFINITY,
                f64::INFINITY,
                f64::NEG_INFINITY,
            ),
            |(x_lo, x_hi, y_lo, y_hi), (x, y)| (x_lo.min(*x), x_hi.max(*x), y_lo.min(*y), y_hi.max(*y)),
        );
        let x_bounds = padded_bounds(x_lo, x_hi);
        let y_bounds = padded_bounds(y_lo, y_hi);

        let datasets: Vec<Dataset> = scatter
            .series
            .iter()
            .enumerate()
            .map(|(i, series)| {
                Dataset::default()
                    .name(series.label.clone())
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(self.theme.series_color(i)))
                    .data(&series.points)
            })
            .collect();

        let label_style = Style::default().fg(self.theme.get("text_primary"));
        let labels = |[lo, hi]: [f64; 2]| {
            vec![
                Span::styled(format_axis_label(lo.round()), label_style),
                Span::styled(format_axis_label(((lo + hi) / 2.0).round()), label_style),
                Span::styled(format_axis_label(hi.round()), label_style),
            ]
        };

        Chart::new(datasets)
            .block(self.block(format!(
                "{} (color: {})",
                scatter.title(),
                scatter.color_column
            )))
            .x_axis(
                Axis::default()
                    .title(scatter.x_column.clone())
                    .bounds(x_bounds)
                    .labels(labels(x_bounds)),
            )
            .y_axis(
                Axis::default()
                    .title(scatter.y_column.clone())
                    .bounds(y_bounds)
                    .labels(labels(y_bounds)),
            )
            .legend_position(Some(LegendPosition::TopRight))
            .hidden_legend_constraints((Constraint::Ratio(1, 3), Constraint::Ratio(1, 2)))
            .render(area, buf);
    }

    fn render_charts(&self, charts: &DashboardCharts, area: Rect, buf: &mut Buffer) {
        match self.panel {
            ChartPanel::Box => match &charts.box_plot {
                Ok(plot) => self.render_box_plot(plot, area, buf),
                Err(e) => self.message("Box Plot", e, area, buf),
            },
            ChartPanel::Histogram => match &charts.histogram {
                Ok(histogram) => self.render_histogram(histogram, area, buf),
                Err(e) => self.message("Bar Plot", e, area, buf),
            },
            ChartPanel::Scatter => {
                let split = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .split(area);
                match &charts.scatter {
                    Ok(scatter) => self.render_scatter(scatter, split[0], buf),
                    Err(e) => self.message("Scatter Plot", e, split[0], buf),
                }
                match &charts.filtered {
                    Ok(table) => DataTable::new(
                        table,
                        format!("Filtered Data ({} rows)", table.row_count()),
                    )
                    .with_colors(
                        self.theme.get("table_header"),
                        self.theme.get("sidebar_border"),
                        self.theme.get("dimmed"),
                    )
                    .render(split[1], buf),
                    Err(e) => self.message("Filtered Data", e, split[1], buf),
                }
            }
        }
    }
}

impl Widget for ChartsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Fill(1)])
            .split(area);

        let selected = match self.panel {
            ChartPanel::Box => 0,
            ChartPanel::Histogram => 1,
            ChartPanel::Scatter => 2,
        };
        Tabs::new(["Box Plot", "Bar Plot", "Scatter Plot"])
            .select(selected)
            .style(Style::default().fg(self.theme.get("text_secondary")))
            .highlight_style(
                Style::default()
                    .fg(self.theme.get("primary"))
                    .add_modifier(Modifier::BOLD),
            )
            .render(layout[0], buf);

        match self.charts {
            Ok(charts) => self.render_charts(charts, layout[1], buf),
            Err(e) => self.message(
                "Charts",
                &format!("Charts unavailable: {}", e),
                layout[1],
                buf,
            ),
        }
    }
}
