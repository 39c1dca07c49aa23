use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};

use crate::pages::TableSnapshot;

/// Widest a column is allowed to grow, in cells.
const MAX_COLUMN_WIDTH: usize = 30;

/// Read-only table of a page's projected rows.
pub struct DataTable<'a> {
    snapshot: &'a TableSnapshot,
    title: String,
    header_color: Color,
    border_color: Color,
    dimmed_color: Color,
}

impl<'a> DataTable<'a> {
    pub fn new(snapshot: &'a TableSnapshot, title: impl Into<String>) -> Self {
        Self {
            snapshot,
            title: title.into(),
            header_color: Color::White,
            border_color: Color::Cyan,
            dimmed_color: Color::DarkGray,
        }
    }

    pub fn with_colors(mut self, header: Color, border: Color, dimmed: Color) -> Self {
        self.header_color = header;
        self.border_color = border;
        self.dimmed_color = dimmed;
        self
    }

    /// Width of each column: the longest of header and cells, capped.
    fn column_widths(&self) -> Vec<Constraint> {
        self.snapshot
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let widest = self
                    .snapshot
                    .rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0);
                Constraint::Length(widest.min(MAX_COLUMN_WIDTH) as u16)
            })
            .collect()
    }
}

impl Widget for DataTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .title(self.title.clone());

        let header = Row::new(self.snapshot.headers.iter().map(|h| Cell::from(h.as_str()))).style(
            Style::default()
                .fg(self.header_color)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );

        let rows = self
            .snapshot
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let style = if i % 2 == 1 {
                    Style::default().fg(self.dimmed_color)
                } else {
                    Style::default()
                };
                Row::new(row.iter().map(|cell| Cell::from(cell.as_str()))).style(style)
            });

        Table::new(rows, self.column_widths())
            .header(header)
            .column_spacing(2)
            .block(block)
            .render(area, buf);
    }
}
