use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Paragraph, Widget},
};

/// Key hints shown on every page.
pub const PAGE_CONTROLS: &[(&str, &str)] = &[
    ("1-5", "Page"),
    ("+/-", "Rows"),
    ("r", "Reload"),
    ("?", "Help"),
    ("q", "Quit"),
];

/// Key hints on the dashboard, which also has chart selectors.
pub const DASHBOARD_CONTROLS: &[(&str, &str)] = &[
    ("1-5", "Page"),
    ("+/-", "Rows"),
    ("Tab", "Select"),
    ("h/l", "Change"),
    ("Esc", "Unfocus"),
    ("r", "Reload"),
    ("?", "Help"),
    ("q", "Quit"),
];

/// Bottom bar of key hints with the slider position on the right.
pub struct Controls<'a> {
    hints: &'a [(&'a str, &'a str)],
    rows: Option<(usize, usize)>,
    background: Color,
    key_color: Color,
}

impl<'a> Controls<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)]) -> Self {
        Self {
            hints,
            rows: None,
            background: Color::DarkGray,
            key_color: Color::Reset,
        }
    }

    /// Show `shown of total` rows.
    pub fn with_rows(mut self, shown: usize, total: usize) -> Self {
        self.rows = Some((shown, total));
        self
    }

    pub fn with_colors(mut self, background: Color, key_color: Color) -> Self {
        self.background = background;
        self.key_color = key_color;
        self
    }
}

impl Widget for &Controls<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut constraints = self.hints.iter().fold(vec![], |mut acc, (key, action)| {
            acc.push(Constraint::Length(key.chars().count() as u16 + 2));
            acc.push(Constraint::Length(action.chars().count() as u16 + 1));
            acc
        });
        constraints.push(Constraint::Fill(1));

        let layout = Layout::new(Direction::Horizontal, constraints).split(area);
        let bar = Style::default().bg(self.background);

        for (i, (key, action)) in self.hints.iter().enumerate() {
            Paragraph::new(*key)
                .style(Style::default().fg(self.key_color).bold())
                .centered()
                .render(layout[i * 2], buf);
            Paragraph::new(*action)
                .style(bar)
                .render(layout[i * 2 + 1], buf);
        }

        let rows = self
            .rows
            .map(|(shown, total)| format!("Rows: {} of {} ", shown, total))
            .unwrap_or_default();
        Paragraph::new(rows)
            .style(bar)
            .right_aligned()
            .render(layout[self.hints.len() * 2], buf);
    }
}
