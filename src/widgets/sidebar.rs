use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, List, ListItem, Paragraph, Widget, Wrap},
};

use crate::config::Theme;
use crate::pages::{DashboardCharts, PageView, Selector, SidebarSection};
use crate::session::Menu;

/// Left column: page navigation, the row-count slider, dashboard selectors and
/// the page's statistics sections.
pub struct Sidebar<'a> {
    active: Menu,
    view: Option<&'a PageView>,
    focus: Option<Selector>,
    theme: &'a Theme,
}

impl<'a> Sidebar<'a> {
    pub fn new(active: Menu, theme: &'a Theme) -> Self {
        Self {
            active,
            view: None,
            focus: None,
            theme,
        }
    }

    pub fn with_view(mut self, view: Option<&'a PageView>) -> Self {
        self.view = view;
        self
    }

    pub fn with_focus(mut self, focus: Option<Selector>) -> Self {
        self.focus = focus;
        self
    }

    fn block(&self, title: &str, active: bool) -> Block<'static> {
        let color = if active {
            self.theme.get("border_active")
        } else {
            self.theme.get("sidebar_border")
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title.to_string())
    }

    fn render_navigation(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = Menu::ALL
            .iter()
            .map(|menu| {
                let style = if *menu == self.active {
                    Style::default()
                        .fg(self.theme.get("primary"))
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(self.theme.get("text_primary"))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!(" {} ", menu.hotkey()),
                        Style::default().fg(self.theme.get("secondary")),
                    ),
                    Span::styled(menu.label(), style),
                ]))
            })
            .collect();
        List::new(items)
            .block(self.block("Menu", false))
            .render(area, buf);
    }

    fn render_slider(&self, view: &PageView, area: Rect, buf: &mut Buffer) {
        let ratio = if view.total_rows == 0 {
            0.0
        } else {
            view.rows_shown as f64 / view.total_rows as f64
        };
        LineGauge::default()
            .block(self.block("Rows to show", self.focus.is_none()))
            .filled_style(Style::default().fg(self.theme.get("primary")))
            .unfilled_style(Style::default().fg(self.theme.get("dimmed")))
            .label(format!("{} / {}", view.rows_shown, view.total_rows))
            .ratio(ratio.clamp(0.0, 1.0))
            .render(area, buf);
    }

    fn render_selectors(&self, charts: &DashboardCharts, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = charts
            .selectors
            .iter()
            .map(|view| {
                let focused = self.focus == Some(view.selector);
                let value = view.value.as_deref().unwrap_or("-");
                let value_style = if focused {
                    Style::default()
                        .fg(self.theme.get("border_active"))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.get("text_primary"))
                };
                let marker = if focused { "▸ " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(
                        format!("{}: ", view.selector.label()),
                        Style::default().fg(self.theme.get("text_secondary")),
                    ),
                    Span::styled(format!("‹ {} ›", value), value_style),
                ]))
            })
            .collect();
        List::new(items)
            .block(self.block("Chart options", self.focus.is_some()))
            .render(area, buf);
    }

    fn section_lines(&self, sections: &[SidebarSection]) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for section in sections {
            lines.push(Line::from(Span::styled(
                section.heading.clone(),
                Style::default()
                    .fg(self.theme.get("primary"))
                    .add_modifier(Modifier::BOLD),
            )));
            match &section.body {
                Ok(entries) => {
                    for (label, value) in entries {
                        lines.push(Line::from(vec![
                            Span::styled(
                                format!("  {}: ", label),
                                Style::default().fg(self.theme.get("text_secondary")),
                            ),
                            Span::styled(
                                value.clone(),
                                Style::default().fg(self.theme.get("text_primary")),
                            ),
                        ]));
                    }
                }
                Err(message) => lines.push(Line::from(Span::styled(
                    format!("  {}", message),
                    Style::default().fg(self.theme.get("error")),
                ))),
            }
            lines.push(Line::default());
        }
        lines
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let selectors = self
            .view
            .and_then(|view| view.charts.as_ref())
            .and_then(|charts| charts.as_ref().ok());

        let mut constraints = vec![Constraint::Length(Menu::ALL.len() as u16 + 2)];
        if self.view.is_some() {
            constraints.push(Constraint::Length(3));
        }
        if let Some(charts) = selectors {
            constraints.push(Constraint::Length(charts.selectors.len() as u16 + 2));
        }
        constraints.push(Constraint::Fill(1));

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        self.render_navigation(layout[0], buf);

        let Some(view) = self.view else {
            return;
        };
        self.render_slider(view, layout[1], buf);

        let mut next = 2;
        if let Some(charts) = selectors {
            self.render_selectors(charts, layout[next], buf);
            next += 1;
        }

        Paragraph::new(self.section_lines(&view.sections))
            .block(self.block("Statistics", false))
            .wrap(Wrap { trim: false })
            .render(layout[next], buf);
    }
}
