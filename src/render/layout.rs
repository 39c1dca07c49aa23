use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the navigation sidebar.
pub const SIDEBAR_WIDTH: u16 = 44;

/// Top-level regions: sidebar and main view side by side, then the key-hint
/// bar and the optional debug row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub sidebar: Rect,
    pub main_view: Rect,
    pub control_bar: Rect,
    pub debug: Option<Rect>,
}

pub fn app_layout(area: Rect, debug_enabled: bool) -> AppLayout {
    let mut constraints = vec![Constraint::Fill(1), Constraint::Length(1)];
    if debug_enabled {
        constraints.push(Constraint::Length(1));
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)])
        .split(rows[0]);

    AppLayout {
        sidebar: columns[0],
        main_view: columns[1],
        control_bar: rows[1],
        debug: debug_enabled.then(|| rows[2]),
    }
}

/// Main view regions: a title line, the table head, and the chart area on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub title: Rect,
    pub table: Rect,
    pub charts: Option<Rect>,
}

/// `table_rows` is the number of rows the table shows; it gets its rows plus
/// header and borders, never more than half the view when charts are below.
pub fn page_layout(area: Rect, table_rows: usize, with_charts: bool) -> PageLayout {
    let wanted = u16::try_from(table_rows)
        .unwrap_or(u16::MAX)
        .saturating_add(3);
    let table = if with_charts {
        Constraint::Length(wanted.min(area.height.saturating_sub(1) / 2).max(4))
    } else {
        Constraint::Fill(1)
    };
    let mut constraints = vec![Constraint::Length(1), table];
    if with_charts {
        constraints.push(Constraint::Fill(1));
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    PageLayout {
        title: layout[0],
        table: layout[1],
        charts: with_charts.then(|| layout[2]),
    }
}

/// Centered rect within `r` with given percentage width and height.
pub fn centered_rect(r: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_row_only_when_enabled() {
        let area = Rect::new(0, 0, 120, 40);
        let plain = app_layout(area, false);
        assert!(plain.debug.is_none());
        assert_eq!(plain.control_bar.y, 39);
        assert_eq!(plain.sidebar.width, SIDEBAR_WIDTH);

        let debug = app_layout(area, true);
        assert_eq!(debug.debug.map(|r| r.y), Some(39));
        assert_eq!(debug.control_bar.y, 38);
    }

    #[test]
    fn dashboard_table_leaves_room_for_charts() {
        let area = Rect::new(0, 0, 80, 40);
        let page = page_layout(area, 1000, true);
        assert!(page.table.height <= 20);
        assert!(page.charts.is_some_and(|r| r.height >= 19));

        // Row counts past u16 range still fill the table's share
        let huge = page_layout(area, 65_536, true);
        assert_eq!(huge.table, page.table);

        let plain = page_layout(area, 5, false);
        assert!(plain.charts.is_none());
        assert_eq!(plain.table.height, 39);
    }
}
