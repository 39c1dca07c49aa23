use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

pub mod cache;
pub mod chart_data;
pub mod config;
pub mod error_display;
mod help_strings;
pub mod logging;
pub mod pages;
pub mod render;
pub mod session;
pub mod source;
pub mod statistics;
pub mod summary;
pub mod widgets;

pub use cache::CacheManager;
pub use config::{AppConfig, ColorParser, ConfigManager, Theme};
pub use examdash_cli::{Args, CompressionFormat, StartPage, DEFAULT_DATA_FILE};
pub use source::LoadOptions;

use pages::{render_page, ChartPanel, PageView, Selector};
use render::layout::{app_layout, centered_rect, page_layout};
use session::{Menu, SessionState};
use widgets::charts::ChartsPanel;
use widgets::controls::{Controls, DASHBOARD_CONTROLS, PAGE_CONTROLS};
use widgets::datatable::DataTable;
use widgets::debug::DebugState;
use widgets::sidebar::Sidebar;

/// Application name used for cache and config directories
pub const APP_NAME: &str = "examdash";

/// Rows moved by PageUp/PageDown on the slider.
const ROW_PAGE_STEP: isize = 10;

pub enum AppEvent {
    Key(KeyEvent),
    /// Set the data file and load it.
    Open(PathBuf, LoadOptions),
    Navigate(Menu),
    /// Reload the data file and rebuild the active page.
    Refresh,
    Exit,
    Resize(u16, u16),
}

pub struct App {
    path: PathBuf,
    load_options: LoadOptions,
    session: SessionState,
    view: Option<PageView>,
    load_error: Option<String>,
    focus: Option<Selector>,
    panel: ChartPanel,
    debug: DebugState,
    show_help: bool,
    theme: Theme,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> App {
        Self::new_with_config(Theme::default(), &AppConfig::default())
    }

    /// Start page and initial row count come from `config.display`.
    pub fn new_with_config(theme: Theme, config: &AppConfig) -> App {
        let start = config.display.start_menu().unwrap_or_default();
        App {
            path: PathBuf::from(DEFAULT_DATA_FILE),
            load_options: LoadOptions::default(),
            session: SessionState::new(start, config.display.default_rows),
            view: None,
            load_error: None,
            focus: None,
            panel: ChartPanel::Box,
            debug: DebugState {
                enabled: config.debug.enabled,
                ..DebugState::default()
            },
            show_help: false,
            theme,
        }
    }

    pub fn enable_debug(&mut self) {
        self.debug.enabled = true;
    }

    pub fn view(&self) -> Option<&PageView> {
        self.view.as_ref()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn focus(&self) -> Option<Selector> {
        self.focus
    }

    pub fn chart_panel(&self) -> ChartPanel {
        self.panel
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn active_menu(&mut self) -> Menu {
        self.session.active_menu()
    }

    /// Reload the data file and rebuild the active page from the session state.
    fn refresh(&mut self) {
        let started = Instant::now();
        match render_page(&self.path, &self.load_options, &mut self.session) {
            Ok(view) => {
                self.load_error = None;
                self.view = Some(view);
            }
            Err(e) => {
                warn!(error = %e, "data load failed");
                self.load_error = Some(e.user_message());
                self.view = None;
                self.focus = None;
            }
        }
        self.debug.on_load(started.elapsed());
    }

    fn set_focus(&mut self, focus: Option<Selector>) {
        self.focus = focus;
        if let Some(selector) = focus {
            self.panel = selector.panel();
        }
        self.debug.last_action = match focus {
            Some(selector) => format!("focus:{}", selector.key()),
            None => "unfocus".to_string(),
        };
    }

    /// Whether the dashboard's selectors are available to focus.
    fn has_selectors(&self) -> bool {
        self.view
            .as_ref()
            .and_then(|view| view.charts.as_ref())
            .is_some_and(|charts| charts.is_ok())
    }

    fn step_rows(&mut self, delta: isize) -> Option<AppEvent> {
        let view = self.view.as_ref()?;
        let (menu, total) = (view.menu, view.total_rows);
        let rows = self.session.step_row_count(menu, delta, total);
        self.debug.last_action = format!("rows:{}", rows);
        Some(AppEvent::Refresh)
    }

    fn set_rows(&mut self, requested: usize) -> Option<AppEvent> {
        let view = self.view.as_ref()?;
        let (menu, total) = (view.menu, view.total_rows);
        let rows = self.session.set_row_count(menu, requested, total);
        self.debug.last_action = format!("rows:{}", rows);
        Some(AppEvent::Refresh)
    }

    /// Move the focused selector `delta` options along its domain.
    fn cycle_selection(&mut self, selector: Selector, delta: isize) -> Option<AppEvent> {
        let charts = self.view.as_ref()?.charts.as_ref()?.as_ref().ok()?;
        let value = charts.selector(selector)?.cycled(delta)?;
        self.debug.last_action = format!("{}={}", selector.key(), value);
        self.session.set_selection(selector.key(), value);
        Some(AppEvent::Refresh)
    }

    fn key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        self.debug.on_key(event);

        if self.show_help {
            if matches!(event.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return None;
        }

        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(AppEvent::Exit);
        }

        match event.code {
            KeyCode::Char('q') => Some(AppEvent::Exit),
            KeyCode::Char('?') => {
                self.show_help = true;
                None
            }
            KeyCode::Char('r') => {
                self.debug.last_action = "reload".to_string();
                Some(AppEvent::Refresh)
            }
            KeyCode::Char(c) if Menu::from_hotkey(c).is_some() => {
                Menu::from_hotkey(c).map(AppEvent::Navigate)
            }
            KeyCode::Tab if self.has_selectors() => {
                let next = self.focus.map(Selector::next).unwrap_or(Selector::ALL[0]);
                self.set_focus(Some(next));
                None
            }
            KeyCode::BackTab if self.has_selectors() => {
                let prev = self
                    .focus
                    .map(Selector::prev)
                    .unwrap_or(Selector::ALL[Selector::ALL.len() - 1]);
                self.set_focus(Some(prev));
                None
            }
            KeyCode::Esc => {
                self.set_focus(None);
                None
            }
            KeyCode::Right | KeyCode::Char('l') => match self.focus {
                Some(selector) => self.cycle_selection(selector, 1),
                None => self.step_rows(1),
            },
            KeyCode::Left | KeyCode::Char('h') => match self.focus {
                Some(selector) => self.cycle_selection(selector, -1),
                None => self.step_rows(-1),
            },
            KeyCode::Char('+') | KeyCode::Char('=') => self.step_rows(1),
            KeyCode::Char('-') => self.step_rows(-1),
            KeyCode::PageUp => self.step_rows(ROW_PAGE_STEP),
            KeyCode::PageDown => self.step_rows(-ROW_PAGE_STEP),
            KeyCode::Home => self.set_rows(1),
            KeyCode::End => self.set_rows(usize::MAX),
            _ => None,
        }
    }

    pub fn event(&mut self, event: &AppEvent) -> Option<AppEvent> {
        self.debug.num_events += 1;
        match event {
            AppEvent::Key(key) => self.key(key),
            AppEvent::Open(path, options) => {
                info!(path = %path.display(), "opening data file");
                self.path = path.clone();
                self.load_options = options.clone();
                Some(AppEvent::Refresh)
            }
            AppEvent::Navigate(menu) => {
                info!(page = %menu, "navigate");
                self.session.set_active_menu(*menu);
                if *menu != Menu::Dashboard {
                    self.focus = None;
                }
                self.debug.last_action = format!("page:{}", menu);
                Some(AppEvent::Refresh)
            }
            AppEvent::Refresh => {
                self.refresh();
                None
            }
            AppEvent::Resize(_, _) => None,
            AppEvent::Exit => None,
        }
    }

    fn render_main(&self, area: Rect, buf: &mut Buffer) {
        if let Some(message) = &self.load_error {
            Paragraph::new(message.as_str())
                .style(Style::default().fg(self.theme.get("error")))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(self.theme.get("error")))
                        .title(format!("Failed to load {}", self.path.display())),
                )
                .render(area, buf);
            return;
        }

        let Some(view) = &self.view else {
            Paragraph::new("Loading...").render(area, buf);
            return;
        };

        let layout = page_layout(area, view.rows_shown, view.charts.is_some());
        Paragraph::new(Line::from(vec![
            Span::styled(
                view.title,
                Style::default()
                    .fg(self.theme.get("primary"))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} of {} rows", view.rows_shown, view.total_rows),
                Style::default().fg(self.theme.get("text_secondary")),
            ),
        ]))
        .render(layout.title, buf);

        match &view.table {
            Ok(table) => DataTable::new(table, format!("First {} rows", table.row_count()))
                .with_colors(
                    self.theme.get("table_header"),
                    self.theme.get("sidebar_border"),
                    self.theme.get("dimmed"),
                )
                .render(layout.table, buf),
            Err(e) => Paragraph::new(format!("Cannot show this page: {}", e))
                .style(Style::default().fg(self.theme.get("warning")))
                .block(Block::default().borders(Borders::ALL).title("Data"))
                .render(layout.table, buf),
        }

        if let (Some(area), Some(charts)) = (layout.charts, &view.charts) {
            ChartsPanel::new(charts, self.panel, &self.theme).render(area, buf);
        }
    }

    fn render_help(&self, is_dashboard: bool, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(area, 60, 70);
        let mut text = help_strings::pages().to_string();
        if is_dashboard {
            text.push('\n');
            text.push_str(help_strings::dashboard());
        }
        Clear.render(popup, buf);
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.get("border_active")))
                    .title("Help (Esc to close)"),
            )
            .render(popup, buf);
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.debug.num_frames += 1;

        Block::default()
            .style(Style::default().bg(self.theme.get("background")))
            .render(area, buf);

        let active = self.session.active_menu();
        let layout = app_layout(area, self.debug.enabled);

        Sidebar::new(active, &self.theme)
            .with_view(self.view.as_ref())
            .with_focus(self.focus)
            .render(layout.sidebar, buf);

        self.render_main(layout.main_view, buf);

        let hints = if active == Menu::Dashboard {
            DASHBOARD_CONTROLS
        } else {
            PAGE_CONTROLS
        };
        let mut controls = Controls::new(hints).with_colors(
            self.theme.get("controls_bg"),
            self.theme.get("secondary"),
        );
        if let Some(view) = &self.view {
            controls = controls.with_rows(view.rows_shown, view.total_rows);
        }
        (&controls).render(layout.control_bar, buf);

        if let Some(debug_area) = layout.debug {
            (&self.debug).render(debug_area, buf);
        }

        if self.show_help {
            self.render_help(active == Menu::Dashboard, area, buf);
        }
    }
}
