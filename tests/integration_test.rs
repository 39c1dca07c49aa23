use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use examdash::pages::{ChartPanel, Selector};
use examdash::session::{Menu, StateValue};
use examdash::source::{load_table, WRITING_SCORE};
use examdash::summary::summarize;
use examdash::{App, AppConfig, AppEvent, LoadOptions, Theme};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use std::path::Path;

mod common;

fn open(path: &Path) -> App {
    let mut app = App::new();
    common::drive(&mut app, AppEvent::Open(path.to_path_buf(), LoadOptions::default()));
    app
}

fn press(app: &mut App, code: KeyCode) {
    common::drive(app, AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

fn screen(app: &mut App) -> String {
    let area = Rect::new(0, 0, 160, 50);
    let mut buf = Buffer::empty(area);
    app.render(area, &mut buf);
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn selector_value(app: &App, selector: Selector) -> Option<String> {
    let charts = app.view()?.charts.as_ref()?.as_ref().ok()?;
    charts.selector(selector)?.value.clone()
}

#[test]
fn test_open_shows_dashboard_with_default_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = open(&common::write_exams_csv(dir.path()));

    assert!(app.load_error().is_none());
    let view = app.view().unwrap();
    assert_eq!(view.menu, Menu::Dashboard);
    assert_eq!(view.title, "Student Data Analysis");
    assert_eq!(view.total_rows, common::ROWS.len());
    assert_eq!(view.rows_shown, 5);
    assert_eq!(view.table.as_ref().unwrap().row_count(), 5);
    assert!(view.charts.as_ref().unwrap().is_ok());
    assert_eq!(app.active_menu(), Menu::Dashboard);
}

#[test]
fn test_navigation_overwrites_active_menu() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = open(&common::write_exams_csv(dir.path()));

    press(&mut app, KeyCode::Char('3'));
    assert_eq!(app.active_menu(), Menu::DataMath);
    let view = app.view().unwrap();
    assert_eq!(view.title, "Math Score Data");
    let stats = view.sections[0].body.as_ref().unwrap();
    assert_eq!(stats[2], ("Average".to_string(), "62.75".to_string()));

    press(&mut app, KeyCode::Char('2'));
    assert_eq!(app.view().unwrap().title, "Student Data");
    press(&mut app, KeyCode::Char('2'));
    assert_eq!(app.active_menu(), Menu::DataSiswa);
    press(&mut app, KeyCode::Char('9'));
    assert_eq!(app.active_menu(), Menu::DataSiswa);
}

#[test]
fn test_row_slider_is_clamped_per_page() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = open(&common::write_exams_csv(dir.path()));
    let total = common::ROWS.len();

    press(&mut app, KeyCode::Char('+'));
    assert_eq!(app.view().unwrap().rows_shown, 6);
    press(&mut app, KeyCode::End);
    assert_eq!(app.view().unwrap().rows_shown, total);
    press(&mut app, KeyCode::PageUp);
    assert_eq!(app.view().unwrap().rows_shown, total);
    assert_eq!(app.view().unwrap().table.as_ref().unwrap().row_count(), total);
    press(&mut app, KeyCode::Home);
    assert_eq!(app.view().unwrap().rows_shown, 1);
    press(&mut app, KeyCode::Char('-'));
    assert_eq!(app.view().unwrap().rows_shown, 1);

    // Other pages keep their own slider
    press(&mut app, KeyCode::Char('4'));
    assert_eq!(app.view().unwrap().rows_shown, 5);
    press(&mut app, KeyCode::Right);
    assert_eq!(app.view().unwrap().rows_shown, 6);
    assert_eq!(
        app.session().get("num_rows_read"),
        Some(&StateValue::Count(6))
    );
    assert_eq!(app.session().get("num_rows"), Some(&StateValue::Count(1)));
}

#[test]
fn test_selector_focus_and_cycling() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = open(&common::write_exams_csv(dir.path()));

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus(), Some(Selector::BoxY));
    assert_eq!(app.chart_panel(), ChartPanel::Box);
    press(&mut app, KeyCode::Char('l'));
    assert_eq!(
        selector_value(&app, Selector::BoxY).as_deref(),
        Some("reading score")
    );
    // The slider does not move while a selector has focus
    assert_eq!(app.view().unwrap().rows_shown, 5);

    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus(), Some(Selector::BarX));
    assert_eq!(app.chart_panel(), ChartPanel::Histogram);
    press(&mut app, KeyCode::Char('h'));
    assert_eq!(
        selector_value(&app, Selector::BarX).as_deref(),
        Some("writing score")
    );

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.focus(), None);
    // Panel stays on the last focused chart
    assert_eq!(app.chart_panel(), ChartPanel::Histogram);
    press(&mut app, KeyCode::Right);
    assert_eq!(app.view().unwrap().rows_shown, 6);
}

#[test]
fn test_scatter_filter_keeps_matching_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = open(&common::write_exams_csv(dir.path()));

    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.focus(), Some(Selector::FilterValue));
    assert_eq!(app.chart_panel(), ChartPanel::Scatter);
    assert_eq!(selector_value(&app, Selector::FilterValue).as_deref(), Some("All"));

    press(&mut app, KeyCode::Right);
    assert_eq!(
        selector_value(&app, Selector::FilterValue).as_deref(),
        Some("female")
    );
    let charts = app.view().unwrap().charts.as_ref().unwrap().as_ref().unwrap();
    let scatter = charts.scatter.as_ref().unwrap();
    assert_eq!(scatter.point_count(), 6);
    let filtered = charts.filtered.as_ref().unwrap();
    assert_eq!(filtered.row_count(), 6);
    assert!(filtered.rows.iter().all(|row| row[0] == "female"));

    // A new filter column resets the value to All
    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.focus(), Some(Selector::FilterColumn));
    press(&mut app, KeyCode::Right);
    assert_eq!(
        selector_value(&app, Selector::FilterColumn).as_deref(),
        Some("race/ethnicity")
    );
    assert_eq!(selector_value(&app, Selector::FilterValue).as_deref(), Some("All"));
}

#[test]
fn test_missing_writing_score_only_disables_dashboard_charts() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = open(&common::write_without_writing_score(dir.path()));

    let view = app.view().unwrap();
    let err = view.charts.as_ref().unwrap().as_ref().unwrap_err();
    assert_eq!(err.missing, vec![WRITING_SCORE]);
    assert!(view.table.is_ok());

    // No selectors to focus
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus(), None);

    let text = screen(&mut app);
    assert!(text.contains("missing columns: writing score"), "{}", text);

    for key in ['2', '3', '4'] {
        press(&mut app, KeyCode::Char(key));
        let view = app.view().unwrap();
        assert!(view.table.is_ok());
        assert!(view.sections.iter().all(|s| s.body.is_ok()));
    }

    press(&mut app, KeyCode::Char('5'));
    let view = app.view().unwrap();
    assert!(view.table.is_err());
    assert!(view.sections[0].body.is_err());
}

#[test]
fn test_load_error_is_reported_and_retried_on_next_interaction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exams.csv");
    let mut app = open(&path);

    assert!(app.view().is_none());
    let message = app.load_error().unwrap();
    assert!(message.contains("File not found"), "{}", message);
    assert!(screen(&mut app).contains("File not found"));

    // Slider keys are ignored without data
    press(&mut app, KeyCode::Char('+'));
    assert!(app.view().is_none());

    common::write_exams_csv(dir.path());
    press(&mut app, KeyCode::Char('r'));
    assert!(app.load_error().is_none());
    assert_eq!(app.view().unwrap().total_rows, common::ROWS.len());
}

#[test]
fn test_reload_picks_up_file_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_exams_csv(dir.path());
    let mut app = open(&path);
    press(&mut app, KeyCode::End);
    assert_eq!(app.view().unwrap().rows_shown, 12);

    common::write_csv(dir.path(), "exams.csv", common::HEADER, &common::ROWS[..4]);
    press(&mut app, KeyCode::Char('r'));
    let view = app.view().unwrap();
    assert_eq!(view.total_rows, 4);
    assert_eq!(view.rows_shown, 4);
}

#[test]
fn test_help_and_quit() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = open(&common::write_exams_csv(dir.path()));

    press(&mut app, KeyCode::Char('?'));
    assert!(app.show_help());
    assert!(screen(&mut app).contains("Help (Esc to close)"));
    // Keys other than Esc and ? are swallowed by the help overlay
    let quit = app.event(&AppEvent::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    assert!(quit.is_none());
    press(&mut app, KeyCode::Esc);
    assert!(!app.show_help());

    let quit = app.event(&AppEvent::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    assert!(matches!(quit, Some(AppEvent::Exit)));
    let ctrl_c = app.event(&AppEvent::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    )));
    assert!(matches!(ctrl_c, Some(AppEvent::Exit)));
}

#[test]
fn test_start_page_and_rows_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_exams_csv(dir.path());
    let mut config = AppConfig::default();
    config.display.start_page = "data_siswa".to_string();
    config.display.default_rows = 3;

    let mut app = App::new_with_config(Theme::default(), &config);
    common::drive(&mut app, AppEvent::Open(path, LoadOptions::default()));

    let view = app.view().unwrap();
    assert_eq!(view.menu, Menu::DataSiswa);
    assert_eq!(view.rows_shown, 3);
    let text = screen(&mut app);
    assert!(text.contains("FREQUENCY: Gender"), "{}", text);
    assert!(text.contains("Parental Level of Education"));
}

#[test]
fn test_dashboard_renders_charts() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = open(&common::write_exams_csv(dir.path()));

    let text = screen(&mut app);
    assert!(text.contains("Student Data Analysis"));
    assert!(text.contains("Box Plot: math score by gender"), "{}", text);
    assert!(text.contains("MODE"));
    assert!(text.contains("AVERAGE"));

    press(&mut app, KeyCode::BackTab);
    let text = screen(&mut app);
    assert!(text.contains("Filtered Data (12 rows)"), "{}", text);
}

#[test]
fn test_summary_matches_page_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_exams_csv(dir.path());
    let df = load_table(&path, &LoadOptions::default()).unwrap();

    let math = summarize(Menu::DataMath, &df);
    let stats = math.statistics.unwrap();
    assert_eq!(stats.mean_display(), "62.75");
    assert_eq!(stats.mode, 40.0);

    let dashboard = summarize(Menu::Dashboard, &df);
    assert_eq!(dashboard.averages["math score"], 62.75);
    assert_eq!(dashboard.averages["reading score"], 70.25);
    assert_eq!(dashboard.modes["reading score"], 95.0);
    assert!(dashboard.errors.is_empty());

    let students = summarize(Menu::DataSiswa, &df);
    assert_eq!(students.frequencies.len(), 3);
    assert_eq!(students.total_rows, 12);
}
