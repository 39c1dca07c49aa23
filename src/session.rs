//! Process-wide UI state: the active menu and per-page selections.
//!
//! Values live under named keys and are created with their default the first
//! time they are read. Every user action is an overwrite; nothing is removed.

use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::StartPage;

/// Rows shown by a page's table before the user moves its slider.
pub const DEFAULT_ROW_COUNT: usize = 5;

/// The five mutually exclusive pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Menu {
    #[default]
    Dashboard,
    DataSiswa,
    DataMath,
    DataReading,
    DataWriting,
}

impl Menu {
    pub const ALL: [Menu; 5] = [
        Menu::Dashboard,
        Menu::DataSiswa,
        Menu::DataMath,
        Menu::DataReading,
        Menu::DataWriting,
    ];

    /// Key stored under `active_menu`.
    pub fn key(self) -> &'static str {
        match self {
            Menu::Dashboard => "dashboard",
            Menu::DataSiswa => "data_siswa",
            Menu::DataMath => "data_math",
            Menu::DataReading => "data_reading",
            Menu::DataWriting => "data_writing",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|menu| menu.key() == key)
    }

    /// Navigation label.
    pub fn label(self) -> &'static str {
        match self {
            Menu::Dashboard => "Dashboard",
            Menu::DataSiswa => "Student Data",
            Menu::DataMath => "Math Score Data",
            Menu::DataReading => "Reading Score Data",
            Menu::DataWriting => "Writing Score Data",
        }
    }

    /// Number key that selects this page.
    pub fn hotkey(self) -> char {
        match self {
            Menu::Dashboard => '1',
            Menu::DataSiswa => '2',
            Menu::DataMath => '3',
            Menu::DataReading => '4',
            Menu::DataWriting => '5',
        }
    }

    pub fn from_hotkey(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|menu| menu.hotkey() == c)
    }

    /// Key of this page's row-count slider.
    pub fn row_count_key(self) -> &'static str {
        match self {
            Menu::Dashboard => "num_rows",
            Menu::DataSiswa => "num_rows_siswa",
            Menu::DataMath => "num_rows_math",
            Menu::DataReading => "num_rows_read",
            Menu::DataWriting => "num_rows_write",
        }
    }
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl From<StartPage> for Menu {
    fn from(page: StartPage) -> Self {
        match page {
            StartPage::Dashboard => Menu::Dashboard,
            StartPage::DataSiswa => Menu::DataSiswa,
            StartPage::DataMath => Menu::DataMath,
            StartPage::DataReading => Menu::DataReading,
            StartPage::DataWriting => Menu::DataWriting,
        }
    }
}

pub const ACTIVE_MENU: &str = "active_menu";

/// A value held under a state key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateValue {
    Menu(Menu),
    Count(usize),
    Text(String),
}

/// Key-value UI state with lazy defaults.
#[derive(Debug, Clone)]
pub struct SessionState {
    values: HashMap<String, StateValue>,
    default_menu: Menu,
    default_rows: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Menu::Dashboard, DEFAULT_ROW_COUNT)
    }
}

impl SessionState {
    /// `default_menu` and `default_rows` are used when the keys are first read.
    pub fn new(default_menu: Menu, default_rows: usize) -> Self {
        Self {
            values: HashMap::new(),
            default_menu,
            default_rows: default_rows.max(1),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Value under `key`, inserting `default()` first if the key is new.
    pub fn get_or_init(&mut self, key: &str, default: impl FnOnce() -> StateValue) -> &StateValue {
        self.values.entry(key.to_string()).or_insert_with(default)
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: &str, value: StateValue) {
        debug!(key, ?value, "session update");
        self.values.insert(key.to_string(), value);
    }

    pub fn active_menu(&mut self) -> Menu {
        let default = self.default_menu;
        match self.get_or_init(ACTIVE_MENU, || StateValue::Menu(default)) {
            StateValue::Menu(menu) => *menu,
            _ => default,
        }
    }

    pub fn set_active_menu(&mut self, menu: Menu) {
        self.set(ACTIVE_MENU, StateValue::Menu(menu));
    }

    /// Row count for `menu`, clamped into `[1, total_rows]` and written back.
    pub fn row_count(&mut self, menu: Menu, total_rows: usize) -> usize {
        let default = self.default_rows;
        let stored = match self.get_or_init(menu.row_count_key(), || StateValue::Count(default)) {
            StateValue::Count(n) => *n,
            _ => default,
        };
        let clamped = clamp_rows(stored, total_rows);
        if clamped != stored {
            self.values
                .insert(menu.row_count_key().to_string(), StateValue::Count(clamped));
        }
        clamped
    }

    /// Slider action: set the row count for `menu`, clamped into `[1, total_rows]`.
    pub fn set_row_count(&mut self, menu: Menu, requested: usize, total_rows: usize) -> usize {
        let clamped = clamp_rows(requested, total_rows);
        self.set(menu.row_count_key(), StateValue::Count(clamped));
        clamped
    }

    /// Slider action by a signed step.
    pub fn step_row_count(&mut self, menu: Menu, delta: isize, total_rows: usize) -> usize {
        let current = self.row_count(menu, total_rows);
        let requested = current.saturating_add_signed(delta);
        self.set_row_count(menu, requested, total_rows)
    }

    /// Selected text under `key` if it is one of `options`; otherwise `options[default_index]`
    /// (or the first option) is stored and returned. `None` when `options` is empty.
    pub fn selection(&mut self, key: &str, options: &[String], default_index: usize) -> Option<String> {
        let fallback = options.get(default_index).or_else(|| options.first())?.clone();
        let current = match self.get_or_init(key, || StateValue::Text(fallback.clone())) {
            StateValue::Text(text) => Some(text.clone()),
            _ => None,
        };
        match current {
            Some(text) if options.contains(&text) => Some(text),
            _ => {
                self.values
                    .insert(key.to_string(), StateValue::Text(fallback.clone()));
                Some(fallback)
            }
        }
    }

    pub fn set_selection(&mut self, key: &str, value: String) {
        self.set(key, StateValue::Text(value));
    }
}

fn clamp_rows(requested: usize, total_rows: usize) -> usize {
    requested.clamp(1, total_rows.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_created_on_first_read() {
        let mut session = SessionState::default();
        assert!(!session.contains(ACTIVE_MENU));
        assert_eq!(session.active_menu(), Menu::Dashboard);
        assert!(session.contains(ACTIVE_MENU));
        assert_eq!(session.row_count(Menu::DataMath, 100), DEFAULT_ROW_COUNT);
        assert_eq!(
            session.get("num_rows_math"),
            Some(&StateValue::Count(DEFAULT_ROW_COUNT))
        );
    }

    #[test]
    fn navigation_overwrites_active_menu() {
        let mut session = SessionState::new(Menu::DataReading, 5);
        assert_eq!(session.active_menu(), Menu::DataReading);
        session.set_active_menu(Menu::DataSiswa);
        assert_eq!(session.active_menu(), Menu::DataSiswa);
        session.set_active_menu(Menu::DataSiswa);
        assert_eq!(session.active_menu(), Menu::DataSiswa);
    }

    #[test]
    fn row_count_stays_within_table_bounds() {
        let mut session = SessionState::default();
        for requested in [0, 1, 3, 10, 11, usize::MAX] {
            let n = session.set_row_count(Menu::Dashboard, requested, 10);
            assert!((1..=10).contains(&n), "{} -> {}", requested, n);
        }
        assert_eq!(session.set_row_count(Menu::Dashboard, 0, 10), 1);
        assert_eq!(session.set_row_count(Menu::Dashboard, 99, 10), 10);
        // A smaller table on the next render pulls the stored value down.
        assert_eq!(session.row_count(Menu::Dashboard, 4), 4);
    }

    #[test]
    fn row_counts_are_per_page() {
        let mut session = SessionState::default();
        session.set_row_count(Menu::DataMath, 8, 20);
        assert_eq!(session.row_count(Menu::DataMath, 20), 8);
        assert_eq!(session.row_count(Menu::DataWriting, 20), 5);
    }

    #[test]
    fn step_row_count_saturates() {
        let mut session = SessionState::default();
        assert_eq!(session.step_row_count(Menu::Dashboard, -10, 50), 1);
        assert_eq!(session.step_row_count(Menu::Dashboard, 100, 50), 50);
        assert_eq!(session.step_row_count(Menu::Dashboard, -1, 50), 49);
    }

    #[test]
    fn selection_falls_back_when_not_in_domain() {
        let mut session = SessionState::default();
        let options: Vec<String> = vec!["math score".into(), "reading score".into()];
        assert_eq!(
            session.selection("scatter_y_axis", &options, 1).as_deref(),
            Some("reading score")
        );
        session.set_selection("scatter_y_axis", "writing score".into());
        assert_eq!(
            session.selection("scatter_y_axis", &options, 1).as_deref(),
            Some("reading score")
        );
        assert_eq!(session.selection("box_x", &[], 0), None);
    }

    #[test]
    fn menu_keys_round_trip() {
        for menu in Menu::ALL {
            assert_eq!(Menu::from_key(menu.key()), Some(menu));
            assert_eq!(Menu::from_hotkey(menu.hotkey()), Some(menu));
        }
        assert_eq!(Menu::from_key("settings"), None);
        assert_eq!(Menu::from(StartPage::DataWriting), Menu::DataWriting);
    }
}
