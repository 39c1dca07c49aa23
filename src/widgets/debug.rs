use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Paragraph, Widget},
};
use std::time::Duration;

#[derive(Default)]
pub struct DebugState {
    pub num_events: usize,
    pub num_frames: usize,
    pub num_key_events: usize,
    pub num_loads: usize,
    pub last_key_event_name: String,
    /// Last action taken (e.g. "next_page") for debugging key handling.
    pub last_action: String,
    pub last_load: Option<Duration>,
    pub enabled: bool,
}

impl DebugState {
    pub fn on_key(&mut self, event: &crossterm::event::KeyEvent) {
        self.num_key_events += 1;
        self.last_key_event_name = format!("{:?}", event.code);
    }

    pub fn on_load(&mut self, elapsed: Duration) {
        self.num_loads += 1;
        self.last_load = Some(elapsed);
    }
}

impl Widget for &DebugState {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let load = self
            .last_load
            .map(|d| format!("{:.1}ms", d.as_secs_f64() * 1000.0))
            .unwrap_or_else(|| "-".to_string());
        Paragraph::new(format!(
            "events={} keys={} last_key={} last_action={} frames={} loads={} load={}",
            self.num_events,
            self.num_key_events,
            self.last_key_event_name,
            self.last_action,
            self.num_frames,
            self.num_loads,
            load
        ))
        .render(area, buf);
    }
}
