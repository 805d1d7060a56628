use crate::error::SkycastError;
use crate::logic::{WeatherReport, WeatherService};
use crate::models::{DayBoundary, Units};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Today,
    Forecast,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' | 't' | 'T' => Some(Screen::Today),
            '2' | 'f' | 'F' => Some(Screen::Forecast),
            _ => None,
        }
    }
}

pub struct SearchState {
    pub editing: bool,
    pub buffer: String,
    pub cursor: usize, // in chars
}

impl SearchState {
    pub fn new(initial: &str) -> Self {
        Self {
            editing: false,
            buffer: initial.to_string(),
            cursor: initial.chars().count(),
        }
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
        self.cursor = self.buffer.chars().count();
    }

    pub fn cancel_editing(&mut self, current_city: &str) {
        self.editing = false;
        self.buffer = current_city.to_string();
        self.cursor = self.buffer.chars().count();
    }

    pub fn finish_editing(&mut self) -> String {
        self.editing = false;
        self.buffer.clone()
    }

    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index();
        self.buffer.insert(idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index();
        self.buffer.remove(idx);
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
    }

    fn byte_index(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }
}

pub struct ForecastState {
    pub selected_index: usize,
}

impl ForecastState {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }
}

/// A city lookup waiting for the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    pub city: String,
    /// Submitted searches are remembered; the startup load is not
    pub remember: bool,
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub units: Units,
    pub day_boundary: DayBoundary,

    // Data
    pub city: String,
    pub report: Option<WeatherReport>,

    // Screen states
    pub search_state: SearchState,
    pub forecast_state: ForecastState,

    // UI state
    pub status_message: Option<String>,
    pub error_message: Option<String>,
    pub loading: bool,
    pub pending: Option<PendingLoad>,
}

impl App {
    pub fn new(units: Units, day_boundary: DayBoundary, initial_city: &str) -> Self {
        Self {
            screen: Screen::Today,
            should_quit: false,
            units,
            day_boundary,
            city: initial_city.to_string(),
            report: None,
            search_state: SearchState::new(initial_city),
            forecast_state: ForecastState::new(),
            status_message: None,
            error_message: None,
            loading: false,
            pending: None,
        }
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn show_error(&mut self, message: &str) {
        self.error_message = Some(message.to_string());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Queue a load of `city` without remembering it
    pub fn request_load(&mut self, city: &str) {
        self.queue(PendingLoad {
            city: city.to_string(),
            remember: false,
        });
    }

    /// Reload the city currently on screen
    pub fn request_refresh(&mut self) {
        let city = self.city.clone();
        self.request_load(&city);
    }

    /// Submit the search box. Blank input shows an error and fetches nothing.
    pub fn submit_search(&mut self) {
        let input = self.search_state.finish_editing();
        match WeatherService::validate_city(&input) {
            Ok(city) => self.queue(PendingLoad {
                city,
                remember: true,
            }),
            Err(e) => self.show_error(&e.user_message()),
        }
    }

    fn queue(&mut self, pending: PendingLoad) {
        self.clear_error();
        self.loading = true;
        self.set_status(&format!("Loading {}...", pending.city));
        self.pending = Some(pending);
    }

    pub fn take_pending(&mut self) -> Option<PendingLoad> {
        self.pending.take()
    }

    pub fn apply_report(&mut self, report: WeatherReport) {
        self.loading = false;
        self.clear_error();
        if let Some(city) = report.city() {
            self.city = city.to_string();
        }
        self.search_state.cancel_editing(&self.city);
        self.forecast_state = ForecastState::new();
        match report.missing_part() {
            Some(part) => self.set_status(&format!(
                "Updated {}; {} unavailable",
                report.display_name(),
                part
            )),
            None => self.set_status(&format!("Updated {}", report.display_name())),
        }
        self.report = Some(report);
    }

    pub fn apply_error(&mut self, err: &SkycastError) {
        self.loading = false;
        self.status_message = None;
        self.show_error(&err.user_message());
    }

    pub fn forecast_len(&self) -> usize {
        self.report
            .as_ref()
            .and_then(|r| r.forecast.as_ref())
            .map(|f| f.daily.len())
            .unwrap_or(0)
    }
}
