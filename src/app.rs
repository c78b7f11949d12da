//! Application state for the terminal window front end
//!
//! This module holds the window's form state (city input, unit toggle,
//! latest result), handles keyboard input and performs the lookup when the
//! user submits the form.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::WindowConfig;
use crate::data::{WeatherReading, WeatherSource};
use crate::format::{summary_lines, ReadingLine};
use crate::history::HistoryStore;
use crate::units::TemperatureUnit;

/// Message shown for any failure when detailed errors are off
pub const GENERIC_ERROR: &str = "City not found";

/// Longest city name the input box accepts
const MAX_CITY_LEN: usize = 64;

/// What the output panel is showing
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Nothing fetched yet
    Empty,
    /// A lookup is in progress
    Fetching(String),
    /// The latest successful reading
    Reading(Box<WeatherReading>),
    /// Input problem, e.g. an empty city
    Warning(String),
    /// The lookup failed
    Error(String),
}

/// Main application struct managing window state
pub struct App {
    /// Text in the city input box
    pub city_input: String,
    /// Selected unit
    pub unit: TemperatureUnit,
    /// Output panel contents
    pub output: Output,
    /// Result of the last history save, if saving is enabled
    pub save_status: Option<String>,
    /// Flag indicating a lookup has been requested
    pub fetch_requested: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Behaviour switches from the config file
    config: WindowConfig,
}

impl App {
    /// Creates a new App with an empty form
    pub fn new(unit: TemperatureUnit, config: WindowConfig) -> Self {
        Self {
            city_input: String::new(),
            unit,
            output: Output::Empty,
            save_status: None,
            fetch_requested: false,
            should_quit: false,
            config,
        }
    }

    /// Pre-fills the city box and requests a lookup
    pub fn with_initial_city(mut self, city: Option<String>) -> Self {
        if let Some(city) = city {
            self.city_input = city;
            self.submit();
        }
        self
    }

    /// Lines for the output panel in the currently selected unit
    pub fn reading_lines(&self) -> Option<Vec<ReadingLine>> {
        match &self.output {
            Output::Reading(reading) => Some(summary_lines(reading, self.unit)),
            _ => None,
        }
    }

    /// Handles keyboard input
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.kind == KeyEventKind::Release {
            return;
        }

        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            if key_event.code == KeyCode::Char('c') {
                self.should_quit = true;
            }
            return;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Enter => {
                self.submit();
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.unit = self.unit.toggled();
            }
            KeyCode::Backspace => {
                self.city_input.pop();
            }
            KeyCode::Char(c) => {
                if self.city_input.chars().count() < MAX_CITY_LEN {
                    self.city_input.push(c);
                }
            }
            _ => {}
        }
    }

    /// Validates the form and flags a lookup
    fn submit(&mut self) {
        if self.city_input.trim().is_empty() {
            self.output = Output::Warning("Please enter a city".to_string());
            return;
        }
        self.output = Output::Fetching(self.city_input.trim().to_string());
        self.fetch_requested = true;
    }

    /// Performs a requested lookup
    ///
    /// Saves the reading when history saving is enabled. Failures show the
    /// classified error only when detailed errors are enabled.
    pub async fn fetch<S: WeatherSource>(&mut self, source: &S, store: &HistoryStore) {
        if !self.fetch_requested {
            return;
        }
        self.fetch_requested = false;
        self.save_status = None;

        let city = self.city_input.trim().to_string();
        match source.current_weather(&city).await {
            Ok(reading) => {
                if self.config.save_history {
                    self.save_status = Some(match store.append(&reading) {
                        Ok(_) => format!("Saved to {}", store.path().display()),
                        Err(e) => {
                            tracing::warn!(error = %e, "failed to save reading");
                            format!("Could not save data: {}", e)
                        }
                    });
                }
                self.output = Output::Reading(Box::new(reading));
            }
            Err(e) => {
                tracing::warn!(city = %city, error = %e, "lookup failed");
                let message = if self.config.detailed_errors {
                    e.to_string()
                } else {
                    GENERIC_ERROR.to_string()
                };
                self.output = Output::Error(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FetchError;
    use crate::test_support::{sample_reading, ScriptedSource};
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn create_test_store() -> (HistoryStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = HistoryStore::new(temp_dir.path().join("weather_history.json"));
        (store, temp_dir)
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut app = App::new(TemperatureUnit::Celsius, WindowConfig::default());

        type_text(&mut app, "Londx");
        app.handle_key(key(KeyCode::Backspace));
        type_text(&mut app, "on");

        assert_eq!(app.city_input, "London");
    }

    #[test]
    fn test_input_length_is_capped() {
        let mut app = App::new(TemperatureUnit::Celsius, WindowConfig::default());

        type_text(&mut app, &"a".repeat(MAX_CITY_LEN + 10));

        assert_eq!(app.city_input.chars().count(), MAX_CITY_LEN);
    }

    #[test]
    fn test_tab_toggles_unit() {
        let mut app = App::new(TemperatureUnit::Celsius, WindowConfig::default());

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.unit, TemperatureUnit::Fahrenheit);

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.unit, TemperatureUnit::Celsius);
    }

    #[test]
    fn test_enter_with_empty_city_warns() {
        let mut app = App::new(TemperatureUnit::Celsius, WindowConfig::default());

        app.handle_key(key(KeyCode::Enter));

        assert!(!app.fetch_requested);
        assert_eq!(app.output, Output::Warning("Please enter a city".to_string()));
    }

    #[test]
    fn test_enter_requests_fetch() {
        let mut app = App::new(TemperatureUnit::Celsius, WindowConfig::default());
        type_text(&mut app, " Rome ");

        app.handle_key(key(KeyCode::Enter));

        assert!(app.fetch_requested);
        assert_eq!(app.output, Output::Fetching("Rome".to_string()));
    }

    #[test]
    fn test_initial_city_requests_fetch() {
        let app = App::new(TemperatureUnit::Celsius, WindowConfig::default())
            .with_initial_city(Some("Tokyo".to_string()));

        assert_eq!(app.city_input, "Tokyo");
        assert!(app.fetch_requested);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(TemperatureUnit::Celsius, WindowConfig::default());
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);

        let mut app = App::new(TemperatureUnit::Celsius, WindowConfig::default());
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert!(app.city_input.is_empty());
    }

    #[test]
    fn test_q_is_typed_not_quit() {
        let mut app = App::new(TemperatureUnit::Celsius, WindowConfig::default());

        type_text(&mut app, "Qingdao");

        assert!(!app.should_quit);
        assert_eq!(app.city_input, "Qingdao");
    }

    #[tokio::test]
    async fn test_fetch_success_shows_reading_without_saving_by_default() {
        let source = ScriptedSource::new(vec![Ok(sample_reading())]);
        let (store, _temp_dir) = create_test_store();
        let mut app = App::new(TemperatureUnit::Celsius, WindowConfig::default());
        type_text(&mut app, "Testville");
        app.handle_key(key(KeyCode::Enter));

        app.fetch(&source, &store).await;

        assert!(!app.fetch_requested);
        assert_eq!(app.output, Output::Reading(Box::new(sample_reading())));
        assert!(app.save_status.is_none());
        assert!(store.load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unit_toggle_rerenders_reading() {
        let source = ScriptedSource::new(vec![Ok(sample_reading())]);
        let (store, _temp_dir) = create_test_store();
        let mut app = App::new(TemperatureUnit::Celsius, WindowConfig::default())
            .with_initial_city(Some("Testville".to_string()));
        app.fetch(&source, &store).await;

        app.handle_key(key(KeyCode::Tab));

        let lines = app.reading_lines().expect("reading should be shown");
        let temp = lines.iter().find(|l| l.label == "Temperature").unwrap();
        assert_eq!(temp.value, "68.0°F");
    }

    #[tokio::test]
    async fn test_fetch_saves_when_enabled() {
        let source = ScriptedSource::new(vec![Ok(sample_reading())]);
        let (store, _temp_dir) = create_test_store();
        let config = WindowConfig {
            save_history: true,
            detailed_errors: false,
        };
        let mut app = App::new(TemperatureUnit::Celsius, config)
            .with_initial_city(Some("Testville".to_string()));

        app.fetch(&source, &store).await;

        assert!(app.save_status.as_deref().unwrap().starts_with("Saved to"));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_is_generic_by_default() {
        let source = ScriptedSource::new(vec![Err(FetchError::Timeout)]);
        let (store, _temp_dir) = create_test_store();
        let mut app = App::new(TemperatureUnit::Celsius, WindowConfig::default())
            .with_initial_city(Some("Nowhere".to_string()));

        app.fetch(&source, &store).await;

        assert_eq!(app.output, Output::Error("City not found".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_error_is_detailed_when_enabled() {
        let source = ScriptedSource::new(vec![Err(FetchError::Timeout)]);
        let (store, _temp_dir) = create_test_store();
        let config = WindowConfig {
            save_history: false,
            detailed_errors: true,
        };
        let mut app = App::new(TemperatureUnit::Celsius, config)
            .with_initial_city(Some("Nowhere".to_string()));

        app.fetch(&source, &store).await;

        assert_eq!(app.output, Output::Error("Request timed out".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_without_request_does_nothing() {
        let source = ScriptedSource::new(vec![Ok(sample_reading())]);
        let (store, _temp_dir) = create_test_store();
        let mut app = App::new(TemperatureUnit::Celsius, WindowConfig::default());

        app.fetch(&source, &store).await;

        assert!(source.requested.borrow().is_empty());
        assert_eq!(app.output, Output::Empty);
    }
}
