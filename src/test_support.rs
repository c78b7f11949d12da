//! Shared fixtures for unit tests

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::data::{FetchError, WeatherReading, WeatherSource};

/// Synthetic payload: 20.0°C, 5 m/s wind from 90°, UTC+1
pub const SAMPLE_PAYLOAD: &str = r#"{
    "coord": {"lon": 12.3456789, "lat": -45.6789012},
    "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
    "main": {"temp": 20.0, "feels_like": 19.5, "temp_min": 18.3, "temp_max": 21.7, "pressure": 1012, "humidity": 81},
    "visibility": 8500,
    "wind": {"speed": 5.0, "deg": 90},
    "clouds": {"all": 40},
    "sys": {"country": "TV", "sunrise": 1721016000, "sunset": 1721070000},
    "timezone": 3600,
    "name": "Testville"
}"#;

/// The reading described by [`SAMPLE_PAYLOAD`]
pub fn sample_reading() -> WeatherReading {
    serde_json::from_str(SAMPLE_PAYLOAD).expect("sample payload should parse")
}

/// A reading for the given city, otherwise identical to the sample
pub fn reading_for(city: &str) -> WeatherReading {
    WeatherReading {
        city: city.to_string(),
        ..sample_reading()
    }
}

/// Source that replays queued results in order
///
/// Once the queue is empty every call fails with `FetchError::Unexpected`.
#[derive(Default)]
pub struct ScriptedSource {
    results: RefCell<VecDeque<Result<WeatherReading, FetchError>>>,
    pub requested: RefCell<Vec<String>>,
}

impl ScriptedSource {
    pub fn new(results: Vec<Result<WeatherReading, FetchError>>) -> Self {
        Self {
            results: RefCell::new(results.into()),
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl WeatherSource for ScriptedSource {
    async fn current_weather(&self, city: &str) -> Result<WeatherReading, FetchError> {
        self.requested.borrow_mut().push(city.to_string());
        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Unexpected("no scripted result".to_string())))
    }
}
