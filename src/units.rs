//! Unit conversion for temperatures, wind speeds and wind headings
//!
//! Readings are always stored in the units the API returns for `units=metric`
//! (Celsius, metres per second). Everything here converts without rounding;
//! rounding is left to the display layer.

use serde::{Deserialize, Serialize};

/// Metres per second to kilometres per hour
const MPS_TO_KMH: f64 = 3.6;

/// Metres per second to miles per hour
const MPS_TO_MPH: f64 = 2.237;

/// Temperature unit selected by the user
///
/// The unit also decides how wind speed is shown: km/h alongside Celsius,
/// mph alongside Fahrenheit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Parses a unit from user input (`c`, `celsius`, `f`, `fahrenheit`)
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "c" | "celsius" => Some(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Some(TemperatureUnit::Fahrenheit),
            _ => None,
        }
    }

    /// Display symbol, e.g. `°C`
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Celsius",
            TemperatureUnit::Fahrenheit => "Fahrenheit",
        }
    }

    /// The other unit
    pub fn toggled(&self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    /// Converts a Celsius temperature into this unit
    pub fn convert(&self, celsius_value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius_value,
            TemperatureUnit::Fahrenheit => fahrenheit(celsius_value),
        }
    }

    /// Wind speed label paired with this unit
    pub fn speed_label(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "km/h",
            TemperatureUnit::Fahrenheit => "mph",
        }
    }
}

/// Celsius to Fahrenheit
pub fn fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Fahrenheit to Celsius
pub fn celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Converts a wind speed in m/s to km/h (Celsius) or mph (Fahrenheit)
pub fn wind_speed(meters_per_second: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => meters_per_second * MPS_TO_KMH,
        TemperatureUnit::Fahrenheit => meters_per_second * MPS_TO_MPH,
    }
}

/// One of the eight 45° compass octants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassDirection {
    /// Octants in clockwise order starting at 0°
    const ALL: [CompassDirection; 8] = [
        CompassDirection::North,
        CompassDirection::NorthEast,
        CompassDirection::East,
        CompassDirection::SouthEast,
        CompassDirection::South,
        CompassDirection::SouthWest,
        CompassDirection::West,
        CompassDirection::NorthWest,
    ];

    /// Maps a heading to the nearest octant
    ///
    /// The heading is reduced modulo 360 first, so 360° and -45° are valid.
    /// Halfway headings round away from zero: 22.5° is North-East and 112.5°
    /// is South-East, where half-to-even rounding would give North and East.
    pub fn from_degrees(degrees: f64) -> Self {
        let heading = degrees.rem_euclid(360.0);
        let index = (heading / 45.0).round() as usize % 8;
        Self::ALL[index]
    }

    /// Display label, e.g. `North-East`
    pub fn label(&self) -> &'static str {
        match self {
            CompassDirection::North => "North",
            CompassDirection::NorthEast => "North-East",
            CompassDirection::East => "East",
            CompassDirection::SouthEast => "South-East",
            CompassDirection::South => "South",
            CompassDirection::SouthWest => "South-West",
            CompassDirection::West => "West",
            CompassDirection::NorthWest => "North-West",
        }
    }
}
