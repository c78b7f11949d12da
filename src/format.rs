//! Display formatting for weather readings
//!
//! Turns a [`WeatherReading`] into labelled, display-ready lines. Nothing here
//! prints; the console and window front ends decide how to show the lines.

use crate::clock::{format_gmt_offset, format_time};
use crate::data::WeatherReading;
use crate::units::{wind_speed, CompassDirection, TemperatureUnit};

/// Width of the `=` banner around a console report
const BANNER_WIDTH: usize = 50;

/// A single labelled line of a report, e.g. `Humidity: 81%`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingLine {
    pub label: &'static str,
    pub value: String,
}

impl ReadingLine {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

impl std::fmt::Display for ReadingLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Upper-cases the first letter of each alphabetic run and lower-cases the rest
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

fn temperature(celsius: f64, unit: TemperatureUnit) -> String {
    format!("{:.1}{}", unit.convert(celsius), unit.symbol())
}

fn location(reading: &WeatherReading) -> String {
    match &reading.country {
        Some(country) => format!("{}, {}", reading.city, country),
        None => reading.city.clone(),
    }
}

fn condition(reading: &WeatherReading) -> String {
    format!("{} ({})", reading.condition, title_case(&reading.description))
}

fn wind(reading: &WeatherReading, unit: TemperatureUnit) -> String {
    let speed = format!("{:.1} {}", wind_speed(reading.wind_speed, unit), unit.speed_label());
    match reading.wind_deg {
        Some(deg) => format!("{}, {}", speed, CompassDirection::from_degrees(deg).label()),
        None => speed,
    }
}

fn visibility(reading: &WeatherReading) -> String {
    match reading.visibility {
        Some(meters) => format!("{:.1} km", f64::from(meters) / 1000.0),
        None => "N/A".to_string(),
    }
}

/// Full report, in display order
///
/// Every temperature in the result uses `unit`.
pub fn report_lines(reading: &WeatherReading, unit: TemperatureUnit) -> Vec<ReadingLine> {
    vec![
        ReadingLine::new("Location", location(reading)),
        ReadingLine::new("Timezone", format_gmt_offset(reading.timezone)),
        ReadingLine::new("Weather", condition(reading)),
        ReadingLine::new("Temperature", temperature(reading.temperature, unit)),
        ReadingLine::new("Feels like", temperature(reading.feels_like, unit)),
        ReadingLine::new(
            "Min/Max",
            format!(
                "{} / {}",
                temperature(reading.temp_min, unit),
                temperature(reading.temp_max, unit)
            ),
        ),
        ReadingLine::new("Humidity", format!("{}%", reading.humidity)),
        ReadingLine::new("Pressure", format!("{} hPa", reading.pressure)),
        ReadingLine::new("Wind", wind(reading, unit)),
        ReadingLine::new("Visibility", visibility(reading)),
        ReadingLine::new("Sunrise", format_time(reading.sunrise, reading.timezone)),
        ReadingLine::new("Sunset", format_time(reading.sunset, reading.timezone)),
        ReadingLine::new("Cloudiness", format!("{}%", reading.clouds)),
        ReadingLine::new(
            "Coordinates",
            format!("{:.4}, {:.4}", reading.latitude, reading.longitude),
        ),
    ]
}

/// Compact subset shown in the window front end
pub fn summary_lines(reading: &WeatherReading, unit: TemperatureUnit) -> Vec<ReadingLine> {
    vec![
        ReadingLine::new("City", location(reading)),
        ReadingLine::new("Weather", title_case(&reading.description)),
        ReadingLine::new("Temperature", temperature(reading.temperature, unit)),
        ReadingLine::new("Feels like", temperature(reading.feels_like, unit)),
        ReadingLine::new("Humidity", format!("{}%", reading.humidity)),
        ReadingLine::new("Wind", wind(reading, unit)),
    ]
}

/// Renders the full report as console text, framed by `=` banners
pub fn render_report(reading: &WeatherReading, unit: TemperatureUnit) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut out = format!("{banner}\nWEATHER INFORMATION\n{banner}\n");
    for line in report_lines(reading, unit) {
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out.push_str(&banner);
    out.push('\n');
    out
}
