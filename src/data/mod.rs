//! Core data model for a single weather reading
//!
//! A [`WeatherReading`] is a flat snapshot of conditions for one city. Its
//! serialized form is the OpenWeatherMap current-weather payload, so the same
//! type is used to decode API responses and to persist history entries.

pub mod weather;

pub use weather::{ClientConfig, FetchError, WeatherClient, WeatherSource};

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// One snapshot of weather conditions for a city at fetch time
///
/// Temperatures are Celsius and wind speed is metres per second, matching the
/// API's `units=metric` response.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    /// City name as reported by the API
    pub city: String,
    /// ISO 3166 country code, if reported
    pub country: Option<String>,
    /// Condition category, e.g. "Clouds"
    pub condition: String,
    /// Condition description, e.g. "scattered clouds"
    pub description: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: f64,
    /// Minimum observed temperature in Celsius
    pub temp_min: f64,
    /// Maximum observed temperature in Celsius
    pub temp_max: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure: u32,
    /// Wind speed in metres per second
    pub wind_speed: f64,
    /// Wind heading in degrees, if reported
    pub wind_deg: Option<f64>,
    /// Visibility in metres, if reported
    pub visibility: Option<u32>,
    /// Cloud cover percentage (0-100)
    pub clouds: u8,
    /// Sunrise as UTC epoch seconds
    pub sunrise: i64,
    /// Sunset as UTC epoch seconds
    pub sunset: i64,
    /// Offset from UTC in seconds
    pub timezone: i32,
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
    /// Payload fields not modelled above, written back when serialized
    pub extra: ExtraFields,
}

/// Errors turning a decoded payload into a reading
#[derive(Debug, Error)]
pub enum ReadingError {
    /// The payload's `weather` array was empty
    #[error("payload has no weather condition")]
    MissingCondition,
}

type Extra = Map<String, Value>;

/// Response fields a [`WeatherReading`] does not interpret
///
/// Things like `dt`, `rain`, `wind.gust`, condition icons and secondary
/// conditions. They are kept per payload object so a saved reading contains
/// the whole response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraFields {
    top: Extra,
    coord: Extra,
    condition: Extra,
    other_conditions: Vec<Condition>,
    main: Extra,
    wind: Extra,
    clouds: Extra,
    sys: Extra,
}

impl ExtraFields {
    /// True when the payload had nothing beyond the modelled fields
    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
            && self.coord.is_empty()
            && self.condition.is_empty()
            && self.other_conditions.is_empty()
            && self.main.is_empty()
            && self.wind.is_empty()
            && self.clouds.is_empty()
            && self.sys.is_empty()
    }

    /// Looks up an unmodelled top-level field, e.g. `dt`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.top.get(key)
    }
}

/// OpenWeatherMap current-weather payload
///
/// The wire form of [`WeatherReading`]. Each object captures the keys it
/// does not name in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Payload {
    coord: Coord,
    weather: Vec<Condition>,
    main: Main,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    visibility: Option<u32>,
    wind: Wind,
    clouds: Clouds,
    sys: Sys,
    timezone: i32,
    name: String,
    #[serde(flatten)]
    extra: Extra,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Coord {
    lon: f64,
    lat: f64,
    #[serde(flatten)]
    extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Condition {
    main: String,
    description: String,
    #[serde(flatten)]
    extra: Extra,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Main {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: u32,
    humidity: u8,
    #[serde(flatten)]
    extra: Extra,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Wind {
    speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deg: Option<f64>,
    #[serde(flatten)]
    extra: Extra,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Clouds {
    all: u8,
    #[serde(flatten)]
    extra: Extra,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Sys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
    #[serde(flatten)]
    extra: Extra,
}

impl WeatherReading {
    fn from_payload(payload: Payload) -> Result<Self, ReadingError> {
        // The API lists the primary condition first
        let mut conditions = payload.weather.into_iter();
        let condition = conditions.next().ok_or(ReadingError::MissingCondition)?;

        Ok(WeatherReading {
            city: payload.name,
            country: payload.sys.country,
            condition: condition.main,
            description: condition.description,
            temperature: payload.main.temp,
            feels_like: payload.main.feels_like,
            temp_min: payload.main.temp_min,
            temp_max: payload.main.temp_max,
            humidity: payload.main.humidity,
            pressure: payload.main.pressure,
            wind_speed: payload.wind.speed,
            wind_deg: payload.wind.deg,
            visibility: payload.visibility,
            clouds: payload.clouds.all,
            sunrise: payload.sys.sunrise,
            sunset: payload.sys.sunset,
            timezone: payload.timezone,
            latitude: payload.coord.lat,
            longitude: payload.coord.lon,
            extra: ExtraFields {
                top: payload.extra,
                coord: payload.coord.extra,
                condition: condition.extra,
                other_conditions: conditions.collect(),
                main: payload.main.extra,
                wind: payload.wind.extra,
                clouds: payload.clouds.extra,
                sys: payload.sys.extra,
            },
        })
    }

    fn to_payload(&self) -> Payload {
        let extra = self.extra.clone();
        let mut weather = vec![Condition {
            main: self.condition.clone(),
            description: self.description.clone(),
            extra: extra.condition,
        }];
        weather.extend(extra.other_conditions);

        Payload {
            coord: Coord {
                lon: self.longitude,
                lat: self.latitude,
                extra: extra.coord,
            },
            weather,
            main: Main {
                temp: self.temperature,
                feels_like: self.feels_like,
                temp_min: self.temp_min,
                temp_max: self.temp_max,
                pressure: self.pressure,
                humidity: self.humidity,
                extra: extra.main,
            },
            visibility: self.visibility,
            wind: Wind {
                speed: self.wind_speed,
                deg: self.wind_deg,
                extra: extra.wind,
            },
            clouds: Clouds {
                all: self.clouds,
                extra: extra.clouds,
            },
            sys: Sys {
                country: self.country.clone(),
                sunrise: self.sunrise,
                sunset: self.sunset,
                extra: extra.sys,
            },
            timezone: self.timezone,
            name: self.city.clone(),
            extra: extra.top,
        }
    }
}

impl Serialize for WeatherReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WeatherReading {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let payload = Payload::deserialize(deserializer)?;
        WeatherReading::from_payload(payload).map_err(de::Error::custom)
    }
}
