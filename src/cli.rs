//! Command-line interface parsing for cityweather
//!
//! This module handles parsing of CLI arguments using clap and turning them
//! into a [`StartupConfig`] that says which front end to run.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use thiserror::Error;

use crate::units::TemperatureUnit;

/// Error types for CLI argument parsing and user input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// The city name was empty or whitespace
    #[error("Please enter a valid city name.")]
    InvalidCityInput,

    /// The unit is not recognized
    #[error("Invalid unit: '{0}'. Valid units: c, celsius, f, fahrenheit")]
    InvalidUnit(String),

    /// Two front ends were requested at once
    #[error("--{0} cannot be combined with --{1}")]
    ConflictingModes(&'static str, &'static str),
}

/// cityweather - Current weather for any city
#[derive(Parser, Debug)]
#[command(name = "cityweather")]
#[command(about = "Current weather for any city, in the console or a terminal window")]
#[command(version)]
pub struct Cli {
    /// City to look up. Omit to start the interactive prompt.
    ///
    /// Examples:
    ///   cityweather                    # Interactive prompt
    ///   cityweather London             # Print London's weather and exit
    ///   cityweather Paris --units f    # Same, in Fahrenheit
    ///   cityweather --window Tokyo     # Terminal window, Tokyo pre-filled
    #[arg(value_name = "CITY")]
    pub city: Option<String>,

    /// Temperature unit: c or f
    #[arg(short, long, value_name = "UNIT")]
    pub units: Option<String>,

    /// Append a one-shot lookup to the history file
    #[arg(long)]
    pub save: bool,

    /// Open the terminal window instead of the console prompt
    #[arg(long)]
    pub window: bool,

    /// Print saved history and exit
    #[arg(long)]
    pub history: bool,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// History file location [default: weather_history.json]
    #[arg(long, value_name = "FILE")]
    pub history_file: Option<PathBuf>,

    /// Config file location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Weather endpoint URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Which front end to start
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Prompt for cities until the user quits
    #[default]
    Interactive,
    /// Look up one city, print it and exit
    OneShot { city: String, save: bool },
    /// Terminal window, optionally with a city pre-filled
    Window { initial_city: Option<String> },
    /// Print saved history and exit
    ShowHistory,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Front end to run
    pub mode: Mode,
    /// Unit given on the command line, if any
    pub unit: Option<TemperatureUnit>,
}

/// Validates a city name, returning it trimmed
pub fn validate_city(input: &str) -> Result<&str, CliError> {
    let city = input.trim();
    if city.is_empty() {
        Err(CliError::InvalidCityInput)
    } else {
        Ok(city)
    }
}

/// Parses a unit string argument into a TemperatureUnit.
///
/// # Returns
/// * `Ok(TemperatureUnit)` if the string names a unit
/// * `Err(CliError::InvalidUnit)` otherwise
pub fn parse_unit_arg(s: &str) -> Result<TemperatureUnit, CliError> {
    TemperatureUnit::parse(s).ok_or_else(|| CliError::InvalidUnit(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with the selected mode
    /// * `Err(CliError)` for an empty city, a bad unit or conflicting flags
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let unit = cli.units.as_deref().map(parse_unit_arg).transpose()?;
        let city = cli
            .city
            .as_deref()
            .map(|c| validate_city(c).map(str::to_string))
            .transpose()?;

        let mode = if cli.history {
            if cli.window {
                return Err(CliError::ConflictingModes("history", "window"));
            }
            if cli.save {
                return Err(CliError::ConflictingModes("history", "save"));
            }
            Mode::ShowHistory
        } else if cli.window {
            if cli.save {
                return Err(CliError::ConflictingModes("window", "save"));
            }
            Mode::Window { initial_city: city }
        } else {
            match city {
                Some(city) => Mode::OneShot {
                    city,
                    save: cli.save,
                },
                None => Mode::Interactive,
            }
        };

        Ok(StartupConfig { mode, unit })
    }
}
