//! Console front end
//!
//! The interactive loop prompts for a city and a unit, prints the report and
//! offers to save it. One-shot lookups and the history listing share the
//! same output style. All functions write to a caller-supplied writer so the
//! flows can be driven from tests.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::cli::validate_city;
use crate::data::{FetchError, WeatherSource};
use crate::format::render_report;
use crate::history::{HistoryError, HistoryStore};
use crate::units::TemperatureUnit;

/// Errors that end a one-shot lookup
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Prints `message` and reads one trimmed line; `None` on end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> io::Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Maps the unit prompt answer; blank keeps the configured default
fn unit_choice(answer: &str, default: TemperatureUnit) -> TemperatureUnit {
    if answer.is_empty() {
        default
    } else if answer.eq_ignore_ascii_case("f") {
        TemperatureUnit::Fahrenheit
    } else {
        TemperatureUnit::Celsius
    }
}

fn is_yes(answer: Option<&str>) -> bool {
    answer.is_some_and(|a| a.eq_ignore_ascii_case("y"))
}

/// Runs the interactive prompt until the user quits or input ends
///
/// Fetch and save failures are reported and the loop continues.
pub async fn run_interactive<S, R, W>(
    source: &S,
    store: &HistoryStore,
    default_unit: TemperatureUnit,
    mut input: R,
    mut out: W,
) -> io::Result<()>
where
    S: WeatherSource,
    R: BufRead,
    W: Write,
{
    writeln!(out, "WEATHER APPLICATION")?;
    writeln!(out, "{}", "-".repeat(30))?;

    loop {
        let Some(answer) = prompt(&mut input, &mut out, "\nEnter city name (or 'quit' to exit): ")? else {
            writeln!(out, "\nGoodbye!")?;
            break;
        };

        if answer.eq_ignore_ascii_case("quit") {
            writeln!(out, "Goodbye!")?;
            break;
        }

        let city = match validate_city(&answer) {
            Ok(city) => city.to_string(),
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        let unit_answer = prompt(
            &mut input,
            &mut out,
            "Temperature in (C)elsius or (F)ahrenheit? [C/F]: ",
        )?
        .unwrap_or_default();
        let unit = unit_choice(&unit_answer, default_unit);

        writeln!(out, "Fetching weather data for {}...", city)?;
        match source.current_weather(&city).await {
            Ok(reading) => {
                write!(out, "\n{}", render_report(&reading, unit))?;

                let save = prompt(&mut input, &mut out, "\nSave this weather data? (y/n): ")?;
                if is_yes(save.as_deref()) {
                    match store.append(&reading) {
                        Ok(_) => writeln!(out, "Weather data saved to {}", store.path().display())?,
                        Err(e) => {
                            tracing::warn!(error = %e, "failed to save reading");
                            writeln!(out, "Could not save data: {}", e)?
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!(city = %city, error = %e, "lookup failed");
                writeln!(out, "{}", e)?;
            }
        }

        let another = prompt(&mut input, &mut out, "\nCheck another city? (y/n): ")?;
        if !is_yes(another.as_deref()) {
            writeln!(out, "Thank you for using the Weather App!")?;
            break;
        }
    }

    Ok(())
}

/// Looks up one city, prints the report and optionally saves it
///
/// A failed save is reported as an error after the report has been printed.
pub async fn run_once<S, W>(
    source: &S,
    store: &HistoryStore,
    city: &str,
    unit: TemperatureUnit,
    save: bool,
    mut out: W,
) -> Result<(), LookupError>
where
    S: WeatherSource,
    W: Write,
{
    let reading = source.current_weather(city).await?;
    write!(out, "{}", render_report(&reading, unit))?;

    if save {
        store.append(&reading)?;
        writeln!(out, "Weather data saved to {}", store.path().display())?;
    }
    Ok(())
}

/// Prints saved entries, oldest first
pub fn print_history<W: Write>(store: &HistoryStore, unit: TemperatureUnit, mut out: W) -> Result<(), LookupError> {
    let entries = store.load()?;
    if entries.is_empty() {
        writeln!(out, "No saved weather data in {}", store.path().display())?;
        return Ok(());
    }

    for entry in &entries {
        writeln!(
            out,
            "{}  {:<20} {:>8.1}{}  {}",
            entry.timestamp().format("%Y-%m-%d %H:%M:%S"),
            entry.reading().city,
            unit.convert(entry.reading().temperature),
            unit.symbol(),
            entry.reading().description,
        )?;
    }
    Ok(())
}
