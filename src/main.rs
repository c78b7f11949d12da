//! cityweather - Current weather for any city
//!
//! Runs one of the front ends: the interactive console prompt, a one-shot
//! lookup, the history listing, or the terminal window.

use std::io;
use std::panic;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use cityweather::app::App;
use cityweather::cli::{Cli, Mode, StartupConfig};
use cityweather::config::{FileConfig, Settings};
use cityweather::console;
use cityweather::data::WeatherClient;
use cityweather::history::HistoryStore;
use cityweather::logging::{self, LogTarget};
use cityweather::ui;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Runs the terminal window until the user quits
async fn run_window(
    client: &WeatherClient,
    store: &HistoryStore,
    mut app: App,
) -> Result<(), Box<dyn std::error::Error>> {
    setup_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = async {
        loop {
            terminal.draw(|f| ui::render(f, &app))?;

            if app.fetch_requested {
                // The fetching message is on screen; the loop blocks until done
                app.fetch(client, store).await;
                continue;
            }

            // Poll for keyboard events with 100ms timeout
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    app.handle_key(key);
                }
            }

            if app.should_quit {
                break;
            }
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    }
    .await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

/// Builds the HTTP client; fails if no API key is configured
fn weather_client(settings: &Settings) -> Result<WeatherClient, Box<dyn std::error::Error>> {
    Ok(WeatherClient::new(settings.client_config()?)?)
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let startup = StartupConfig::from_cli(&cli)?;

    let target = match startup.mode {
        Mode::Window { .. } => LogTarget::cache_file(),
        _ => LogTarget::Stderr,
    };
    logging::init(cli.verbose, target);

    let file_config = FileConfig::load(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, &startup, file_config)?;
    let store = settings.history_store();
    tracing::debug!(history = %store.path().display(), unit = ?settings.unit, "settings resolved");

    match startup.mode {
        Mode::ShowHistory => {
            // Listing needs no API key
            console::print_history(&store, settings.unit, io::stdout().lock())?;
        }
        Mode::Interactive => {
            let client = weather_client(&settings)?;
            console::run_interactive(
                &client,
                &store,
                settings.unit,
                io::stdin().lock(),
                io::stdout(),
            )
            .await?;
        }
        Mode::OneShot { city, save } => {
            let client = weather_client(&settings)?;
            console::run_once(&client, &store, &city, settings.unit, save, io::stdout()).await?;
        }
        Mode::Window { initial_city } => {
            let client = weather_client(&settings)?;
            let app = App::new(settings.unit, settings.window).with_initial_city(initial_city);
            run_window(&client, &store, app).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
