//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence; otherwise the level follows the `-v` count.
//! The window front end owns the terminal, so its logs go to a file in the
//! cache directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Disabled,
}

impl LogTarget {
    /// File target in the XDG cache dir, or `Disabled` if there is none
    pub fn cache_file() -> Self {
        ProjectDirs::from("", "", "cityweather")
            .map(|dirs| LogTarget::File(dirs.cache_dir().join("cityweather.log")))
            .unwrap_or(LogTarget::Disabled)
    }
}

/// Default filter directive for a `-v` count
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Installs the global subscriber; later calls are ignored
pub fn init(verbosity: u8, target: LogTarget) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => {
                    let _ = tracing_subscriber::fmt()
                        .with_env_filter(filter)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file))
                        .try_init();
                }
                Err(e) => eprintln!("Logging disabled: cannot open {}: {}", path.display(), e),
            }
        }
        LogTarget::Disabled => {}
    }
}
