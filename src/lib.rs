//! cityweather library
//!
//! Fetch, format and store current weather readings. The binary's console
//! and window front ends are thin adapters over these modules, which are
//! also exposed for integration tests.

pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod console;
pub mod data;
pub mod format;
pub mod history;
pub mod logging;
pub mod ui;
pub mod units;

#[cfg(test)]
pub(crate) mod test_support;
