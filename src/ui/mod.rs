//! UI rendering module for the terminal window front end
//!
//! This module contains the rendering logic for the weather window, using
//! the ratatui library for TUI components.

pub mod weather_window;

pub use weather_window::render;
