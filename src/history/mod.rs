//! History module for persisting saved readings to disk
//!
//! This module provides a store that keeps the most recent readings the user
//! chose to save in a single JSON file. The whole file is read and rewritten
//! on every save, which is fine for a ten-entry cap.

mod store;

pub use store::{HistoryEntry, HistoryError, HistoryStore, DEFAULT_HISTORY_FILE, MAX_ENTRIES};
