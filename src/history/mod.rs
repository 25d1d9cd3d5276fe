//! Practice and transcription history.
//!
//! [`HistoryManager`] buffers new entries in memory and appends them to a
//! JSON array on [`save`](HistoryManager::save):
//!
//! | Platform | Path |
//! |----------|------|
//! | Windows  | `%APPDATA%\voice-practice\history.json` |
//! | macOS    | `~/Library/Application Support/voice-practice/history.json` |
//! | Linux    | `~/.config/voice-practice/history.json` |

pub mod store;

pub use store::{HistoryEntry, HistoryError, HistoryManager, HistoryStats};
