//! Configuration module for Voice Practice.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each subsystem,
//! `AppPaths` for cross-platform data directories, and TOML persistence via
//! `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    language_label, AppConfig, DisplayConfig, HistoryConfig, PracticeConfig, SttConfig,
    MAX_DURATION_SECS, MIN_DURATION_SECS, SUPPORTED_LANGUAGES,
};
