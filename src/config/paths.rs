//! Cross-platform application paths using the `dirs` crate.
//!
//! Config dir (settings + history):
//!   Windows: %APPDATA%\voice-practice\
//!   macOS:   ~/Library/Application Support/voice-practice/
//!   Linux:   ~/.config/voice-practice/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and `history.json`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Full path to `history.json`.
    pub history_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "voice-practice";

    /// Resolves all paths using the `dirs` crate, falling back to the
    /// current directory when the platform has no config directory.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);
        Self::in_dir(config_dir)
    }

    /// Lay the files out under an explicit directory.
    pub fn in_dir(config_dir: PathBuf) -> Self {
        let settings_file = config_dir.join("settings.toml");
        let history_file = config_dir.join("history.json");
        Self {
            config_dir,
            settings_file,
            history_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
