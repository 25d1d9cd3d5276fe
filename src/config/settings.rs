//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::compare::report::{
    DEFAULT_MAX_LISTED_ERRORS, DEFAULT_SUCCESS_THRESHOLD, DEFAULT_WARNING_THRESHOLD,
};

/// Shortest accepted recording duration, in seconds.
pub const MIN_DURATION_SECS: u32 = 1;
/// Longest accepted recording duration, in seconds.
pub const MAX_DURATION_SECS: u32 = 300;

/// Speech languages offered to the user: `(code, label)`.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
];

/// Human label for a language code; unknown codes are returned unchanged.
///
/// ```
/// use voice_practice::config::language_label;
///
/// assert_eq!(language_label("fr"), "French");
/// assert_eq!(language_label("xx"), "xx");
/// ```
pub fn language_label(code: &str) -> &str {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

// ---------------------------------------------------------------------------
// PracticeConfig
// ---------------------------------------------------------------------------

/// Recording and language settings for practice sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeConfig {
    /// Default recording length in seconds (1 – 300).
    pub duration_secs: u32,
    /// Speech language as an ISO-639-1 code, passed to the transcriber.
    pub language: String,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            duration_secs: 15,
            language: "en".into(),
        }
    }
}

impl PracticeConfig {
    /// Parse a user-entered duration.  Values outside 1 – 300 seconds, or
    /// input that is not an integer, keep the current duration.
    pub fn validate_duration(&self, value: &str) -> u32 {
        match value.trim().parse::<u32>() {
            Ok(secs) if (MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&secs) => secs,
            _ => self.duration_secs,
        }
    }

    /// Label of the configured speech language.
    pub fn language_label(&self) -> &str {
        language_label(&self.language)
    }
}

// ---------------------------------------------------------------------------
// DisplayConfig
// ---------------------------------------------------------------------------

/// How comparison results are presented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Errors listed before the "... and N more" line.
    pub max_listed_errors: usize,
    /// Reference words shown in the highlighted text before truncation.
    pub max_display_words: usize,
    /// Accuracy percentage at or above which a result is shown as good.
    pub success_threshold: f64,
    /// Accuracy percentage at or above which a result is shown as fair.
    pub warning_threshold: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_listed_errors: DEFAULT_MAX_LISTED_ERRORS,
            max_display_words: 80,
            success_threshold: DEFAULT_SUCCESS_THRESHOLD,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
        }
    }
}

// ---------------------------------------------------------------------------
// SttConfig
// ---------------------------------------------------------------------------

/// External speech-to-text command.
///
/// `{audio}` and `{language}` in `args` are replaced with the clip path and
/// the speech language; the transcript is read from stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SttConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            command: "whisper-cli".into(),
            args: vec![
                "--no-prints".into(),
                "--no-timestamps".into(),
                "--language".into(),
                "{language}".into(),
                "--file".into(),
                "{audio}".into(),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// HistoryConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Record practice attempts in `history.json`.
    pub enabled: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use voice_practice::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub practice: PracticeConfig,
    pub display: DisplayConfig,
    pub stt: SttConfig,
    pub history: HistoryConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
