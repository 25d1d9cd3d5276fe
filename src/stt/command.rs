//! [`Transcriber`] backed by an external speech-to-text program.
//!
//! The program and its arguments come from [`SttConfig`]; `{audio}` and
//! `{language}` placeholders are substituted per call and the transcript is
//! read from stdout.  Any CLI that prints plain text works (whisper.cpp's
//! `whisper-cli`, faster-whisper wrappers, ...).

use std::path::Path;
use std::process::Command;

use crate::config::SttConfig;
use crate::stt::engine::{TranscribeError, Transcriber};

const AUDIO_PLACEHOLDER: &str = "{audio}";
const LANGUAGE_PLACEHOLDER: &str = "{language}";

/// Runs a configured command once per clip.
#[derive(Debug, Clone)]
pub struct CommandTranscriber {
    program: String,
    args: Vec<String>,
}

impl CommandTranscriber {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &SttConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }

    /// Arguments with placeholders replaced for one invocation.
    fn render_args(&self, audio: &Path, language: &str) -> Vec<String> {
        let audio = audio.display().to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(AUDIO_PLACEHOLDER, &audio)
                    .replace(LANGUAGE_PLACEHOLDER, language)
            })
            .collect()
    }
}

impl Transcriber for CommandTranscriber {
    fn transcribe(&self, audio: &Path, language: &str) -> Result<String, TranscribeError> {
        if !audio.exists() {
            return Err(TranscribeError::AudioNotFound(audio.display().to_string()));
        }

        let args = self.render_args(audio, language);
        log::debug!("running transcriber: {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| TranscribeError::Spawn {
                command: self.program.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranscribeError::Failed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(TranscribeError::Empty);
        }
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
