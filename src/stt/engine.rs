//! Core transcriber trait and error type.
//!
//! # Overview
//!
//! [`Transcriber`] is the seam between practice sessions and whatever turns
//! a recorded clip into text.  It is object-safe and `Send + Sync` so it can
//! be held behind an `Arc<dyn Transcriber>` and called from the blocking
//! thread pool.
//!
//! [`MockTranscriber`] (available under `#[cfg(test)]`) returns a
//! pre-configured response without touching the filesystem.

use std::path::Path;

use thiserror::Error;

// ---------------------------------------------------------------------------
// TranscribeError
// ---------------------------------------------------------------------------

/// All errors that can arise while transcribing a clip.
#[derive(Debug, Clone, Error)]
pub enum TranscribeError {
    /// The audio clip does not exist.
    #[error("Audio file not found: {0}")]
    AudioNotFound(String),

    /// The external transcriber could not be started.
    #[error("Failed to start transcriber `{command}`: {reason}")]
    Spawn { command: String, reason: String },

    /// The transcriber ran but reported failure.
    #[error("Transcription failed: {0}")]
    Failed(String),

    /// The transcriber produced no text.
    #[error("Transcriber returned no text")]
    Empty,
}

// ---------------------------------------------------------------------------
// Transcriber trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for speech-to-text backends.
///
/// # Contract
///
/// - `audio` is the path of a recorded clip.
/// - `language` is an ISO-639-1 code such as `"en"`.
/// - Returns the transcript with surrounding whitespace trimmed.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: &Path, language: &str) -> Result<String, TranscribeError>;
}

// Compile-time assertion: Box<dyn Transcriber> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Transcriber>) {}
};

// ---------------------------------------------------------------------------
// MockTranscriber  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns a pre-configured response.
#[cfg(test)]
pub struct MockTranscriber {
    response: Result<String, TranscribeError>,
}

#[cfg(test)]
impl MockTranscriber {
    /// Create a mock that always returns `Ok(text)`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
        }
    }

    /// Create a mock that always returns `Err(error)`.
    pub fn err(error: TranscribeError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[cfg(test)]
impl Transcriber for MockTranscriber {
    fn transcribe(&self, _audio: &Path, _language: &str) -> Result<String, TranscribeError> {
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
