//! Practice attempt orchestration: transcribe → compare → record.
//!
//! # Flow
//!
//! ```text
//! attempt(title, page, clip)
//!   └─▶ spawn_blocking(transcriber.transcribe)     [blocking pool]
//!         ├─ Err / join failure → PracticeError
//!         ├─ blank transcript   → PracticeError::NoSpeech
//!         └─ Ok(text)
//!               └─▶ TextComparator::compare(page.text, text)
//!                     └─▶ history.add_entry("[Practice: … P1-2] text")
//! ```
//!
//! [`PracticeSession::dictate`] is the same flow without a page: the plain
//! transcript is recorded as-is.
//!
//! The transcriber runs on `tokio::task::spawn_blocking` so a slow external
//! recogniser never stalls the runtime.  Comparison itself is pure and runs
//! inline.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::compare::{ComparisonResult, TextComparator};
use crate::config::PracticeConfig;
use crate::history::{HistoryError, HistoryManager};
use crate::stt::{TranscribeError, Transcriber};

use super::paragraphs::{practice_label, Page};

// ---------------------------------------------------------------------------
// PracticeError
// ---------------------------------------------------------------------------

/// Reasons a practice attempt produced no comparison.
#[derive(Debug, Error)]
pub enum PracticeError {
    #[error(transparent)]
    Transcribe(#[from] TranscribeError),

    /// The transcriber succeeded but heard nothing.
    #[error("No speech detected, try recording again")]
    NoSpeech,

    /// The blocking transcription task panicked or was cancelled.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    History(#[from] HistoryError),
}

// ---------------------------------------------------------------------------
// Attempt
// ---------------------------------------------------------------------------

/// Outcome of one successful practice attempt.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub transcript: String,
    pub result: ComparisonResult,
    /// Text recorded in history for this attempt.
    pub label: String,
}

// ---------------------------------------------------------------------------
// PracticeSession
// ---------------------------------------------------------------------------

/// Runs practice attempts and dictations against one transcriber,
/// optionally recording each one in history.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use voice_practice::config::AppConfig;
/// use voice_practice::practice::{group_pages, split_into_paragraphs, PracticeSession};
/// use voice_practice::stt::CommandTranscriber;
///
/// # async fn example() {
/// let config = AppConfig::default();
/// let stt = Arc::new(CommandTranscriber::from_config(&config.stt));
/// let mut session = PracticeSession::new(stt, &config.practice);
///
/// let pages = group_pages(&split_into_paragraphs("One. Two. Three."), 2);
/// let attempt = session
///     .attempt("Lesson 1", &pages[0], "clip.wav".into())
///     .await
///     .unwrap();
/// println!("{:.0}%", attempt.result.accuracy * 100.0);
/// # }
/// ```
pub struct PracticeSession {
    transcriber: Arc<dyn Transcriber>,
    comparator: TextComparator,
    history: Option<HistoryManager>,
    language: String,
    duration_secs: u32,
}

impl PracticeSession {
    /// Create a session that does not record history.
    pub fn new(transcriber: Arc<dyn Transcriber>, config: &PracticeConfig) -> Self {
        Self {
            transcriber,
            comparator: TextComparator::new(),
            history: None,
            language: config.language.clone(),
            duration_secs: config.duration_secs,
        }
    }

    /// Record every successful attempt in `history`.
    pub fn with_history(mut self, history: HistoryManager) -> Self {
        self.history = Some(history);
        self
    }

    /// Recording length stored with history entries.
    pub fn set_duration(&mut self, duration_secs: u32) {
        self.duration_secs = duration_secs;
    }

    pub fn history(&self) -> Option<&HistoryManager> {
        self.history.as_ref()
    }

    /// Transcribe `audio`, grade it against `page`, and queue a history
    /// entry labelled with `title` and the page range.
    pub async fn attempt(
        &mut self,
        title: &str,
        page: &Page,
        audio: PathBuf,
    ) -> Result<Attempt, PracticeError> {
        let transcript = self.transcribe(audio).await?;
        log::debug!("practice: transcript = {:?}", transcript);

        let result = self.comparator.compare(&page.text, &transcript);
        log::info!(
            "practice {} {}: {}/{} words correct",
            title,
            page.range_label(),
            result.correct_count,
            result.total_count
        );

        let label = practice_label(title, page, &transcript);
        if let Some(history) = self.history.as_mut() {
            history.add_entry(&self.language, self.duration_secs, &label);
        }

        Ok(Attempt {
            transcript,
            result,
            label,
        })
    }

    /// Transcribe `audio` and queue the plain transcript in history.
    pub async fn dictate(&mut self, audio: PathBuf) -> Result<String, PracticeError> {
        let transcript = self.transcribe(audio).await?;
        log::info!("dictation: {} words", transcript.split_whitespace().count());

        if let Some(history) = self.history.as_mut() {
            history.add_entry(&self.language, self.duration_secs, &transcript);
        }
        Ok(transcript)
    }

    /// Run the transcriber on the blocking pool; blank output is `NoSpeech`.
    async fn transcribe(&self, audio: PathBuf) -> Result<String, PracticeError> {
        let transcriber = Arc::clone(&self.transcriber);
        let language = self.language.clone();

        let transcript = tokio::task::spawn_blocking(move || {
            transcriber.transcribe(&audio, &language)
        })
        .await
        .map_err(|e| PracticeError::Internal(e.to_string()))??;

        if transcript.trim().is_empty() {
            return Err(PracticeError::NoSpeech);
        }
        Ok(transcript)
    }

    /// Flush queued history entries to disk.  A session without history
    /// succeeds trivially.
    pub fn save_history(&mut self) -> Result<(), PracticeError> {
        if let Some(history) = self.history.as_mut() {
            history.save()?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::practice::{group_pages, split_into_paragraphs};
    use crate::stt::MockTranscriber;
    use tempfile::tempdir;

    fn first_page(text: &str) -> Page {
        group_pages(&split_into_paragraphs(text), 2).remove(0)
    }

    fn session_with(transcriber: MockTranscriber) -> PracticeSession {
        PracticeSession::new(Arc::new(transcriber), &PracticeConfig::default())
    }

    #[tokio::test]
    async fn attempt_compares_transcript_with_page() {
        let mut session = session_with(MockTranscriber::ok("the cat sat"));
        let page = first_page("The cat sat down.");

        let attempt = session
            .attempt("Cats", &page, "clip.wav".into())
            .await
            .expect("attempt");

        assert_eq!(attempt.transcript, "the cat sat");
        assert_eq!(attempt.result.total_count, 4);
        assert_eq!(attempt.result.correct_count, 3);
        assert_eq!(attempt.result.missing_words, vec!["down"]);
        assert_eq!(attempt.label, "[Practice: Cats P1] the cat sat");
    }

    #[tokio::test]
    async fn transcriber_error_is_propagated() {
        let mut session =
            session_with(MockTranscriber::err(TranscribeError::Failed("boom".into())));
        let page = first_page("Hello.");

        let err = session
            .attempt("Hi", &page, "clip.wav".into())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PracticeError::Transcribe(TranscribeError::Failed(_))
        ));
    }

    #[tokio::test]
    async fn blank_transcript_is_no_speech() {
        let mut session = session_with(MockTranscriber::ok("   "));
        let page = first_page("Hello.");

        let err = session
            .attempt("Hi", &page, "clip.wav".into())
            .await
            .unwrap_err();
        assert!(matches!(err, PracticeError::NoSpeech));
    }

    #[tokio::test]
    async fn attempts_are_recorded_in_history() {
        let dir = tempdir().expect("temp dir");
        let history = HistoryManager::with_path(dir.path().join("history.json"));
        let mut session = session_with(MockTranscriber::ok("one two")).with_history(history);
        session.set_duration(20);

        let page = first_page("One two. Three four.");
        session
            .attempt("Numbers", &page, "clip.wav".into())
            .await
            .expect("attempt");

        let pending = session.history().expect("history").pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].text, "[Practice: Numbers P1-2] one two");
        assert_eq!(pending[0].duration_secs, 20);
        assert_eq!(pending[0].language, "en");

        session.save_history().expect("save");
        let stored = session.history().expect("history").load_all();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn failed_attempts_leave_history_untouched() {
        let dir = tempdir().expect("temp dir");
        let history = HistoryManager::with_path(dir.path().join("history.json"));
        let mut session = session_with(MockTranscriber::ok("")).with_history(history);

        let page = first_page("Hello.");
        let _ = session.attempt("Hi", &page, "clip.wav".into()).await;

        assert!(session.history().expect("history").pending().is_empty());
    }

    // --- dictate ---

    #[tokio::test]
    async fn dictation_records_plain_transcript() {
        let dir = tempdir().expect("temp dir");
        let history = HistoryManager::with_path(dir.path().join("history.json"));
        let mut session =
            session_with(MockTranscriber::ok("take a note please")).with_history(history);
        session.set_duration(30);

        let text = session.dictate("clip.wav".into()).await.expect("dictate");
        assert_eq!(text, "take a note please");

        let pending = session.history().expect("history").pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].text, "take a note please");
        assert_eq!(pending[0].duration_secs, 30);

        session.save_history().expect("save");
        assert_eq!(session.history().expect("history").load_all().len(), 1);
    }

    #[tokio::test]
    async fn dictation_without_history_still_returns_text() {
        let mut session = session_with(MockTranscriber::ok("hello"));
        assert_eq!(session.dictate("clip.wav".into()).await.expect("dictate"), "hello");
        assert!(session.history().is_none());
    }

    #[tokio::test]
    async fn blank_dictation_is_no_speech_and_not_recorded() {
        let dir = tempdir().expect("temp dir");
        let history = HistoryManager::with_path(dir.path().join("history.json"));
        let mut session = session_with(MockTranscriber::ok("  ")).with_history(history);

        let err = session.dictate("clip.wav".into()).await.unwrap_err();
        assert!(matches!(err, PracticeError::NoSpeech));
        assert!(session.history().expect("history").pending().is_empty());
    }

    #[tokio::test]
    async fn dictation_propagates_transcriber_errors() {
        let mut session = session_with(MockTranscriber::err(TranscribeError::Empty));
        let err = session.dictate("clip.wav".into()).await.unwrap_err();
        assert!(matches!(err, PracticeError::Transcribe(TranscribeError::Empty)));
    }

    #[test]
    fn save_without_history_is_ok() {
        let mut session = session_with(MockTranscriber::ok("x"));
        assert!(session.save_history().is_ok());
    }
}
