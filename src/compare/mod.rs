//! Reading-accuracy comparison between a reference text and a transcription.
//!
//! # Architecture
//!
//! ```text
//! reference ─┐                         ┌─ original_words ──────────────┐
//!            ├─ normalize_text ──┐     │                               │
//! transcript ┘                   ▼     ▼                               ▼
//!                      SequenceMatcher::opcodes ──▶ Scorer (2 cursors) ──▶ ComparisonResult
//!                                                                      │
//!                                        error_summary / highlight_segments
//! ```
//!
//! * [`normalize_text`] / [`normalize_word`] / [`original_words`]: tokenising.
//! * [`SequenceMatcher`] / [`Opcode`]: minimal-edit alignment.
//! * [`TextComparator`]: scoring anchored on the reference text.
//! * [`error_summary`] / [`highlight_segments`] / [`AccuracyGrade`]: display helpers.
//!
//! Everything here is pure and synchronous.
//!
//! # Quick start
//!
//! ```rust
//! use voice_practice::compare::{compare, error_summary};
//!
//! let result = compare("The quick brown fox", "the brown fox");
//! assert_eq!(result.correct_count, 3);
//! assert_eq!(result.missing_words, vec!["quick"]);
//! println!("{}", error_summary(&result, 10));
//! ```

pub mod comparator;
pub mod contractions;
pub mod matcher;
pub mod normalize;
pub mod report;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use comparator::{compare, ComparisonResult, TextComparator, WordError, WordMatch, MISSING};
pub use matcher::{Match, Opcode, SequenceMatcher};
pub use normalize::{normalize_text, normalize_word, original_words};
pub use report::{
    accuracy_line, error_summary, highlight_segments, AccuracyGrade, ComparisonSummary, Segment,
    SegmentStyle, DEFAULT_MAX_LISTED_ERRORS,
};
