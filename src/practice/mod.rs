//! Lesson practice: paging reference text and grading recorded attempts.
//!
//! This module provides:
//! * [`split_into_paragraphs`] / [`group_pages`]: turn a lesson into pages.
//! * [`reading_time_secs`]: suggested recording length for a page.
//! * [`practice_label`]: the history text of an attempt.
//! * [`PracticeSession`]: transcribe a clip, compare it, record it; or
//!   just transcribe and record it (dictation).

pub mod paragraphs;
pub mod session;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use paragraphs::{
    group_pages, practice_label, reading_time_secs, split_into_paragraphs, Page, Paragraph,
    PARAGRAPHS_PER_PAGE, WORDS_PER_MINUTE,
};
pub use session::{Attempt, PracticeError, PracticeSession};
