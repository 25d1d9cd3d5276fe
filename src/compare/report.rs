//! Presentation-neutral views of a [`ComparisonResult`].
//!
//! Nothing here mutates the result; every helper borrows it and returns
//! fresh data, so the same result can be rendered any number of times.

use serde::{Deserialize, Serialize};

use super::comparator::{ComparisonResult, WordError};

/// Errors listed by [`error_summary`] before the rest are folded into an
/// "... and N more" line.
pub const DEFAULT_MAX_LISTED_ERRORS: usize = 10;

/// Default lower bound (percent) of [`AccuracyGrade::Good`].
pub const DEFAULT_SUCCESS_THRESHOLD: f64 = 80.0;
/// Default lower bound (percent) of [`AccuracyGrade::Fair`].
pub const DEFAULT_WARNING_THRESHOLD: f64 = 60.0;

// ---------------------------------------------------------------------------
// Plain-text error list
// ---------------------------------------------------------------------------

/// Bullet list of the first `limit` errors.
///
/// Deletions read `"word" - missed`; substitutions read
/// `"word" → "heard"`.  Returns an empty string when there are no errors.
///
/// ```
/// use voice_practice::compare::{compare, error_summary};
///
/// let result = compare("hello world", "hello");
/// assert!(error_summary(&result, 10).contains("\"world\" - missed"));
/// ```
pub fn error_summary(result: &ComparisonResult, limit: usize) -> String {
    if result.errors.is_empty() {
        return String::new();
    }

    let mut lines = vec![String::new(), "  ❌ Mispronounced words:".to_string()];
    for error in result.errors.iter().take(limit) {
        lines.push(error_line(error));
    }
    if result.errors.len() > limit {
        lines.push(format!("    ... and {} more", result.errors.len() - limit));
    }
    lines.push(String::new());

    lines.join("\n")
}

fn error_line(error: &WordError) -> String {
    if error.is_missing() {
        format!("    • \"{}\" - missed", error.original)
    } else {
        format!("    • \"{}\" → \"{}\"", error.original, error.heard)
    }
}

// ---------------------------------------------------------------------------
// Highlight segments
// ---------------------------------------------------------------------------

/// How a [`Segment`] should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentStyle {
    /// A reference word that was read correctly.
    Correct,
    /// A reference word at an error position.
    Error,
    /// Separator whitespace.
    Plain,
}

/// A run of text plus its display style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub style: SegmentStyle,
}

/// The reference words in order, each styled by whether its position is an
/// error, separated by single-space [`SegmentStyle::Plain`] segments.
pub fn highlight_segments(result: &ComparisonResult) -> Vec<Segment> {
    let error_indices = result.error_indices();
    let last = result.original_words.len().saturating_sub(1);

    let mut segments = Vec::with_capacity(result.original_words.len() * 2);
    for (i, word) in result.original_words.iter().enumerate() {
        let style = if error_indices.contains(&i) {
            SegmentStyle::Error
        } else {
            SegmentStyle::Correct
        };
        segments.push(Segment {
            text: word.clone(),
            style,
        });
        if i < last {
            segments.push(Segment {
                text: " ".to_string(),
                style: SegmentStyle::Plain,
            });
        }
    }
    segments
}

// ---------------------------------------------------------------------------
// AccuracyGrade
// ---------------------------------------------------------------------------

/// Coarse band used to colour the accuracy line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccuracyGrade {
    Good,
    Fair,
    Poor,
}

impl AccuracyGrade {
    /// Grade `accuracy` (0.0 – 1.0) with the default 80 % / 60 % bands.
    ///
    /// ```
    /// use voice_practice::compare::AccuracyGrade;
    ///
    /// assert_eq!(AccuracyGrade::from_accuracy(0.8), AccuracyGrade::Good);
    /// assert_eq!(AccuracyGrade::from_accuracy(0.65), AccuracyGrade::Fair);
    /// assert_eq!(AccuracyGrade::from_accuracy(0.1), AccuracyGrade::Poor);
    /// ```
    pub fn from_accuracy(accuracy: f64) -> Self {
        Self::with_thresholds(
            accuracy,
            DEFAULT_SUCCESS_THRESHOLD,
            DEFAULT_WARNING_THRESHOLD,
        )
    }

    /// Grade `accuracy` against explicit percentage thresholds.
    pub fn with_thresholds(accuracy: f64, success_pct: f64, warning_pct: f64) -> Self {
        let pct = accuracy * 100.0;
        if pct >= success_pct {
            AccuracyGrade::Good
        } else if pct >= warning_pct {
            AccuracyGrade::Fair
        } else {
            AccuracyGrade::Poor
        }
    }
}

/// `"Accuracy: 66.7% (2/3 words correct)"`.
pub fn accuracy_line(result: &ComparisonResult) -> String {
    format!(
        "Accuracy: {:.1}% ({}/{} words correct)",
        result.accuracy * 100.0,
        result.correct_count,
        result.total_count
    )
}

// ---------------------------------------------------------------------------
// ComparisonSummary
// ---------------------------------------------------------------------------

/// Scalar outcome of a comparison, without the per-word records.  This is
/// what `--json` prints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub accuracy: f64,
    pub correct_count: usize,
    pub total_count: usize,
    pub errors: Vec<WordError>,
    pub missing_words: Vec<String>,
    pub extra_words: Vec<String>,
}

impl From<&ComparisonResult> for ComparisonSummary {
    fn from(result: &ComparisonResult) -> Self {
        Self {
            accuracy: result.accuracy,
            correct_count: result.correct_count,
            total_count: result.total_count,
            errors: result.errors.clone(),
            missing_words: result.missing_words.clone(),
            extra_words: result.extra_words.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
