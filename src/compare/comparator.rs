//! Reference-anchored word comparison.
//!
//! [`TextComparator::compare`] normalises both texts, aligns the token
//! sequences with [`SequenceMatcher`], then walks the opcodes while two
//! cursors step through the *raw* word lists for display:
//!
//! | Opcode  | Reference cursor | Transcribed cursor | Output |
//! |---------|------------------|--------------------|--------|
//! | Equal   | +1 per token     | +1 per token       | matched [`WordMatch`] |
//! | Replace | +1 per token     | + surplus only     | unmatched [`WordMatch`] + [`WordError`] per reference token |
//! | Delete  | +1 per token     | —                  | unmatched [`WordMatch`] + `"(missing)"` [`WordError`] |
//! | Insert  | —                | + whole run        | nothing |
//!
//! On a replace run the transcribed cursor only skips the words the
//! transcription has beyond the reference run (`j2 - j1 - (i2 - i1)` when
//! positive); a one-for-one substitution leaves it in place.
//!
//! Only reference tokens are scored, so extra spoken words never change the
//! denominator of [`ComparisonResult::accuracy`].

use serde::{Deserialize, Serialize};

use super::matcher::{Opcode, SequenceMatcher};
use super::normalize::{normalize_text, original_words};

/// Transcribed-word placeholder recorded for reference words that were
/// deleted outright.
pub const MISSING: &str = "(missing)";

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Verdict for one reference position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMatch {
    /// Reference word as written (empty when raw words run out before tokens).
    pub original: String,
    /// Transcribed word paired with it, or empty.
    pub transcribed: String,
    /// `true` only for positions inside an equal run.
    pub is_match: bool,
    /// Position in the normalised reference token sequence.
    pub index: usize,
}

/// An unmatched reference position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordError {
    /// Position in the normalised reference token sequence.
    pub index: usize,
    /// Reference word as written.
    pub original: String,
    /// What was heard instead: a transcribed word, an empty string for the
    /// tail of an uneven substitution, or [`MISSING`] for a deletion.
    pub heard: String,
}

impl WordError {
    /// `true` when the reference word had no counterpart at all.
    pub fn is_missing(&self) -> bool {
        self.heard == MISSING
    }
}

/// Full outcome of one comparison.  Plain data; never mutated after
/// [`TextComparator::compare`] returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub original_words: Vec<String>,
    pub transcribed_words: Vec<String>,
    /// One entry per reference token, in order.
    pub matches: Vec<WordMatch>,
    /// Exactly the unmatched entries of `matches`, in order.
    pub errors: Vec<WordError>,
    /// `correct_count / total_count`, or `0.0` for an empty reference.
    pub accuracy: f64,
    pub correct_count: usize,
    /// Number of normalised reference tokens.
    pub total_count: usize,
    pub missing_words: Vec<String>,
    /// Extra spoken words.  Insertions are currently absorbed without being
    /// reported, so this is always empty.
    pub extra_words: Vec<String>,
}

impl ComparisonResult {
    /// Reference positions that were not matched.
    pub fn error_indices(&self) -> std::collections::HashSet<usize> {
        self.errors.iter().map(|e| e.index).collect()
    }
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Forward-only position in a raw word list.
///
/// Reads past the end yield `""`: contraction expansion can make the token
/// sequence longer than the raw word list it came from.
#[derive(Debug)]
struct Cursor<'a> {
    words: &'a [String],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(words: &'a [String]) -> Self {
        Self { words, pos: 0 }
    }

    fn current(&self) -> &'a str {
        self.words.get(self.pos).map(String::as_str).unwrap_or("")
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// Accumulates match records while opcodes are replayed.
struct Scorer<'a> {
    reference: Cursor<'a>,
    transcribed: Cursor<'a>,
    matches: Vec<WordMatch>,
    errors: Vec<WordError>,
    correct_count: usize,
}

impl<'a> Scorer<'a> {
    fn new(reference: &'a [String], transcribed: &'a [String]) -> Self {
        Self {
            reference: Cursor::new(reference),
            transcribed: Cursor::new(transcribed),
            matches: Vec::new(),
            errors: Vec::new(),
            correct_count: 0,
        }
    }

    fn apply(&mut self, op: &Opcode) {
        match op {
            Opcode::Equal { reference, .. } => {
                for _ in reference.clone() {
                    self.push(self.transcribed.current(), true, None);
                    self.correct_count += 1;
                    self.transcribed.advance(1);
                }
            }
            Opcode::Replace {
                reference,
                transcribed,
            } => {
                let heard = self.transcribed.current();
                for k in 0..reference.len() {
                    // Only the first reference token is paired with a word.
                    let paired = if k == 0 { heard } else { "" };
                    self.push(paired, false, Some(paired));
                }
                self.transcribed
                    .advance(transcribed.len().saturating_sub(reference.len()));
            }
            Opcode::Delete { reference, .. } => {
                for _ in reference.clone() {
                    self.push("", false, Some(MISSING));
                }
            }
            Opcode::Insert { transcribed, .. } => {
                self.transcribed.advance(transcribed.len());
            }
        }
    }

    /// Record the verdict for the reference word under the cursor and step
    /// past it.  `error` carries the heard text for unmatched positions.
    fn push(&mut self, transcribed: &str, is_match: bool, error: Option<&str>) {
        let index = self.reference.pos;
        let original = self.reference.current().to_string();

        if let Some(heard) = error {
            self.errors.push(WordError {
                index,
                original: original.clone(),
                heard: heard.to_string(),
            });
        }
        self.matches.push(WordMatch {
            original,
            transcribed: transcribed.to_string(),
            is_match,
            index,
        });
        self.reference.advance(1);
    }
}

// ---------------------------------------------------------------------------
// TextComparator
// ---------------------------------------------------------------------------

/// Compares a reference text with a transcription of someone reading it.
///
/// Stateless and `Send + Sync`; one instance can serve any number of
/// threads.
///
/// ```
/// use voice_practice::compare::TextComparator;
///
/// let result = TextComparator::new().compare("the cat sat", "the bat sat");
/// assert_eq!(result.correct_count, 2);
/// assert_eq!(result.errors[0].heard, "bat");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextComparator;

impl TextComparator {
    pub fn new() -> Self {
        Self
    }

    /// Align `transcribed` against `reference` and score every reference
    /// token.  Total over all inputs: empty text simply scores `0.0`.
    pub fn compare(&self, reference: &str, transcribed: &str) -> ComparisonResult {
        let reference_words = original_words(reference);
        let transcribed_words = original_words(transcribed);

        let reference_tokens = normalize_text(reference);
        let transcribed_tokens = normalize_text(transcribed);

        let opcodes = SequenceMatcher::new(&reference_tokens, &transcribed_tokens).opcodes();

        let mut scorer = Scorer::new(&reference_words, &transcribed_words);
        for op in &opcodes {
            scorer.apply(op);
        }
        let Scorer {
            matches,
            errors,
            correct_count,
            ..
        } = scorer;

        let total_count = reference_tokens.len();
        let accuracy = if total_count > 0 {
            correct_count as f64 / total_count as f64
        } else {
            0.0
        };

        let missing_words = errors
            .iter()
            .filter(|e| e.is_missing())
            .map(|e| e.original.clone())
            .collect();

        log::debug!(
            "compared {} reference / {} transcribed tokens in {} ops: {correct_count}/{total_count} correct",
            reference_tokens.len(),
            transcribed_tokens.len(),
            opcodes.len(),
        );

        ComparisonResult {
            original_words: reference_words,
            transcribed_words,
            matches,
            errors,
            accuracy,
            correct_count,
            total_count,
            missing_words,
            extra_words: Vec::new(),
        }
    }
}

/// Shorthand for `TextComparator::new().compare(reference, transcribed)`.
pub fn compare(reference: &str, transcribed: &str) -> ComparisonResult {
    TextComparator::new().compare(reference, transcribed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    // --- Cursor ---

    #[test]
    fn cursor_reads_empty_past_end() {
        let words = strings(&["a"]);
        let mut cursor = Cursor::new(&words);
        assert_eq!(cursor.current(), "a");
        cursor.advance(1);
        assert_eq!(cursor.current(), "");
        cursor.advance(5);
        assert_eq!(cursor.current(), "");
    }

    // --- Scorer on hand-built opcodes ---

    #[test]
    fn uneven_replace_pairs_only_first_token() {
        let reference = strings(&["red", "green", "blue"]);
        let transcribed = strings(&["grey", "after"]);
        let mut scorer = Scorer::new(&reference, &transcribed);

        scorer.apply(&Opcode::Replace {
            reference: 0..3,
            transcribed: 0..1,
        });
        scorer.apply(&Opcode::Insert {
            reference: 3..3,
            transcribed: 1..2,
        });

        let heard: Vec<&str> = scorer.errors.iter().map(|e| e.heard.as_str()).collect();
        assert_eq!(heard, vec!["grey", "", ""]);
        assert!(scorer.errors.iter().all(|e| !e.is_missing()));
        assert_eq!(scorer.matches[0].transcribed, "grey");
        assert_eq!(scorer.matches[1].transcribed, "");
        assert_eq!(scorer.transcribed.pos, 1);
    }

    #[test]
    fn replace_with_longer_transcription_skips_only_the_surplus() {
        let reference = strings(&["one", "two"]);
        let transcribed = strings(&["uno", "dos", "tres", "two"]);
        let mut scorer = Scorer::new(&reference, &transcribed);

        scorer.apply(&Opcode::Replace {
            reference: 0..1,
            transcribed: 0..3,
        });
        scorer.apply(&Opcode::Equal {
            reference: 1..2,
            transcribed: 3..4,
        });

        // Three heard words for one reference word: the two surplus ones
        // are skipped, the first stays under the cursor.
        assert_eq!(scorer.transcribed.pos, 3);
        assert_eq!(scorer.matches.len(), 2);
        assert_eq!(scorer.matches[0].transcribed, "uno");
        assert_eq!(scorer.matches[1].transcribed, "tres");
        assert!(scorer.matches[1].is_match);
        assert_eq!(scorer.correct_count, 1);
    }

    #[test]
    fn delete_records_missing_sentinel() {
        let reference = strings(&["alpha", "beta"]);
        let mut scorer = Scorer::new(&reference, &[]);
        scorer.apply(&Opcode::Delete {
            reference: 0..2,
            transcribed: 0..0,
        });

        assert_eq!(scorer.errors.len(), 2);
        assert!(scorer.errors.iter().all(WordError::is_missing));
        assert_eq!(scorer.errors[1].index, 1);
        assert_eq!(scorer.errors[1].original, "beta");
    }

    // --- compare ---

    #[test]
    fn identical_texts() {
        let result = compare("hello world", "hello world");
        assert_eq!(result.accuracy, 1.0);
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.total_count, 2);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn completely_different() {
        let result = compare("hello world", "foo bar");
        assert_eq!(result.accuracy, 0.0);
        assert_eq!(result.correct_count, 0);
        assert_eq!(result.total_count, 2);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn one_for_one_substitution_leaves_transcribed_cursor() {
        let result = compare("the cat sat", "the bat sat");
        assert!(result.matches[2].is_match);
        // The substituted word is still under the cursor for the next pair.
        assert_eq!(result.matches[2].transcribed, "bat");
    }

    #[test]
    fn later_substitution_hears_word_under_cursor() {
        let result = compare("the cat sat on mat", "the bat sat in mat");
        let errors: Vec<(usize, &str, &str)> = result
            .errors
            .iter()
            .map(|e| (e.index, e.original.as_str(), e.heard.as_str()))
            .collect();
        assert_eq!(errors, vec![(1, "cat", "bat"), (3, "on", "sat")]);
        assert_eq!(result.correct_count, 3);
    }

    #[test]
    fn insertions_do_not_change_total() {
        let result = compare("hello", "hello world foo");
        assert_eq!(result.total_count, 1);
        assert_eq!(result.accuracy, 1.0);
        assert!(result.extra_words.is_empty());
    }

    #[test]
    fn contraction_expansion_counts_tokens() {
        let result = compare("I can't go", "I can't go");
        assert_eq!(result.total_count, 4);
        assert_eq!(result.original_words.len(), 3);
        assert_eq!(result.matches.len(), 4);
        // The fourth token has no raw word left to display.
        assert_eq!(result.matches[3].original, "");
    }

    #[test]
    fn matches_cover_every_reference_position_once() {
        let result = compare(
            "the quick brown fox jumps over the lazy dog",
            "a quick brown cat jumped over lazy dogs and more",
        );
        let indices: Vec<usize> = result.matches.iter().map(|m| m.index).collect();
        assert_eq!(indices, (0..result.total_count).collect::<Vec<_>>());
        assert_eq!(
            result.errors.len(),
            result.matches.iter().filter(|m| !m.is_match).count()
        );
        assert_eq!(result.correct_count + result.errors.len(), result.total_count);
    }

    #[test]
    fn error_indices_match_errors() {
        let result = compare("one two three", "one three");
        assert_eq!(result.error_indices(), std::collections::HashSet::from([1]));
    }

    #[test]
    fn comparator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TextComparator>();
        assert_send_sync::<ComparisonResult>();
    }
}
