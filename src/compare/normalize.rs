//! Text normalisation for alignment and raw-word extraction for display.
//!
//! Two views of the same input are produced independently:
//!
//! | Function            | Output                 | Used by           |
//! |---------------------|------------------------|-------------------|
//! | [`normalize_text`]  | lowercase tokens, contractions expanded, punctuation removed | aligner |
//! | [`original_words`]  | words as written, case and inner `'`/`-` preserved | display |
//!
//! Contraction expansion changes the token count (`"can't"` → `"can"`,
//! `"not"`), so the two sequences are **not** index-aligned.

use once_cell::sync::Lazy;
use regex::Regex;

use super::contractions::{expand_text, expand_word};

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Anything that is neither a word character nor whitespace.
static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid punctuation pattern"));

/// A word, allowing apostrophes and hyphens inside it.
static RAW_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[\w'-]+\b").expect("valid raw-word pattern"));

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Normalise a single word: lowercase, trim, drop punctuation, then look the
/// result up in the contraction table.
///
/// Punctuation is removed *before* the lookup, so apostrophe contractions
/// collapse (`"can't"` → `"cant"`) and only apostrophe-free keys such as
/// `"cannot"` are expanded.  A hit returns the expansion as one string.
///
/// ```
/// use voice_practice::compare::normalize_word;
///
/// assert_eq!(normalize_word("Hello,"), "hello");
/// assert_eq!(normalize_word("can't"), "cant");
/// assert_eq!(normalize_word("Cannot"), "can not");
/// ```
pub fn normalize_word(word: &str) -> String {
    let lowered = word.to_lowercase();
    let stripped = PUNCTUATION.replace_all(lowered.trim(), "");
    match expand_word(&stripped) {
        Some(expanded) => expanded.to_string(),
        None => stripped.into_owned(),
    }
}

/// Normalise a whole text into alignment tokens.
///
/// Lowercases, expands contractions anywhere in the text, turns remaining
/// punctuation into whitespace and splits.  Empty or punctuation-only input
/// yields an empty vector.
///
/// ```
/// use voice_practice::compare::normalize_text;
///
/// assert_eq!(normalize_text("I can't go!"), vec!["i", "can", "not", "go"]);
/// assert!(normalize_text("?!").is_empty());
/// ```
pub fn normalize_text(text: &str) -> Vec<String> {
    let expanded = expand_text(&text.to_lowercase());
    PUNCTUATION
        .replace_all(&expanded, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Extract display words from `text`, preserving order, case and inner
/// apostrophes/hyphens (`"don't"` and `"well-known"` stay whole).
///
/// ```
/// use voice_practice::compare::original_words;
///
/// assert_eq!(original_words("It's well-known."), vec!["It's", "well-known"]);
/// ```
pub fn original_words(text: &str) -> Vec<String> {
    RAW_WORD
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- normalize_word ---

    #[test]
    fn word_is_lowercased() {
        assert_eq!(normalize_word("Hello"), "hello");
        assert_eq!(normalize_word("WORLD"), "world");
    }

    #[test]
    fn word_punctuation_is_removed() {
        assert_eq!(normalize_word("hello,"), "hello");
        assert_eq!(normalize_word("world."), "world");
        assert_eq!(normalize_word("'test'"), "test");
    }

    #[test]
    fn word_apostrophe_contractions_collapse() {
        assert_eq!(normalize_word("can't"), "cant");
        assert_eq!(normalize_word("won't"), "wont");
        assert_eq!(normalize_word("i'm"), "im");
    }

    #[test]
    fn word_is_trimmed() {
        assert_eq!(normalize_word("  spaced  "), "spaced");
    }

    // --- normalize_text ---

    #[test]
    fn text_basic() {
        assert_eq!(normalize_text("Hello world"), vec!["hello", "world"]);
    }

    #[test]
    fn text_contractions_expand_to_multiple_tokens() {
        assert_eq!(normalize_text("I can't go"), vec!["i", "can", "not", "go"]);
        assert_eq!(normalize_text("Let's see"), vec!["let", "us", "see"]);
    }

    #[test]
    fn text_punctuation_is_removed() {
        assert_eq!(normalize_text("Hello, world!"), vec!["hello", "world"]);
    }

    #[test]
    fn text_inner_punctuation_splits_tokens() {
        assert_eq!(normalize_text("well-known"), vec!["well", "known"]);
    }

    #[test]
    fn text_empty_and_punctuation_only() {
        assert!(normalize_text("").is_empty());
        assert!(normalize_text("   ").is_empty());
        assert!(normalize_text("... --- !!!").is_empty());
    }

    #[test]
    fn text_keeps_non_ascii_letters() {
        assert_eq!(normalize_text("Café, Niño!"), vec!["café", "niño"]);
    }

    // --- original_words ---

    #[test]
    fn raw_words_basic() {
        assert_eq!(original_words("Hello world"), vec!["Hello", "world"]);
    }

    #[test]
    fn raw_words_drop_outer_punctuation() {
        assert_eq!(original_words("Hello, world!"), vec!["Hello", "world"]);
    }

    #[test]
    fn raw_words_keep_apostrophes_and_hyphens() {
        assert_eq!(original_words("It's a test"), vec!["It's", "a", "test"]);
        assert_eq!(
            original_words("a well-known fact"),
            vec!["a", "well-known", "fact"]
        );
    }

    #[test]
    fn raw_words_empty() {
        assert!(original_words("").is_empty());
        assert!(original_words("?!").is_empty());
    }
}
