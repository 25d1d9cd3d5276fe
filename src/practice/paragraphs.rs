//! Splitting lesson text into paragraphs and practice pages.

use once_cell::sync::Lazy;
use regex::Regex;

/// Assumed reading pace when estimating recording length.
pub const WORDS_PER_MINUTE: usize = 150;
/// Shortest recording ever suggested, in seconds.
pub const MIN_READING_SECS: u32 = 10;
/// Paragraphs shown together on one practice page.
pub const PARAGRAPHS_PER_PAGE: usize = 2;
/// Characters of the lesson title kept in history labels.
const LABEL_TITLE_CHARS: usize = 30;

/// Sentence end, whitespace, then an uppercase letter.
static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+[A-Z]").expect("valid sentence-break pattern"));

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub word_count: usize,
}

impl Paragraph {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            word_count: text.split_whitespace().count(),
        }
    }
}

/// A group of consecutive paragraphs read in one recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Paragraph texts joined by a blank line.
    pub text: String,
    pub word_count: usize,
    /// 1-based number of the first paragraph on the page.
    pub start_paragraph: usize,
    /// 1-based number of the last paragraph on the page.
    pub end_paragraph: usize,
}

impl Page {
    /// `"P3"` for a single paragraph, `"P3-4"` for a range.
    pub fn range_label(&self) -> String {
        if self.start_paragraph == self.end_paragraph {
            format!("P{}", self.start_paragraph)
        } else {
            format!("P{}-{}", self.start_paragraph, self.end_paragraph)
        }
    }

    /// Suggested recording length for this page.
    pub fn reading_time_secs(&self) -> u32 {
        reading_time_secs(self.word_count)
    }
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

/// Split `text` after `.`, `!` or `?` wherever whitespace is followed by an
/// uppercase letter.  Falls back to the whole text as a single paragraph
/// when nothing non-blank remains.
///
/// ```
/// use voice_practice::practice::split_into_paragraphs;
///
/// let paras = split_into_paragraphs("It rains. Dogs bark! ok then");
/// assert_eq!(paras.len(), 2);
/// assert_eq!(paras[1].text, "Dogs bark! ok then");
/// ```
pub fn split_into_paragraphs(text: &str) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(text) {
        // Keep the punctuation on the left piece and the capital on the right.
        let punct_end = m.start() + 1;
        let capital_start = m.end() - 1;
        push_trimmed(&mut paragraphs, &text[start..punct_end]);
        start = capital_start;
    }
    push_trimmed(&mut paragraphs, &text[start..]);

    if paragraphs.is_empty() {
        return vec![Paragraph::new(text)];
    }
    paragraphs
}

fn push_trimmed(out: &mut Vec<Paragraph>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(Paragraph::new(piece));
    }
}

/// Group paragraphs into pages of `per_page` (a zero size is treated as 1).
pub fn group_pages(paragraphs: &[Paragraph], per_page: usize) -> Vec<Page> {
    let per_page = per_page.max(1);
    paragraphs
        .chunks(per_page)
        .enumerate()
        .map(|(n, group)| {
            let start_paragraph = n * per_page + 1;
            Page {
                text: group
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n\n"),
                word_count: group.iter().map(|p| p.word_count).sum(),
                start_paragraph,
                end_paragraph: start_paragraph + group.len() - 1,
            }
        })
        .collect()
}

/// Seconds needed to read `word_count` words at [`WORDS_PER_MINUTE`],
/// rounded up, never below [`MIN_READING_SECS`].
pub fn reading_time_secs(word_count: usize) -> u32 {
    let secs = (word_count as f64 * 60.0 / WORDS_PER_MINUTE as f64).ceil() as u32;
    secs.max(MIN_READING_SECS)
}

/// History text for a practice attempt:
/// `"[Practice: <title> P1-2] <transcript>"`, title cut to 30 characters.
pub fn practice_label(title: &str, page: &Page, transcript: &str) -> String {
    let title: String = title.chars().take(LABEL_TITLE_CHARS).collect();
    format!("[Practice: {title} {}] {transcript}", page.range_label())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(paras: &[Paragraph]) -> Vec<&str> {
        paras.iter().map(|p| p.text.as_str()).collect()
    }

    // --- split_into_paragraphs ---

    #[test]
    fn splits_on_sentence_boundaries() {
        let paras = split_into_paragraphs("First one. Second one? Third one!");
        assert_eq!(texts(&paras), vec!["First one.", "Second one?", "Third one!"]);
        assert_eq!(paras[0].word_count, 2);
    }

    #[test]
    fn lowercase_after_period_does_not_split() {
        let paras = split_into_paragraphs("Mr. smith arrived. He sat.");
        assert_eq!(texts(&paras), vec!["Mr. smith arrived.", "He sat."]);
    }

    #[test]
    fn newlines_count_as_whitespace() {
        let paras = split_into_paragraphs("One.\n\nTwo.");
        assert_eq!(texts(&paras), vec!["One.", "Two."]);
    }

    #[test]
    fn text_without_breaks_is_one_paragraph() {
        let paras = split_into_paragraphs("  just words here  ");
        assert_eq!(texts(&paras), vec!["just words here"]);
    }

    #[test]
    fn blank_text_falls_back_to_whole_input() {
        let paras = split_into_paragraphs("   ");
        assert_eq!(paras.len(), 1);
        assert_eq!(paras[0].word_count, 0);
    }

    // --- group_pages ---

    #[test]
    fn pages_group_pairs() {
        let paras = split_into_paragraphs("A b. C d e. F.");
        let pages = group_pages(&paras, PARAGRAPHS_PER_PAGE);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].text, "A b.\n\nC d e.");
        assert_eq!(pages[0].word_count, 5);
        assert_eq!((pages[0].start_paragraph, pages[0].end_paragraph), (1, 2));
        assert_eq!((pages[1].start_paragraph, pages[1].end_paragraph), (3, 3));
    }

    #[test]
    fn zero_page_size_is_one() {
        let paras = split_into_paragraphs("A. B.");
        assert_eq!(group_pages(&paras, 0).len(), 2);
    }

    #[test]
    fn range_labels() {
        let paras = split_into_paragraphs("A. B. C.");
        let pages = group_pages(&paras, 2);
        assert_eq!(pages[0].range_label(), "P1-2");
        assert_eq!(pages[1].range_label(), "P3");
    }

    // --- reading_time_secs ---

    #[test]
    fn reading_time_has_floor() {
        assert_eq!(reading_time_secs(0), 10);
        assert_eq!(reading_time_secs(20), 10);
    }

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(reading_time_secs(150), 60);
        assert_eq!(reading_time_secs(151), 61);
        assert_eq!(reading_time_secs(300), 120);
    }

    // --- practice_label ---

    #[test]
    fn label_truncates_title() {
        let page = Page {
            text: String::new(),
            word_count: 0,
            start_paragraph: 1,
            end_paragraph: 2,
        };
        let title = "Introduction to the history of Rome and its people";
        assert_eq!(
            practice_label(title, &page, "hello"),
            "[Practice: Introduction to the history of P1-2] hello"
        );
    }
}
