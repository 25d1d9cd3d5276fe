//! English contraction table shared by the text- and word-level normalisers.
//!
//! The table is an ordered slice rather than a map: text-level expansion
//! walks it once, front to back, replacing every occurrence of each key
//! before moving on to the next one.  Keeping the order fixed keeps the
//! result deterministic when one key is a substring of another
//! (`"he's"` inside `"she's"`).

// ---------------------------------------------------------------------------
// Static table
// ---------------------------------------------------------------------------

/// `(contracted, expanded)` pairs, lowercase, in replacement order.
pub static CONTRACTIONS: &[(&str, &str)] = &[
    ("i'm", "i am"),
    ("i've", "i have"),
    ("i'll", "i will"),
    ("i'd", "i would"),
    ("you're", "you are"),
    ("you've", "you have"),
    ("you'll", "you will"),
    ("you'd", "you would"),
    ("he's", "he is"),
    ("he'll", "he will"),
    ("he'd", "he would"),
    ("she's", "she is"),
    ("she'll", "she will"),
    ("she'd", "she would"),
    ("it's", "it is"),
    ("it'll", "it will"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("we'll", "we will"),
    ("we'd", "we would"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("they'll", "they will"),
    ("they'd", "they would"),
    ("that's", "that is"),
    ("that'll", "that will"),
    ("who's", "who is"),
    ("who'll", "who will"),
    ("what's", "what is"),
    ("what'll", "what will"),
    ("where's", "where is"),
    ("where'll", "where will"),
    ("when's", "when is"),
    ("when'll", "when will"),
    ("why's", "why is"),
    ("why'll", "why will"),
    ("how's", "how is"),
    ("how'll", "how will"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("wasn't", "was not"),
    ("weren't", "were not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("hadn't", "had not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("didn't", "did not"),
    ("won't", "will not"),
    ("wouldn't", "would not"),
    ("shan't", "shall not"),
    ("shouldn't", "should not"),
    ("can't", "can not"),
    ("cannot", "can not"),
    ("couldn't", "could not"),
    ("mustn't", "must not"),
    ("mightn't", "might not"),
    ("needn't", "need not"),
    ("let's", "let us"),
    ("here's", "here is"),
    ("there's", "there is"),
    ("there'll", "there will"),
];

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Expanded form of a single lowercase word, if it is a known contraction.
///
/// ```
/// use voice_practice::compare::contractions::expand_word;
///
/// assert_eq!(expand_word("cannot"), Some("can not"));
/// assert_eq!(expand_word("hello"), None);
/// ```
pub fn expand_word(word: &str) -> Option<&'static str> {
    CONTRACTIONS
        .iter()
        .find(|(contracted, _)| *contracted == word)
        .map(|(_, expanded)| *expanded)
}

/// Replace every contraction substring in `text` with its expansion.
///
/// `text` is expected to be lowercase already.  Replacement is a single
/// ordered pass over [`CONTRACTIONS`]; each key is replaced globally.
pub fn expand_text(text: &str) -> String {
    let mut out = text.to_string();
    for (contracted, expanded) in CONTRACTIONS {
        if out.contains(contracted) {
            out = out.replace(contracted, expanded);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
