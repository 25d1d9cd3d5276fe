//! Longest-common-block sequence matcher producing edit [`Opcode`]s.
//!
//! # Algorithm
//!
//! ```text
//! find longest matching block in a[alo..ahi] × b[blo..bhi]
//!        │
//!        ├─ recurse on the part left of the block
//!        └─ recurse on the part right of the block
//!
//! sort blocks → merge adjacent blocks → append sentinel (len_a, len_b, 0)
//!        │
//!        ▼
//! walk blocks: gaps become Replace / Delete / Insert, blocks become Equal
//! ```
//!
//! Ties between equally long blocks go to the one starting earliest in `a`,
//! then earliest in `b`.  When `b` has 200 or more elements, elements that
//! occur more than `len(b) / 100 + 1` times are "popular" and never seed a
//! match, although a match found elsewhere may still be extended across
//! them, so long transcripts full of filler words still align in near
//! linear time.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

/// Minimum length of `b` before the popular-element heuristic kicks in.
const AUTOJUNK_MIN_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Opcode
// ---------------------------------------------------------------------------

/// One alignment operation between a reference range and a transcribed range.
///
/// Every variant carries both ranges so consumers can always read all four
/// bounds; for `Delete` the transcribed range is empty and for `Insert` the
/// reference range is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opcode {
    /// `reference[..] == transcribed[..]`, same length.
    Equal {
        reference: Range<usize>,
        transcribed: Range<usize>,
    },
    /// Reference run replaced by a (possibly different-length) transcribed run.
    Replace {
        reference: Range<usize>,
        transcribed: Range<usize>,
    },
    /// Reference run with no transcribed counterpart.
    Delete {
        reference: Range<usize>,
        transcribed: Range<usize>,
    },
    /// Transcribed run with no reference counterpart.
    Insert {
        reference: Range<usize>,
        transcribed: Range<usize>,
    },
}

impl Opcode {
    /// Short lowercase name, handy for logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Opcode::Equal { .. } => "equal",
            Opcode::Replace { .. } => "replace",
            Opcode::Delete { .. } => "delete",
            Opcode::Insert { .. } => "insert",
        }
    }

    /// Range covered in the reference sequence.
    pub fn reference(&self) -> Range<usize> {
        match self {
            Opcode::Equal { reference, .. }
            | Opcode::Replace { reference, .. }
            | Opcode::Delete { reference, .. }
            | Opcode::Insert { reference, .. } => reference.clone(),
        }
    }

    /// Range covered in the transcribed sequence.
    pub fn transcribed(&self) -> Range<usize> {
        match self {
            Opcode::Equal { transcribed, .. }
            | Opcode::Replace { transcribed, .. }
            | Opcode::Delete { transcribed, .. }
            | Opcode::Insert { transcribed, .. } => transcribed.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// A matching block: `a[a..a + size] == b[b..b + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

// ---------------------------------------------------------------------------
// SequenceMatcher
// ---------------------------------------------------------------------------

/// Matcher over two borrowed sequences.
///
/// Construction indexes `b`; all queries are then read-only, so a matcher
/// can be queried repeatedly.
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    /// Positions of each non-popular element of `b`, ascending.
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    /// Index `b` and prepare to match `a` against it.
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= ntest);
        }

        Self { a, b, b2j }
    }

    /// Longest matching block within `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Returns a block of size 0 at `(alo, blo)` when nothing matches.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (a, b) = (self.a, self.b);
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // j2len[j] = length of the match ending at a[i - 1], b[j].
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = if j > 0 {
                        j2len.get(&(j - 1)).copied().unwrap_or(0)
                    } else {
                        0
                    };
                    let k = prev + 1;
                    new_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Popular elements never seed a match; let the block grow over them.
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == b[best_j + best_size]
        {
            best_size += 1;
        }

        Match {
            a: best_i,
            b: best_j,
            size: best_size,
        }
    }

    /// All maximal matching blocks, ascending, ending with the sentinel
    /// `Match { a: len_a, b: len_b, size: 0 }`.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());

        let mut stack = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = stack.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.a && blo < m.b {
                stack.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                stack.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
        }
        blocks.sort();

        // Merge blocks that touch end-to-start in both sequences.
        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for m in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.size == m.a && last.b + last.size == m.b => {
                    last.size += m.size;
                }
                _ => merged.push(m),
            }
        }
        merged.push(Match {
            a: la,
            b: lb,
            size: 0,
        });
        merged
    }

    /// Edit operations turning `a` into `b`, covering both completely.
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut ops = Vec::new();
        let (mut i, mut j) = (0, 0);

        for m in self.matching_blocks() {
            let reference = i..m.a;
            let transcribed = j..m.b;
            match (i < m.a, j < m.b) {
                (true, true) => ops.push(Opcode::Replace {
                    reference,
                    transcribed,
                }),
                (true, false) => ops.push(Opcode::Delete {
                    reference,
                    transcribed,
                }),
                (false, true) => ops.push(Opcode::Insert {
                    reference,
                    transcribed,
                }),
                (false, false) => {}
            }

            i = m.a + m.size;
            j = m.b + m.size;
            if m.size > 0 {
                ops.push(Opcode::Equal {
                    reference: m.a..i,
                    transcribed: m.b..j,
                });
            }
        }
        ops
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
