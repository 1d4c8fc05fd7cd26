//! Whitespace-invariant character alignment between the two normalized texts.
//!
//! PDF extraction re-flows words across lines and columns unpredictably, so a
//! raw character diff would drown in spurious whitespace operations. Instead,
//! all whitespace is stripped from both texts first, keeping an index map from
//! each stripped character back to its byte offset in the unstripped text
//! (the stripped string is a derived view; positions translate through the
//! offset table rather than holding references into the source).
//!
//! Alignment itself is the classic Ratcliff/Obershelp strategy: recursively
//! take the longest common block, then align the pieces on either side. No
//! autojunk heuristic is applied: legal/reference prose repeats short
//! substrings constantly, and treating them as junk suppresses real matches.

use std::collections::HashMap;
use std::ops::Range;

/// A whitespace-stripped view of a text plus the offset table back into it.
#[derive(Debug, Clone)]
pub struct StrippedText {
    chars: Vec<char>,
    /// Byte offset in the original text of each stripped character.
    byte_map: Vec<usize>,
}

impl StrippedText {
    /// Strip all whitespace from `text`, recording each kept character's
    /// byte offset in the original.
    pub fn new(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut byte_map = Vec::with_capacity(text.len());
        for (offset, ch) in text.char_indices() {
            if !ch.is_whitespace() {
                chars.push(ch);
                byte_map.push(offset);
            }
        }
        Self { chars, byte_map }
    }

    /// Number of stripped characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the stripped text is empty.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The stripped character sequence.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// The stripped substring for a character range.
    pub fn slice(&self, range: Range<usize>) -> String {
        self.chars[range].iter().collect()
    }

    /// Map a stripped-character range back to a byte range in the original
    /// text.
    ///
    /// Returns `None` for a range that cannot be anchored on this side: an
    /// empty range (the untouched side of an insert/delete) or a start at or
    /// past the end. Such a range has no snippet to show. The end is clamped
    /// so the result is always within the original text's bounds.
    pub fn map_span(&self, range: &Range<usize>) -> Option<Range<usize>> {
        if range.start >= range.end || range.start >= self.byte_map.len() {
            return None;
        }
        let start = self.byte_map[range.start];
        let last = (range.end - 1).min(self.byte_map.len() - 1);
        let end = self.byte_map[last] + self.chars[last].len_utf8();
        Some(start..end)
    }
}

/// The kind of an edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    /// Both sides match.
    Equal,
    /// The PDF range was replaced by the HTML range.
    Replace,
    /// Present in the PDF, missing from the HTML.
    Delete,
    /// Present in the HTML, missing from the PDF.
    Insert,
}

/// One edit operation over the two stripped character sequences.
///
/// Either range may be empty (pure insertion or deletion).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOp {
    /// What happened across this span.
    pub kind: OpKind,
    /// Character range in the stripped PDF text.
    pub pdf: Range<usize>,
    /// Character range in the stripped HTML text.
    pub html: Range<usize>,
}

impl EditOp {
    /// Span length of the operation: the larger of the two side lengths.
    pub fn len(&self) -> usize {
        self.pdf.len().max(self.html.len())
    }

    /// Whether both sides of the operation are empty.
    pub fn is_empty(&self) -> bool {
        self.pdf.is_empty() && self.html.is_empty()
    }
}

/// Compute the ordered edit script between two stripped texts.
///
/// `Equal` operations are always retained; non-equal operations whose span
/// length is below `min_len` are discarded as boundary noise. `min_len` is
/// clamped to at least 1 so zero-length spurious operations can never
/// survive.
///
/// # Examples
///
/// ```
/// use corpus_audit::align::{align, OpKind, StrippedText};
///
/// let pdf = StrippedText::new("the quick brown fox");
/// let html = StrippedText::new("the quick red fox");
/// let ops = align(&pdf, &html, 1);
/// assert!(ops.iter().any(|op| op.kind == OpKind::Replace));
/// ```
pub fn align(pdf: &StrippedText, html: &StrippedText, min_len: usize) -> Vec<EditOp> {
    let min_len = min_len.max(1);
    let matcher = BlockMatcher::new(pdf.chars(), html.chars());
    matcher
        .opcodes()
        .into_iter()
        .filter(|op| op.kind == OpKind::Equal || op.len() >= min_len)
        .collect()
}

/// Longest-matching-blocks matcher over two character sequences.
struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each character in `b`, in ascending order.
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &ch) in b.iter().enumerate() {
            b2j.entry(ch).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// Find the longest matching block within `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Of all maximal blocks, returns the one starting earliest in `a` and,
    /// among those, earliest in `b`.
    fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let mut best_i = alo;
        let mut best_j = blo;
        let mut best_size = 0;

        // j2len[j] = length of the longest match ending at a[i], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = if j == 0 {
                        1
                    } else {
                        j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                    };
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

        (best_i, best_j, best_size)
    }

    /// All matching blocks as `(a_start, b_start, size)`, sorted, ending with
    /// the zero-length sentinel block at the sequence ends.
    fn matching_blocks(&self) -> Vec<(usize, usize, usize)> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut raw: Vec<(usize, usize, usize)> = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(alo, ahi, blo, bhi);
            if k > 0 {
                raw.push((i, j, k));
                if alo < i && blo < j {
                    queue.push((alo, i, blo, j));
                }
                if i + k < ahi && j + k < bhi {
                    queue.push((i + k, ahi, j + k, bhi));
                }
            }
        }
        raw.sort_unstable();

        // Merge adjacent blocks so opcodes come out maximal
        let mut blocks: Vec<(usize, usize, usize)> = Vec::with_capacity(raw.len() + 1);
        for (i, j, k) in raw {
            match blocks.last_mut() {
                Some(last) if last.0 + last.2 == i && last.1 + last.2 == j => last.2 += k,
                _ => blocks.push((i, j, k)),
            }
        }
        blocks.push((self.a.len(), self.b.len(), 0));
        blocks
    }

    /// Full ordered edit script, including `Equal` operations.
    fn opcodes(&self) -> Vec<EditOp> {
        let mut ops = Vec::new();
        let mut i = 0;
        let mut j = 0;

        for (ai, bj, size) in self.matching_blocks() {
            let kind = match (i < ai, j < bj) {
                (true, true) => Some(OpKind::Replace),
                (true, false) => Some(OpKind::Delete),
                (false, true) => Some(OpKind::Insert),
                (false, false) => None,
            };
            if let Some(kind) = kind {
                ops.push(EditOp {
                    kind,
                    pdf: i..ai,
                    html: j..bj,
                });
            }
            if size > 0 {
                ops.push(EditOp {
                    kind: OpKind::Equal,
                    pdf: ai..ai + size,
                    html: bj..bj + size,
                });
            }
            i = ai + size;
            j = bj + size;
        }
        ops
    }
}
