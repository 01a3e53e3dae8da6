// Single-pattern substring search with the bad-character rule.
//
// The pattern is aligned against a window of the text and compared right
// to left.  On a mismatch at pattern index `j` against text byte `c`, the
// window advances by `j - last[c]`, where `last[c]` is the rightmost
// index of `c` in the pattern (-1 if absent), clamped to at least 1.
// After a full match the window advances by exactly 1, so every
// occurrence is reported, overlapping ones included.
//
// Each window position contributes one step to the resulting `Trace`:
// either the skip taken or the offset of a match.

use std::fmt;

// ---------------------------------------------------------------------------
// Trace
// ---------------------------------------------------------------------------

/// Outcome of one window alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceStep {
    /// Mismatch; the window advanced by this many bytes.
    Skip(usize),
    /// Full match starting at this text offset; the window advanced by 1.
    Match(usize),
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip(n) => write!(f, "{n}"),
            Self::Match(pos) => write!(f, "({pos})"),
        }
    }
}

/// Record of a full search pass.
///
/// Renders as the step tokens separated by single spaces, e.g. `3 3 (6) 5`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    steps: Vec<TraceStep>,
}

impl Trace {
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// True if the search made no alignment at all.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// True if at least one alignment matched.
    pub fn has_match(&self) -> bool {
        self.steps.iter().any(|s| matches!(s, TraceStep::Match(_)))
    }

    /// Match offsets in increasing order.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.steps.iter().filter_map(|s| match s {
            TraceStep::Match(pos) => Some(*pos),
            TraceStep::Skip(_) => None,
        })
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

/// Byte pattern with its precomputed last-occurrence table.
#[derive(Clone)]
pub struct PatternMatcher {
    pattern: Box<[u8]>,
    /// `last[b]` = rightmost index of byte `b` in the pattern, or -1.
    last: [isize; 256],
}

impl fmt::Debug for PatternMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternMatcher")
            .field("pattern", &String::from_utf8_lossy(&self.pattern))
            .finish_non_exhaustive()
    }
}

impl PatternMatcher {
    pub fn new(pattern: impl AsRef<[u8]>) -> Self {
        let pattern: Box<[u8]> = pattern.as_ref().into();
        let mut last = [-1isize; 256];
        for (i, &b) in pattern.iter().enumerate() {
            last[b as usize] = i as isize;
        }
        Self { pattern, last }
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// Rightmost index of `byte` in the pattern.
    pub fn last_occurrence(&self, byte: u8) -> Option<usize> {
        usize::try_from(self.last[byte as usize]).ok()
    }

    /// Scan `text` for every occurrence of the pattern.
    ///
    /// An empty pattern, or one longer than `text`, yields an empty trace.
    pub fn find(&self, text: impl AsRef<[u8]>) -> Trace {
        let text = text.as_ref();
        let m = self.pattern.len();
        let n = text.len();
        let mut steps = Vec::new();
        if m == 0 || m > n {
            return Trace { steps };
        }

        let mut s = 0usize;
        while s + m <= n {
            let window = &text[s..s + m];
            let mismatch = (0..m).rev().find(|&j| self.pattern[j] != window[j]);
            match mismatch {
                None => {
                    steps.push(TraceStep::Match(s));
                    s += 1;
                }
                Some(j) => {
                    let skip = (j as isize - self.last[window[j] as usize]).max(1) as usize;
                    steps.push(TraceStep::Skip(skip));
                    s += skip;
                }
            }
        }
        Trace { steps }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
