// Caesar shift cracker.
//
// Tries shifts 0..26 in increasing order.  At each shift the ciphertext
// is rotated left and every target word is searched in the candidate
// plaintext.  The first shift at which any word matches is accepted and
// reported together with one trace per word, in word order; later shifts
// are never tried.  If no shift qualifies the outcome is `NotCracked`.

use log::{debug, info};

use super::matcher::{PatternMatcher, Trace};
use super::shift::{self, ALPHABET_LEN};

/// Shift code reported to callers when cracking fails.
pub const NOT_CRACKED_SHIFT: i32 = -1;

/// Search result for one target word at the accepted shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordReport {
    pub word: String,
    pub trace: Trace,
}

impl WordReport {
    pub fn matched(&self) -> bool {
        self.trace.has_match()
    }
}

/// Result of a cracking run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrackOutcome {
    /// `shift` is the first shift at which some word matched.  `reports`
    /// holds one entry per target word, in the order the words were given.
    Cracked {
        shift: u8,
        plaintext: String,
        reports: Vec<WordReport>,
    },
    /// No word matched under any shift.
    NotCracked,
}

impl CrackOutcome {
    pub fn is_cracked(&self) -> bool {
        matches!(self, Self::Cracked { .. })
    }

    pub fn shift(&self) -> Option<u8> {
        match self {
            Self::Cracked { shift, .. } => Some(*shift),
            Self::NotCracked => None,
        }
    }

    /// Accepted shift, or [`NOT_CRACKED_SHIFT`].
    pub fn shift_code(&self) -> i32 {
        self.shift().map_or(NOT_CRACKED_SHIFT, i32::from)
    }
}

#[derive(Debug, Clone)]
struct Target {
    word: String,
    matcher: PatternMatcher,
}

/// Shift cracker for a fixed, ordered list of target words.
///
/// Each word's matcher is built once and reused for all 26 shifts.
#[derive(Debug, Clone)]
pub struct CipherCracker {
    targets: Vec<Target>,
}

impl CipherCracker {
    /// Words are searched verbatim; normalize their case beforehand.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets = words
            .into_iter()
            .map(|w| {
                let word = w.into();
                let matcher = PatternMatcher::new(&word);
                Target { word, matcher }
            })
            .collect();
        Self { targets }
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|t| t.word.as_str())
    }

    fn scan(&self, plaintext: &str) -> Vec<WordReport> {
        self.targets
            .iter()
            .map(|t| WordReport {
                word: t.word.clone(),
                trace: t.matcher.find(plaintext),
            })
            .collect()
    }

    /// Search every word under a single `shift`.
    ///
    /// Returns the per-word reports only if at least one word matched.
    pub fn attempt(&self, ciphertext: &str, shift: u8) -> Option<Vec<WordReport>> {
        let reports = self.scan(&shift::decode(ciphertext, shift));
        reports.iter().any(WordReport::matched).then_some(reports)
    }

    /// Find the first shift under which any target word appears.
    pub fn crack(&self, ciphertext: &str) -> CrackOutcome {
        for shift in 0..ALPHABET_LEN {
            let plaintext = shift::decode(ciphertext, shift);
            let reports = self.scan(&plaintext);
            let hits = reports.iter().filter(|r| r.matched()).count();
            if hits > 0 {
                info!(
                    "shift {shift} accepted: {hits} of {} words matched",
                    reports.len()
                );
                return CrackOutcome::Cracked {
                    shift,
                    plaintext,
                    reports,
                };
            }
            debug!("shift {shift}: no target word found");
        }
        info!("no shift matched any of {} target words", self.targets.len());
        CrackOutcome::NotCracked
    }

    /// Every shift under which at least one target word appears.
    pub fn qualifying_shifts(&self, ciphertext: &str) -> Vec<u8> {
        shift::candidates(ciphertext)
            .filter(|(_, plaintext)| {
                self.targets
                    .iter()
                    .any(|t| t.matcher.find(plaintext).has_match())
            })
            .map(|(shift, _)| shift)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cracks_known_shift() {
        let cracker = CipherCracker::new(["HELLO", "WORLD"]);
        let outcome = cracker.crack("KHOOR ZRUOG.");
        let CrackOutcome::Cracked {
            shift,
            plaintext,
            reports,
        } = outcome
        else {
            panic!("expected a crack");
        };
        assert_eq!(shift, 3);
        assert_eq!(plaintext, "HELLO WORLD.");
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].word, "HELLO");
        assert_eq!(reports[1].word, "WORLD");
        assert!(reports.iter().all(WordReport::matched));
    }

    #[test]
    fn reports_every_word_even_unmatched() {
        let cracker = CipherCracker::new(["ZEBRA", "HELLO"]);
        let outcome = cracker.crack("KHOOR ZRUOG.");
        let CrackOutcome::Cracked { reports, .. } = outcome else {
            panic!("expected a crack");
        };
        assert_eq!(reports.len(), 2);
        assert!(!reports[0].matched());
        assert!(reports[1].matched());
    }

    #[test]
    fn first_qualifying_shift_wins() {
        // "B" appears at shift 0 and "A" at shift 1; shift 0 must win.
        let cracker = CipherCracker::new(["A", "B"]);
        assert_eq!(cracker.crack("B").shift(), Some(0));
        assert_eq!(cracker.qualifying_shifts("B"), [0, 1]);
    }

    #[test]
    fn not_cracked_sentinel() {
        let cracker = CipherCracker::new(["APPLE"]);
        let outcome = cracker.crack("KHOOR ZRUOG.");
        assert_eq!(outcome, CrackOutcome::NotCracked);
        assert_eq!(outcome.shift_code(), NOT_CRACKED_SHIFT);
        assert!(cracker.qualifying_shifts("KHOOR ZRUOG.").is_empty());
    }

    #[test]
    fn no_words_never_cracks() {
        let cracker = CipherCracker::new(Vec::<String>::new());
        assert!(!cracker.crack("ANYTHING").is_cracked());
    }

    #[test]
    fn empty_ciphertext_never_cracks() {
        let cracker = CipherCracker::new(["A"]);
        assert!(!cracker.crack("").is_cracked());
    }

    #[test]
    fn attempt_single_shift() {
        let cracker = CipherCracker::new(["HELLO"]);
        assert!(cracker.attempt("KHOOR", 2).is_none());
        let reports = cracker.attempt("KHOOR", 3).expect("shift 3 matches");
        assert_eq!(reports[0].trace.to_string(), "(0)");
    }

    #[test]
    fn shift_code_for_crack() {
        let cracker = CipherCracker::new(["HELLO"]);
        assert_eq!(cracker.crack("KHOOR").shift_code(), 3);
    }
}
