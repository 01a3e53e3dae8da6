// Caesar cracking pipeline.
//
// - `shift`   — left/right letter rotation and the 26 candidate plaintexts
// - `matcher` — bad-character substring search producing a `Trace`
// - `cracker` — tries shifts in order and accepts the first with any match

pub mod cracker;
pub mod matcher;
pub mod shift;

pub use cracker::{CipherCracker, CrackOutcome, NOT_CRACKED_SHIFT, WordReport};
pub use matcher::{PatternMatcher, Trace, TraceStep};
pub use shift::ALPHABET_LEN;
