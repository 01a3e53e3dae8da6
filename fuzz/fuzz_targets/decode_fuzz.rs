#![no_main]
use glyphcrack::cipher::{CipherCracker, CrackOutcome};
use glyphcrack::io::{DEFAULT_TERMINATOR, read_puzzle};
use glyphcrack::symbol;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let table = symbol::standard_table();
    let mut reader = data;
    let Ok(puzzle) = read_puzzle(&mut reader, &table, DEFAULT_TERMINATOR) else {
        return;
    };
    let outcome = CipherCracker::new(puzzle.words.iter().cloned()).crack(&puzzle.ciphertext);
    if let CrackOutcome::Cracked { reports, .. } = &outcome {
        assert_eq!(reports.len(), puzzle.words.len());
        assert!(reports.iter().any(|r| r.matched()));
    }
});
