// Line-oriented puzzle input.
//
// A puzzle is read from a single stream:
//   1. symbol lines, until one leaves the decoded text ending in '.'
//   2. target words, one per line, until the terminator word (or EOF)
//
// Words are trimmed and upper-cased before they reach the cracker.
// Blank word lines are skipped.  Line endings may be LF or CRLF.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use log::{debug, warn};

use crate::cipher::shift;
use crate::symbol::{SymbolDecoder, SymbolError, SymbolTable, encode_symbols};

/// Word that ends the target list.  Compared case-insensitively.
pub const DEFAULT_TERMINATOR: &str = "fim";

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for puzzle input/output.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    Symbol {
        line: usize,
        #[source]
        source: SymbolError,
    },
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Ciphertext and target words read from one input stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Puzzle {
    pub ciphertext: String,
    pub words: Vec<String>,
}

/// Read one line into `buf` without its line ending.
///
/// Returns `false` at EOF.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    Ok(true)
}

/// Trim and upper-case a target word.
pub fn normalize_word(word: &str) -> String {
    word.trim().to_uppercase()
}

/// Decode symbol lines until the ciphertext ends with the end marker.
///
/// Hitting EOF first is not an error; whatever was decoded is returned.
pub fn read_ciphertext<R: BufRead>(
    reader: &mut R,
    table: &SymbolTable,
) -> Result<String, InputError> {
    let mut decoder = SymbolDecoder::new(table);
    let mut buf = Vec::new();
    while read_line(reader, &mut buf)? {
        if decoder.feed_line(&buf) {
            break;
        }
    }
    if !decoder.is_complete() {
        warn!(
            "symbol input ended after {} lines without an end marker",
            decoder.lines()
        );
    }
    debug!("ciphertext: {:?}", decoder.text());
    Ok(decoder.into_text())
}

/// Read normalized target words until `terminator` or EOF.
pub fn read_words<R: BufRead>(
    reader: &mut R,
    terminator: &str,
) -> Result<Vec<String>, InputError> {
    let mut words = Vec::new();
    let mut buf = Vec::new();
    let mut line = 0usize;
    while read_line(reader, &mut buf)? {
        line += 1;
        let raw = String::from_utf8_lossy(&buf);
        if raw.trim().eq_ignore_ascii_case(terminator) {
            debug!("terminator reached after {} words", words.len());
            return Ok(words);
        }
        let word = normalize_word(&raw);
        if word.is_empty() {
            warn!("word line {line}: blank, skipped");
            continue;
        }
        words.push(word);
    }
    debug!("word input ended without terminator {terminator:?}");
    Ok(words)
}

/// Read a full puzzle: symbol lines, then target words.
pub fn read_puzzle<R: BufRead>(
    reader: &mut R,
    table: &SymbolTable,
    terminator: &str,
) -> Result<Puzzle, InputError> {
    let ciphertext = read_ciphertext(reader, table)?;
    let words = read_words(reader, terminator)?;
    Ok(Puzzle { ciphertext, words })
}

/// [`read_puzzle`] over a file.
pub fn read_puzzle_file(
    path: &Path,
    table: &SymbolTable,
    terminator: &str,
) -> Result<Puzzle, InputError> {
    let mut reader = BufReader::with_capacity(BUF_SIZE, File::open(path)?);
    read_puzzle(&mut reader, table, terminator)
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Encrypt plaintext lines with a right rotation of `shift` and write
/// them as glyph symbols, one output line per input line.
///
/// Letters are upper-cased first.  Returns the number of lines written.
pub fn encode_lines<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    shift: u8,
) -> Result<usize, InputError> {
    let mut buf = Vec::new();
    let mut lines = 0usize;
    while read_line(reader, &mut buf)? {
        let plain = String::from_utf8_lossy(&buf).to_uppercase();
        let symbols = encode_symbols(&shift::encode(&plain, shift)).map_err(|source| {
            InputError::Symbol {
                line: lines + 1,
                source,
            }
        })?;
        writeln!(writer, "{symbols}")?;
        lines += 1;
    }
    Ok(lines)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::standard_table;

    const HELLO_WORLD_SHIFT3: &str = "::|...|:.|:.|..-----.|...|||:...:~~~";

    #[test]
    fn reads_puzzle_in_two_phases() {
        let input = format!("{HELLO_WORLD_SHIFT3}\nhello\n World \nfim\nignored\n");
        let table = standard_table();
        let puzzle = read_puzzle(&mut input.as_bytes(), &table, DEFAULT_TERMINATOR).unwrap();
        assert_eq!(puzzle.ciphertext, "KHOOR ZRUOG.");
        assert_eq!(puzzle.words, ["HELLO", "WORLD"]);
    }

    #[test]
    fn symbols_may_span_lines() {
        let input = "::|...|:.\r\n|:.|..---\r\n--.|...|||:...:~~~\r\nFIM\r\n";
        let table = standard_table();
        let puzzle = read_puzzle(&mut input.as_bytes(), &table, DEFAULT_TERMINATOR).unwrap();
        assert_eq!(puzzle.ciphertext, "KHOOR ZRUOG.");
        assert!(puzzle.words.is_empty());
    }

    #[test]
    fn eof_without_end_marker_is_not_an_error() {
        let table = standard_table();
        let text = read_ciphertext(&mut ":::.::".as_bytes(), &table).unwrap();
        assert_eq!(text, "AB");
        let text = read_ciphertext(&mut "".as_bytes(), &table).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn blank_word_lines_are_skipped() {
        let words = read_words(&mut "a\n\n  \nb\n".as_bytes(), "fim").unwrap();
        assert_eq!(words, ["A", "B"]);
    }

    #[test]
    fn custom_terminator() {
        let words = read_words(&mut "one\nEND\ntwo\n".as_bytes(), "end").unwrap();
        assert_eq!(words, ["ONE"]);
    }

    #[test]
    fn encode_lines_round_trips_through_reader() {
        let mut out = Vec::new();
        let n = encode_lines(&mut "hello world.\n".as_bytes(), &mut out, 3).unwrap();
        assert_eq!(n, 1);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{HELLO_WORLD_SHIFT3}\n"));
    }

    #[test]
    fn encode_lines_rejects_unknown_characters() {
        let mut out = Vec::new();
        let err = encode_lines(&mut "ok\nno!\n".as_bytes(), &mut out, 1).unwrap_err();
        assert!(matches!(err, InputError::Symbol { line: 2, .. }));
        assert_eq!(err.to_string(), "line 2: character '!' at position 2 has no symbol");
    }

    #[test]
    fn read_puzzle_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("puzzle.txt");
        std::fs::write(&path, format!("{HELLO_WORLD_SHIFT3}\nhello\nfim\n")).unwrap();
        let puzzle = read_puzzle_file(&path, &standard_table(), "fim").unwrap();
        assert_eq!(puzzle.words, ["HELLO"]);
    }
}
