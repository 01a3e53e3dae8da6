// The fixed glyph dictionary and symbol-stream decoding.
//
// Symbols are 3-byte tokens over the glyphs `:`, `.`, `|` (plus `-` and
// `~` for the last few entries).  Symbol input arrives line by line;
// each line is cut into consecutive 3-byte tokens and every token is
// looked up.  Input ends after the first line whose decoded text ends
// with `END_MARKER`.

use log::{debug, warn};

use super::SymbolError;
use super::table::SymbolTable;

/// Length in bytes of one symbol token.
pub const SYMBOL_LEN: usize = 3;

/// Letter that terminates symbol input.
pub const END_MARKER: char = '.';

/// Substituted for tokens with no dictionary entry.
pub const NO_MAPPING: char = '\0';

/// The 28 configured (symbol, letter) pairs, in insertion order.
pub const DICTIONARY: [(&str, char); 28] = [
    (":::", 'A'),
    (".::", 'B'),
    (":.:", 'C'),
    ("::.", 'D'),
    (":..", 'E'),
    (".:.", 'F'),
    ("..:", 'G'),
    ("...", 'H'),
    ("|::", 'I'),
    (":|:", 'J'),
    ("::|", 'K'),
    ("|.:", 'L'),
    (".|:", 'M'),
    (".:|", 'N'),
    ("|:.", 'O'),
    (":|.", 'P'),
    (":.|", 'Q'),
    ("|..", 'R'),
    (".|.", 'S'),
    ("..|", 'T'),
    (".||", 'U'),
    ("|.|", 'V'),
    ("||.", 'W'),
    ("-.-", 'X'),
    (".--", 'Y'),
    ("--.", 'Z'),
    ("---", ' '),
    ("~~~", '.'),
];

/// Table holding exactly the `DICTIONARY` entries.
pub fn standard_table() -> SymbolTable {
    DICTIONARY.iter().copied().collect()
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Line-at-a-time symbol decoder.
///
/// Accumulates the decoded ciphertext until a line leaves it ending in
/// `END_MARKER`.  Unknown tokens decode to `NO_MAPPING`.
#[derive(Debug)]
pub struct SymbolDecoder<'t> {
    table: &'t SymbolTable,
    text: String,
    lines: usize,
    complete: bool,
}

impl<'t> SymbolDecoder<'t> {
    pub fn new(table: &'t SymbolTable) -> Self {
        Self {
            table,
            text: String::new(),
            lines: 0,
            complete: false,
        }
    }

    /// Decode one input line and report whether symbol input is complete.
    ///
    /// Lines fed after completion are ignored.
    pub fn feed_line(&mut self, line: &[u8]) -> bool {
        if self.complete {
            debug!("symbol input already complete, ignoring line");
            return true;
        }
        for token in line.chunks(SYMBOL_LEN) {
            if token.len() < SYMBOL_LEN {
                warn!(
                    "line {}: trailing partial symbol {:?}",
                    self.lines + 1,
                    String::from_utf8_lossy(token)
                );
            }
            self.text
                .push(self.table.lookup(token).unwrap_or(NO_MAPPING));
        }
        self.lines += 1;
        self.complete = self.text.ends_with(END_MARKER);
        self.complete
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Number of lines consumed so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Ciphertext decoded so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Decode a concatenated token stream as a single line.
pub fn decode_symbols(table: &SymbolTable, symbols: &[u8]) -> String {
    let mut decoder = SymbolDecoder::new(table);
    decoder.feed_line(symbols);
    decoder.into_text()
}

/// Map each character of `text` back to its dictionary symbol.
pub fn encode_symbols(text: &str) -> Result<String, SymbolError> {
    let mut out = String::with_capacity(text.len() * SYMBOL_LEN);
    for (pos, ch) in text.chars().enumerate() {
        let (symbol, _) = DICTIONARY
            .iter()
            .find(|(_, letter)| *letter == ch)
            .ok_or(SymbolError::Unencodable { ch, pos })?;
        out.push_str(symbol);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::table::BUCKETS;

    #[test]
    fn standard_table_has_every_entry() {
        let t = standard_table();
        assert_eq!(t.len(), DICTIONARY.len());
        assert_eq!(t.iter().count(), DICTIONARY.len());
        for (symbol, letter) in DICTIONARY {
            assert_eq!(t.lookup(symbol), Some(letter), "symbol {symbol}");
        }
    }

    #[test]
    fn standard_table_bucket_layout() {
        let t = standard_table();
        let letters = |i: usize| -> String { t.bucket(i).iter().map(|e| e.letter).collect() };
        assert_eq!(letters(4), "EPQ");
        assert_eq!(letters(5), " ");
        assert_eq!(letters(6), "DKZ");
        assert_eq!(letters(8), "HRSTUVW");
        assert_eq!(letters(10), "FNO");
        assert_eq!(letters(14), ".");
        assert_eq!(letters(16), "CJX");
        assert_eq!(letters(18), "A");
        assert_eq!(letters(20), "GLM");
        assert_eq!(letters(22), "BIY");
        let empty = (0..BUCKETS).filter(|&i| t.bucket(i).is_empty()).count();
        assert_eq!(empty, 16);
    }

    #[test]
    fn unknown_symbol_is_unmapped() {
        let t = standard_table();
        assert_eq!(t.lookup("|||"), None);
        assert_eq!(t.lookup("::"), None);
        assert_eq!(decode_symbols(&t, b":::|||"), "A\0");
    }

    #[test]
    fn decoder_completes_on_trailing_marker() {
        let t = standard_table();
        let mut d = SymbolDecoder::new(&t);
        assert!(!d.feed_line(b"...:..|.:|.:|:."));
        assert_eq!(d.text(), "HELLO");
        assert!(d.feed_line(b"---||.|:.|..|.:::.~~~"));
        assert_eq!(d.text(), "HELLO WORLD.");
        assert_eq!(d.lines(), 2);
    }

    #[test]
    fn decoder_ignores_lines_after_completion() {
        let t = standard_table();
        let mut d = SymbolDecoder::new(&t);
        assert!(d.feed_line(b"~~~"));
        assert!(d.feed_line(b":::"));
        assert_eq!(d.text(), ".");
        assert_eq!(d.lines(), 1);
    }

    #[test]
    fn marker_mid_line_does_not_complete() {
        let t = standard_table();
        let mut d = SymbolDecoder::new(&t);
        assert!(!d.feed_line(b"~~~:::"));
        assert_eq!(d.text(), ".A");
    }

    #[test]
    fn empty_line_does_not_complete() {
        let t = standard_table();
        let mut d = SymbolDecoder::new(&t);
        assert!(!d.feed_line(b""));
        assert_eq!(d.text(), "");
        assert!(!d.is_complete());
    }

    #[test]
    fn partial_token_maps_to_sentinel() {
        let t = standard_table();
        assert_eq!(decode_symbols(&t, b":::.:"), format!("A{NO_MAPPING}"));
    }

    #[test]
    fn encode_symbols_inverts_dictionary() {
        let t = standard_table();
        let symbols = encode_symbols("HELLO WORLD.").unwrap();
        assert_eq!(symbols.len(), 12 * SYMBOL_LEN);
        assert_eq!(decode_symbols(&t, symbols.as_bytes()), "HELLO WORLD.");
    }

    #[test]
    fn encode_symbols_rejects_unknown() {
        let err = encode_symbols("AB?").unwrap_err();
        assert!(matches!(err, SymbolError::Unencodable { ch: '?', pos: 2 }));
    }
}
