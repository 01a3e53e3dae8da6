// Glyph symbol layer.
//
// This module provides:
// - `table` — chained hash table with the base-11 polynomial bucket hash
// - `dict`  — the fixed 28-entry glyph dictionary and line decoding

pub mod dict;
pub mod table;

pub use dict::{
    DICTIONARY, END_MARKER, NO_MAPPING, SYMBOL_LEN, SymbolDecoder, decode_symbols,
    encode_symbols, standard_table,
};
pub use table::{BUCKETS, Entry, HASH_BASE, SymbolTable, fast_exp, symbol_hash};

/// Errors raised when mapping text back to glyph symbols.
#[derive(Debug, thiserror::Error)]
pub enum SymbolError {
    #[error("character {ch:?} at position {pos} has no symbol")]
    Unencodable { ch: char, pos: usize },
}
