//! Glyphcrack: glyph-symbol decoding and Caesar shift cracking in Rust.
//!
//! The crate provides:
//! - A chained symbol hash table with a polynomial bucket hash (`symbol`)
//! - Caesar rotation, a bad-character substring matcher and the shift
//!   cracker that uses it as an oracle (`cipher`)
//! - Line-oriented puzzle input helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use glyphcrack::cipher::{CipherCracker, CrackOutcome};
//! use glyphcrack::symbol::{self, SymbolDecoder};
//!
//! let table = symbol::standard_table();
//! let mut decoder = SymbolDecoder::new(&table);
//! // "KHOOR ZRUOG." in glyphs.
//! decoder.feed_line(b"::|...|:.|:.|..-----.|...|||:...:~~~");
//! assert!(decoder.is_complete());
//!
//! let cracker = CipherCracker::new(["HELLO", "WORLD"]);
//! match cracker.crack(decoder.text()) {
//!     CrackOutcome::Cracked { shift, plaintext, .. } => {
//!         assert_eq!(shift, 3);
//!         assert_eq!(plaintext, "HELLO WORLD.");
//!     }
//!     CrackOutcome::NotCracked => unreachable!(),
//! }
//! ```

pub mod cipher;
pub mod io;
pub mod symbol;

#[cfg(feature = "cli")]
pub mod cli;
