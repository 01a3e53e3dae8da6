// Chained hash table mapping glyph symbols to output characters.
//
// Fixed bucket array (`BUCKETS` = 26), each bucket an ordered list of
// entries.  Insertion appends to the bucket; lookup and removal scan it
// front to back, so the first entry inserted for a symbol shadows any
// later duplicates.
//
// The bucket index is a polynomial hash over the symbol bytes:
//
//   hash = sum(byte[i] * BASE^(len - 1 - i)) mod BUCKETS
//
// accumulated modulo BUCKETS, with each power computed by `fast_exp`.
// Bucket placement (and therefore the order of colliding entries) is
// fully determined by this arithmetic.

use std::fmt;

/// Number of buckets.
pub const BUCKETS: usize = 26;

/// Base of the polynomial symbol hash.
pub const HASH_BASE: u64 = 11;

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// Binary modular exponentiation: `base^exponent mod modulus`.
///
/// Both factors are reduced before every multiplication, so the
/// intermediate product stays below `modulus^2`.  `modulus` must be
/// non-zero and fit in 32 bits.
pub fn fast_exp(mut base: u64, mut exponent: u64, modulus: u64) -> u64 {
    debug_assert!(modulus != 0 && modulus <= u64::from(u32::MAX));
    let mut acc = 1u64;
    while exponent != 0 {
        if exponent & 1 == 1 {
            acc = (acc % modulus) * (base % modulus) % modulus;
        }
        base = (base % modulus) * (base % modulus) % modulus;
        exponent >>= 1;
    }
    acc % modulus
}

/// Bucket index for `symbol`.
#[inline]
pub fn symbol_hash(symbol: &[u8]) -> usize {
    let modulus = BUCKETS as u64;
    let len = symbol.len() as u64;
    let mut hash = 0u64;
    for (i, &b) in symbol.iter().enumerate() {
        let weight = fast_exp(HASH_BASE, len - i as u64 - 1, modulus);
        hash = (hash + u64::from(b) * weight) % modulus;
    }
    (hash % modulus) as usize
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// A single (symbol, letter) pair stored in a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub symbol: Box<[u8]>,
    pub letter: char,
}

/// Symbol-to-letter table with separate chaining.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    buckets: Vec<Vec<Entry>>,
    len: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Create an empty table with `BUCKETS` buckets.
    pub fn new() -> Self {
        Self {
            buckets: vec![Vec::new(); BUCKETS],
            len: 0,
        }
    }

    /// Append an entry to the bucket selected by `symbol_hash`.
    ///
    /// Duplicates are kept; the earlier entry keeps winning lookups.
    pub fn insert(&mut self, symbol: impl AsRef<[u8]>, letter: char) {
        let symbol = symbol.as_ref();
        let bucket = symbol_hash(symbol);
        self.buckets[bucket].push(Entry {
            symbol: symbol.into(),
            letter,
        });
        self.len += 1;
    }

    /// Letter of the first entry matching `symbol`, if any.
    pub fn lookup(&self, symbol: impl AsRef<[u8]>) -> Option<char> {
        let symbol = symbol.as_ref();
        self.buckets[symbol_hash(symbol)]
            .iter()
            .find(|e| &*e.symbol == symbol)
            .map(|e| e.letter)
    }

    /// Remove the first entry matching `symbol`.
    ///
    /// Returns the removed letter, or `None` (and leaves the table
    /// untouched) if no entry matches.
    pub fn remove(&mut self, symbol: impl AsRef<[u8]>) -> Option<char> {
        let symbol = symbol.as_ref();
        let bucket = &mut self.buckets[symbol_hash(symbol)];
        let idx = bucket.iter().position(|e| &*e.symbol == symbol)?;
        self.len -= 1;
        Some(bucket.remove(idx).letter)
    }

    /// Total number of entries across all buckets.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Entries of bucket `index` in insertion order.
    ///
    /// Panics if `index >= BUCKETS`.
    pub fn bucket(&self, index: usize) -> &[Entry] {
        &self.buckets[index]
    }

    /// All entries, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.buckets.iter().flatten()
    }
}

impl<S: AsRef<[u8]>> FromIterator<(S, char)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (S, char)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, letter) in iter {
            table.insert(symbol, letter);
        }
        table
    }
}

/// Bucket dump, one line per bucket.
impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[==== HASH TABLE ====]")?;
        for (i, bucket) in self.buckets.iter().enumerate() {
            write!(f, "{i}| ")?;
            for entry in bucket {
                let symbol = String::from_utf8_lossy(&entry.symbol);
                write!(f, "({symbol}, {}) ", entry.letter)?;
            }
            if bucket.is_empty() {
                write!(f, "(NULL)")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "[=====================]")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
