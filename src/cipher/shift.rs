// Caesar rotation over ASCII letters.
//
// `decode` rotates every letter left by `shift` (undoing a right-rotation
// cipher); `encode` rotates right.  Case is preserved and every
// non-letter character (space, period, the unmapped sentinel, anything
// else) passes through unchanged.  Shift amounts are taken modulo 26.

/// Letters in the rotation alphabet; valid shifts are `0..ALPHABET_LEN`.
pub const ALPHABET_LEN: u8 = 26;

#[inline]
fn rotate_left(c: char, shift: u8) -> char {
    let base = match c {
        'A'..='Z' => b'A',
        'a'..='z' => b'a',
        _ => return c,
    };
    let idx = c as u8 - base;
    char::from((idx + ALPHABET_LEN - shift % ALPHABET_LEN) % ALPHABET_LEN + base)
}

/// Rotate every letter of `text` left by `shift`.
pub fn decode(text: &str, shift: u8) -> String {
    text.chars().map(|c| rotate_left(c, shift)).collect()
}

/// Rotate every letter of `text` right by `shift`; inverse of [`decode`].
pub fn encode(text: &str, shift: u8) -> String {
    decode(text, ALPHABET_LEN - shift % ALPHABET_LEN)
}

/// Every candidate plaintext of `text`, in shift order 0..26.
pub fn candidates(text: &str) -> impl Iterator<Item = (u8, String)> + '_ {
    (0..ALPHABET_LEN).map(move |shift| (shift, decode(text, shift)))
}
