//! The 64-symbol table used to pack bit streams into strings.
//!
//! Every packed symbol carries exactly [`UNIT_LEN`] bits, most-significant first.
//! The table is the URL-safe base64 alphabet, and packed strings are never padded.

use crate::error::{Error, Result};

/// The number of bits carried by one packed symbol.
pub const UNIT_LEN: usize = 6;

/// Packing table; the index of a symbol is the value it carries.
pub const TABLE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

const INVALID: u8 = 0xFF;

const REVERSE: [u8; 256] = {
    let mut rev = [INVALID; 256];
    let mut i = 0;
    while i < TABLE.len() {
        rev[TABLE[i] as usize] = i as u8;
        i += 1;
    }
    rev
};

/// Returns the packed symbol carrying `value`.
///
/// Only the lowest [`UNIT_LEN`] bits of `value` are used.
///
/// # Examples
///
/// ```
/// use succinct_trie::packed::chr;
///
/// assert_eq!(chr(0), 'A');
/// assert_eq!(chr(48), 'w');
/// assert_eq!(chr(63), '_');
/// ```
#[inline(always)]
pub const fn chr(value: u8) -> char {
    TABLE[(value & 0x3F) as usize] as char
}

/// Returns the value carried by the packed symbol `c`.
///
/// # Errors
///
/// [`Error::InvalidPackedSymbol`] is returned if `c` is not in [`TABLE`].
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use succinct_trie::packed::ord;
///
/// assert_eq!(ord('A')?, 0);
/// assert_eq!(ord('_')?, 63);
/// assert!(ord('=').is_err());
/// # Ok(())
/// # }
/// ```
#[inline(always)]
pub fn ord(c: char) -> Result<u8> {
    if c.is_ascii() {
        let v = REVERSE[c as usize];
        if v != INVALID {
            return Ok(v);
        }
    }
    Err(Error::InvalidPackedSymbol(c))
}

/// Returns the value carried by the byte `b` of a validated packed string.
///
/// Bytes outside [`TABLE`] map to `0xFF`.
#[inline(always)]
pub(crate) const fn ord_byte(b: u8) -> u8 {
    REVERSE[b as usize]
}

/// Checks that every character of `packed` is in [`TABLE`].
///
/// # Errors
///
/// [`Error::InvalidPackedSymbol`] is returned on the first character outside [`TABLE`].
pub fn validate(packed: &str) -> Result<()> {
    packed.chars().try_for_each(|c| ord(c).map(|_| ()))
}

/// Unpacks a string into the values of its symbols.
///
/// # Errors
///
/// [`Error::InvalidPackedSymbol`] is returned on the first character outside [`TABLE`].
pub fn unpack(packed: &str) -> Result<Vec<u8>> {
    packed.chars().map(ord).collect()
}
