//! Fixed alphabet of word symbols and their integer codes.
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::utils;

/// Symbols of the default alphabet: lowercase ASCII letters and the space.
pub const DEFAULT_SYMBOLS: &str = "abcdefghijklmnopqrstuvwxyz ";

/// Bijective mapping between symbols and codes in `[0, k)` for `k` symbols.
///
/// A node payload in the encoded trie takes [`Self::data_bits()`] bits:
/// one bit for the final-word flag followed by the code of the node's symbol.
/// The builder and the decoder must be given the identical alphabet;
/// [`Self::fingerprint()`] can be stored alongside an encoded trie to detect a mismatch.
///
/// Symbols are Unicode scalar values, so multi-byte characters are single symbols.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use succinct_trie::Alphabet;
///
/// let alphabet = Alphabet::new("abcāī")?;
///
/// assert_eq!(alphabet.len(), 5);
/// assert_eq!(alphabet.data_bits(), 4);
/// assert_eq!(alphabet.encode('ā')?, 3);
/// assert_eq!(alphabet.decode(4)?, 'ī');
/// assert!(alphabet.encode('z').is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    codes: HashMap<char, u64>,
    data_bits: usize,
}

impl Alphabet {
    /// Creates an alphabet whose symbols are the characters of `symbols`, in order.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAlphabet`] is returned if `symbols` is empty or has duplicates.
    pub fn new(symbols: &str) -> Result<Self> {
        Self::from_symbols(symbols.chars())
    }

    /// Creates an alphabet from an iterator of symbols.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAlphabet`] is returned if `symbols` is empty or has duplicates.
    pub fn from_symbols<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(Error::InvalidAlphabet(
                "alphabet must have at least one symbol".to_string(),
            ));
        }
        let alphabet = Self::from_distinct(symbols);
        // A repeated symbol keeps only its last code.
        if let Some((_, &c)) = alphabet
            .symbols
            .iter()
            .enumerate()
            .find(|&(code, c)| alphabet.codes[c] != code as u64)
        {
            return Err(Error::InvalidAlphabet(format!("duplicated symbol {c:?}")));
        }
        Ok(alphabet)
    }

    fn from_distinct(symbols: Vec<char>) -> Self {
        let codes = symbols
            .iter()
            .enumerate()
            .map(|(code, &c)| (c, code as u64))
            .collect();
        // One more bit for the final-word flag.
        let data_bits = utils::ceil_log2(symbols.len()) + 1;
        Self {
            symbols,
            codes,
            data_bits,
        }
    }

    /// Returns the code of `symbol`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownSymbol`] is returned if `symbol` is not in the alphabet.
    #[inline(always)]
    pub fn encode(&self, symbol: char) -> Result<u64> {
        self.codes
            .get(&symbol)
            .copied()
            .ok_or(Error::UnknownSymbol(symbol))
    }

    /// Returns the symbol of `code`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCode`] is returned if `code` is not in `[0, self.len())`.
    #[inline(always)]
    pub fn decode(&self, code: u64) -> Result<char> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.symbols.get(i))
            .copied()
            .ok_or(Error::InvalidCode(code))
    }

    /// Returns the number of bits in a node payload, i.e., `ceil(log2(k)) + 1`.
    #[inline(always)]
    pub const fn data_bits(&self) -> usize {
        self.data_bits
    }

    /// Returns the number of bits of a symbol code, i.e., `self.data_bits() - 1`.
    #[inline(always)]
    pub const fn code_bits(&self) -> usize {
        self.data_bits - 1
    }

    /// Returns the number of symbols.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`, since an alphabet has at least one symbol.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Checks if `symbol` is in the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.codes.contains_key(&symbol)
    }

    /// Returns the symbols in code order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Returns a stable 64-bit FNV-1a hash of the ordered symbols.
    ///
    /// Two alphabets have the same fingerprint if they assign the same codes
    /// (barring hash collisions), independent of platform and process.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use succinct_trie::Alphabet;
    ///
    /// let a = Alphabet::new("abc")?;
    /// let b = Alphabet::new("abc")?;
    /// let c = Alphabet::new("acb")?;
    ///
    /// assert_eq!(a.fingerprint(), b.fingerprint());
    /// assert_ne!(a.fingerprint(), c.fingerprint());
    /// # Ok(())
    /// # }
    /// ```
    pub fn fingerprint(&self) -> u64 {
        const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0000_0100_0000_01b3;

        let mut hash = OFFSET_BASIS;
        let mut buf = [0; 4];
        for &c in &self.symbols {
            for &b in c.encode_utf8(&mut buf).as_bytes() {
                hash ^= u64::from(b);
                hash = hash.wrapping_mul(PRIME);
            }
            // Separator so that symbol boundaries contribute to the hash.
            hash ^= 0xFF;
            hash = hash.wrapping_mul(PRIME);
        }
        hash
    }
}

impl Default for Alphabet {
    /// Creates the alphabet of [`DEFAULT_SYMBOLS`].
    fn default() -> Self {
        Self::from_distinct(DEFAULT_SYMBOLS.chars().collect())
    }
}

impl std::str::FromStr for Alphabet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALI_SYMBOLS: &str = "abcdeghijklmnoprstuvyāīūṁṃŋṇṅñṭḍḷ…'’° -";

    #[test]
    fn test_default() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.len(), 27);
        assert_eq!(alphabet.data_bits(), 6);
        assert_eq!(alphabet.encode('a').unwrap(), 0);
        assert_eq!(alphabet.encode(' ').unwrap(), 26);
        assert_eq!(alphabet, Alphabet::new(DEFAULT_SYMBOLS).unwrap());
    }

    #[test]
    fn test_multi_byte_symbols() {
        let alphabet = Alphabet::new(PALI_SYMBOLS).unwrap();
        assert_eq!(alphabet.len(), 39);
        assert_eq!(alphabet.data_bits(), 7);
        for (code, &c) in alphabet.symbols().iter().enumerate() {
            assert_eq!(alphabet.encode(c).unwrap(), code as u64);
            assert_eq!(alphabet.decode(code as u64).unwrap(), c);
        }
        assert_eq!(alphabet.decode(39), Err(Error::InvalidCode(39)));
        assert_eq!(alphabet.encode('f'), Err(Error::UnknownSymbol('f')));
    }

    #[test]
    fn test_data_bits() {
        assert_eq!(Alphabet::new("a").unwrap().data_bits(), 1);
        assert_eq!(Alphabet::new("ab").unwrap().data_bits(), 2);
        assert_eq!(Alphabet::new("abc").unwrap().data_bits(), 3);
        assert_eq!(Alphabet::new("abcd").unwrap().data_bits(), 3);
        assert_eq!(Alphabet::new("abcde").unwrap().data_bits(), 4);
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(Alphabet::new(""), Err(Error::InvalidAlphabet(_))));
        assert!(matches!(
            Alphabet::new("abca"),
            Err(Error::InvalidAlphabet(_))
        ));
        assert_eq!(
            Alphabet::new("xbcbb"),
            Err(Error::InvalidAlphabet("duplicated symbol 'b'".to_string()))
        );
        assert_eq!(
            Alphabet::from_symbols(DEFAULT_SYMBOLS.chars().chain(['a'])),
            Err(Error::InvalidAlphabet("duplicated symbol 'a'".to_string()))
        );
    }

    #[test]
    fn test_fingerprint_respects_boundaries() {
        let a = Alphabet::default();
        assert_eq!(a.fingerprint(), Alphabet::default().fingerprint());
        assert_ne!(
            a.fingerprint(),
            Alphabet::new(PALI_SYMBOLS).unwrap().fingerprint()
        );
    }
}
