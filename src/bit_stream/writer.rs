//! Append-only bit stream exported as a packed string.
use crate::error::{Error, Result};
use crate::packed::{self, UNIT_LEN};

/// The number of bits in a machine word.
pub const WORD_LEN: usize = std::mem::size_of::<u64>() * 8;

/// Append-only sequence of bits, exportable as a packed string.
///
/// Fields are appended most-significant bit first. This is part of the encoder,
/// so it is tuned for simplicity rather than speed.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use succinct_trie::bit_stream::BitWriter;
///
/// let mut writer = BitWriter::new();
/// writer.write(3, 2)?;
/// assert_eq!(writer.to_packed(), "w");
///
/// writer.write(0, 3)?;
/// writer.write(2, 2)?;
/// assert_eq!(writer.len(), 7);
/// assert_eq!(writer.to_packed(), "xA");
/// assert_eq!(writer.debug_string(3), "110 001 0");
/// # Ok(())
/// # }
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BitWriter {
    words: Vec<u64>,
    len: usize,
}

impl BitWriter {
    /// Creates a new empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new writer in which at least `capa` bits are reserved.
    pub fn with_capacity(capa: usize) -> Self {
        Self {
            words: Vec::with_capacity(Self::words_for(capa)),
            len: 0,
        }
    }

    /// Appends the lowest `num_bits` bits of `value`, most-significant bit first.
    ///
    /// # Arguments
    ///
    ///  - `value`: Integer to be written. Bits above `num_bits` are ignored.
    ///  - `num_bits`: Number of bits to write.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidWidth`] is returned if `num_bits` is greater than 64.
    pub fn write(&mut self, value: u64, num_bits: usize) -> Result<()> {
        if num_bits > WORD_LEN {
            return Err(Error::InvalidWidth(num_bits));
        }
        for i in (0..num_bits).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        Ok(())
    }

    /// Appends a single bit.
    #[inline(always)]
    pub fn push_bit(&mut self, bit: bool) {
        let pos_in_word = self.len % WORD_LEN;
        if pos_in_word == 0 {
            self.words.push(bit as u64);
        } else if let Some(cur_word) = self.words.last_mut() {
            *cur_word |= (bit as u64) << pos_in_word;
        }
        self.len += 1;
    }

    /// Returns the `pos`-th bit, or [`None`] if out of bounds.
    #[inline(always)]
    pub fn get_bit(&self, pos: usize) -> Option<bool> {
        if pos < self.len {
            let (block, shift) = (pos / WORD_LEN, pos % WORD_LEN);
            Some((self.words[block] >> shift) & 1 == 1)
        } else {
            None
        }
    }

    /// Creates an iterator for enumerating the written bits.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |pos| (self.words[pos / WORD_LEN] >> (pos % WORD_LEN)) & 1 == 1)
    }

    /// Packs the written bits into a string of 6-bit symbols.
    ///
    /// A final partial group is left-justified and zero-filled in its low bits.
    /// No padding symbols are appended.
    pub fn to_packed(&self) -> String {
        let mut out = String::with_capacity(self.len / UNIT_LEN + 1);
        let (mut unit, mut filled) = (0u8, 0);
        for bit in self.iter() {
            unit = (unit << 1) | bit as u8;
            filled += 1;
            if filled == UNIT_LEN {
                out.push(packed::chr(unit));
                unit = 0;
                filled = 0;
            }
        }
        if filled != 0 {
            out.push(packed::chr(unit << (UNIT_LEN - filled)));
        }
        out
    }

    /// Renders the bits as `0`/`1` characters, separated by a space every `group` bits.
    ///
    /// No separators are inserted if `group == 0`.
    pub fn debug_string(&self, group: usize) -> String {
        let mut out = String::with_capacity(self.len * 2);
        for (i, bit) in self.iter().enumerate() {
            if group != 0 && i != 0 && i % group == 0 {
                out.push(' ');
            }
            out.push(if bit { '1' } else { '0' });
        }
        out
    }

    /// Returns the number of bits written.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if no bits have been written.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    const fn words_for(n: usize) -> usize {
        (n + WORD_LEN - 1) / WORD_LEN
    }
}
