//! Random-access reader over a packed bit stream.
use crate::error::{Error, Result};
use crate::packed::{self, UNIT_LEN};

/// Masks keeping the low `UNIT_LEN - i` bits of a unit, for a read starting at offset `i`.
const MASK_TOP: [u8; UNIT_LEN + 1] = [0x3f, 0x1f, 0x0f, 0x07, 0x03, 0x01, 0x00];

/// Number of set bits of every byte value.
pub const BITS_IN_BYTE: [u8; 256] = {
    let mut table = [0; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = (i as u8).count_ones() as u8;
        i += 1;
    }
    table
};

/// Immutable bit stream over a packed string, supporting random-access reads of
/// fields of up to 64 bits and population counts.
///
/// The length of the stream is the number of packed symbols times 6,
/// so it includes the zero bits filling the final symbol.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use succinct_trie::bit_stream::BitReader;
///
/// let reader = BitReader::new("88kj5w_6phb")?;
///
/// assert_eq!(reader.len(), 66);
/// assert_eq!(reader.get(5, 7)?, 60);
/// assert_eq!(reader.get(33, 17)?, 16362);
/// assert_eq!(reader.count(0, 17)?, 10);
/// assert_eq!(reader.rank_slow(24)?, 14);
/// assert!(reader.get(60, 7).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BitReader {
    // Validated at construction, so every byte is in the packing table.
    packed: String,
}

impl BitReader {
    /// Creates a reader over the packed string `packed`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPackedSymbol`] is returned if `packed` contains a character
    /// outside the packing table.
    pub fn new(packed: &str) -> Result<Self> {
        packed::validate(packed)?;
        Ok(Self {
            packed: packed.to_string(),
        })
    }

    /// Returns the packed string.
    pub fn as_str(&self) -> &str {
        &self.packed
    }

    /// Returns the number of bits.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.packed.len() * UNIT_LEN
    }

    /// Checks if the stream is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.packed.is_empty()
    }

    /// Returns the integer formed by the bits in `[pos, pos + n)`, the bit at `pos`
    /// being the most significant.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidWidth`] is returned if `n > 64`.
    /// - [`Error::BufferBounds`] is returned if `pos + n > self.len()`.
    pub fn get(&self, pos: usize, n: usize) -> Result<u64> {
        self.check_range(pos, n)?;
        if n > 64 {
            return Err(Error::InvalidWidth(n));
        }
        if n == 0 {
            return Ok(0);
        }
        Ok(self.get_unchecked(pos, n))
    }

    /// Returns the number of bits set in `[pos, pos + n)`.
    ///
    /// # Errors
    ///
    /// [`Error::BufferBounds`] is returned if `pos + n > self.len()`.
    pub fn count(&self, mut pos: usize, mut n: usize) -> Result<usize> {
        self.check_range(pos, n)?;
        let mut count = 0;
        while n >= 8 {
            count += BITS_IN_BYTE[self.get_unchecked(pos, 8) as usize] as usize;
            pos += 8;
            n -= 8;
        }
        if n != 0 {
            count += BITS_IN_BYTE[self.get_unchecked(pos, n) as usize] as usize;
        }
        Ok(count)
    }

    /// Returns the number of bits set in `[0, x]`, scanning bit by bit.
    ///
    /// This is a reference implementation for validating faster rank indexes.
    ///
    /// # Errors
    ///
    /// [`Error::BufferBounds`] is returned if `x >= self.len()`.
    pub fn rank_slow(&self, x: usize) -> Result<usize> {
        self.check_range(x, 1)?;
        let mut rank = 0;
        for pos in 0..=x {
            rank += self.get_unchecked(pos, 1) as usize;
        }
        Ok(rank)
    }

    fn check_range(&self, pos: usize, n: usize) -> Result<()> {
        match pos.checked_add(n) {
            Some(end) if end <= self.len() => Ok(()),
            _ => Err(Error::BufferBounds {
                pos,
                len: n,
                available: self.len(),
            }),
        }
    }

    #[inline(always)]
    fn unit(&self, i: usize) -> u8 {
        packed::ord_byte(self.packed.as_bytes()[i])
    }

    /// Reads `n` bits at `pos`, assuming `1 <= n <= 64` and the range is in bounds.
    #[inline(always)]
    fn get_unchecked(&self, mut pos: usize, mut n: usize) -> u64 {
        let offset = pos % UNIT_LEN;
        let head = u64::from(self.unit(pos / UNIT_LEN) & MASK_TOP[offset]);

        // The bits lie within one unit.
        if offset + n <= UNIT_LEN {
            return head >> (UNIT_LEN - offset - n);
        }

        let mut result = head;
        let l = UNIT_LEN - offset;
        pos += l;
        n -= l;

        while n >= UNIT_LEN {
            result = (result << UNIT_LEN) | u64::from(self.unit(pos / UNIT_LEN));
            pos += UNIT_LEN;
            n -= UNIT_LEN;
        }

        if n > 0 {
            result = (result << n) | u64::from(self.unit(pos / UNIT_LEN) >> (UNIT_LEN - n));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    use crate::bit_stream::BitWriter;

    #[test]
    fn test_tiny_reads() {
        let reader = BitReader::new("88kj5w_6phb").unwrap();
        assert_eq!(reader.as_str(), "88kj5w_6phb");

        assert_eq!(reader.rank_slow(5).unwrap(), 4);
        assert_eq!(reader.rank_slow(24).unwrap(), 14);
        assert_eq!(reader.rank_slow(37).unwrap(), 21);
        assert_eq!(reader.rank_slow(55).unwrap(), 33);
        assert_eq!(reader.rank_slow(65).unwrap(), 38);

        assert_eq!(reader.get(5, 7).unwrap(), 60);
        assert_eq!(reader.get(7, 13).unwrap(), 7314);
        assert_eq!(reader.get(0, 5).unwrap(), 30);
        assert_eq!(reader.get(3, 3).unwrap(), 4);
        assert_eq!(reader.get(33, 17).unwrap(), 16362);

        assert_eq!(reader.count(0, 17).unwrap(), 10);
        assert_eq!(reader.count(7, 2).unwrap(), 2);
        assert_eq!(reader.count(56, 9).unwrap(), 4);
        assert_eq!(reader.count(12, 1).unwrap(), 1);
        assert_eq!(reader.count(5, 7).unwrap(), 4);
    }

    #[test]
    fn test_holds_only_packed_string() {
        assert_eq!(std::mem::size_of::<BitReader>(), std::mem::size_of::<String>());

        let reader = BitReader::new("w_").unwrap();
        assert_eq!(reader.as_str(), "w_");
        assert_eq!(reader.get(0, 12).unwrap(), 0b110000_111111);
        assert_eq!(
            BitReader::new("w=").unwrap_err(),
            Error::InvalidPackedSymbol('=')
        );
    }

    #[test]
    fn test_bounds() {
        let reader = BitReader::new("AB").unwrap();
        assert_eq!(reader.len(), 12);
        assert_eq!(reader.get(12, 0).unwrap(), 0);
        assert_eq!(reader.get(11, 1).unwrap(), 1);
        assert_eq!(
            reader.get(11, 2),
            Err(Error::BufferBounds {
                pos: 11,
                len: 2,
                available: 12
            })
        );
        assert!(reader.count(0, 13).is_err());
        assert!(reader.rank_slow(12).is_err());
        assert!(reader.get(usize::MAX, 2).is_err());
        assert_eq!(
            BitReader::new("A=B"),
            Err(Error::InvalidPackedSymbol('='))
        );
    }

    #[test]
    fn test_wide_reads() {
        let mut writer = BitWriter::new();
        writer.write(1, 1).unwrap();
        writer.write(0xDEAD_BEEF_CAFE_F00D, 64).unwrap();
        let reader = BitReader::new(&writer.to_packed()).unwrap();
        assert_eq!(reader.get(1, 64).unwrap(), 0xDEAD_BEEF_CAFE_F00D);
        assert_eq!(reader.get(0, 65), Err(Error::InvalidWidth(65)));
    }

    #[test]
    fn test_random_fields() {
        let mut rng = ChaChaRng::seed_from_u64(7);
        let mut writer = BitWriter::new();
        let mut fields = vec![];
        for _ in 0..2000 {
            let width = rng.gen_range(0..=64usize);
            let value = if width == 64 {
                rng.gen::<u64>()
            } else {
                rng.gen::<u64>() & ((1 << width) - 1)
            };
            fields.push((writer.len(), width, value));
            writer.write(value, width).unwrap();
        }

        let reader = BitReader::new(&writer.to_packed()).unwrap();
        for &(pos, width, value) in &fields {
            assert_eq!(reader.get(pos, width).unwrap(), value);
            assert_eq!(reader.count(pos, width).unwrap(), value.count_ones() as usize);
        }
    }

    #[test]
    fn test_rank_slow() {
        let mut rng = ChaChaRng::seed_from_u64(42);
        let bits: Vec<bool> = (0..600).map(|_| rng.gen::<bool>()).collect();
        let mut writer = BitWriter::new();
        bits.iter().for_each(|&b| writer.push_bit(b));
        let reader = BitReader::new(&writer.to_packed()).unwrap();

        let mut cur_rank = 0;
        for (i, &b) in bits.iter().enumerate() {
            cur_rank += b as usize;
            assert_eq!(reader.rank_slow(i).unwrap(), cur_rank);
        }
    }
}
