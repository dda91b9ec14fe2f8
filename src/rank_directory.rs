//! Two-level rank/select directory over a packed bit stream.
//!
//! The directory summarizes the first `num_bits` bits of a stream with two
//! levels of cumulative counts, and is itself stored as a packed bit stream:
//!
//! - every L2 section (default 32 bits) gets the number of ones from the start
//!   of its enclosing L1 section, in `ceil(log2(l1_size))` bits;
//! - the last L2 section of every L1 section (default 1024 bits) instead gets the
//!   number of ones from the start of the stream, in `ceil(log2(num_bits))` bits.
//!
//! Only complete L2 sections are summarized; the tail is counted directly.
//!
//! # References
//!
//!  - G. Jacobson, "Space-efficient static trees and graphs," In FOCS, 1989.
use tracing::debug;

use crate::bit_stream::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::{utils, Bit, Ranker, Selector};

/// Default number of bits summarized by an L1 entry.
pub const DEFAULT_L1_SIZE: usize = 32 * 32;

/// Default number of bits summarized by an L2 entry.
pub const DEFAULT_L2_SIZE: usize = 32;

/// Section sizes of a [`RankDirectory`].
///
/// The encoder and the decoder must use the same sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// Number of bits summarized by an L1 entry. Must be a multiple of `l2_size`.
    pub l1_size: usize,
    /// Number of bits summarized by an L2 entry.
    pub l2_size: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            l1_size: DEFAULT_L1_SIZE,
            l2_size: DEFAULT_L2_SIZE,
        }
    }
}

impl DirectoryConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] is returned if `l2_size == 0`, or if `l1_size` is not
    /// a multiple of `l2_size` greater than `l2_size`.
    pub fn new(l1_size: usize, l2_size: usize) -> Result<Self> {
        let config = Self { l1_size, l2_size };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.l2_size == 0 {
            return Err(Error::InvalidConfig("l2_size must be positive".to_string()));
        }
        if self.l1_size <= self.l2_size || self.l1_size % self.l2_size != 0 {
            return Err(Error::InvalidConfig(format!(
                "l1_size must be a multiple of l2_size={} greater than it, but got {}",
                self.l2_size, self.l1_size
            )));
        }
        Ok(())
    }
}

/// Rank/select directory over the first `num_bits` bits of a packed stream.
///
/// [`Ranker::rank1`] takes a constant number of directory reads plus a direct
/// count over at most one L2 section. [`Selector::select1`] and
/// [`Selector::select0`] binary-search over rank, so they take $`O(\lg n)`$ rank
/// queries.
///
/// Note that ranks here are *inclusive*: `rank1(x)` counts the ones in `[0, x]`,
/// and `select1(y)` returns the first position whose inclusive rank is `y`.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use succinct_trie::bit_stream::BitWriter;
/// use succinct_trie::{DirectoryConfig, RankDirectory, Ranker, Selector};
///
/// let mut writer = BitWriter::new();
/// writer.write(0b1001_1010, 8)?;
/// let data = writer.to_packed();
///
/// let rd = RankDirectory::build(&data, 8, DirectoryConfig::default())?;
///
/// assert_eq!(rd.rank1(0)?, 1);
/// assert_eq!(rd.rank1(3)?, 2);
/// assert_eq!(rd.rank0(3)?, 2);
/// assert_eq!(rd.select1(2)?, 3);
/// assert_eq!(rd.select0(2)?, 2);
/// assert!(rd.select1(5).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankDirectory {
    directory: BitReader,
    data: BitReader,
    config: DirectoryConfig,
    l1_bits: usize,
    l2_bits: usize,
    section_bits: usize,
    num_bits: usize,
}

impl RankDirectory {
    /// Builds the directory over the first `num_bits` bits of the packed stream `data`.
    ///
    /// # Arguments
    ///
    ///  - `data`: Packed bit stream to index.
    ///  - `num_bits`: Number of bits to index.
    ///  - `config`: Section sizes.
    ///
    /// # Errors
    ///
    /// An error is returned if
    ///
    ///  - `data` is not a valid packed string,
    ///  - `config` is invalid, or
    ///  - `data` has fewer than `num_bits` bits.
    pub fn build(data: &str, num_bits: usize, config: DirectoryConfig) -> Result<Self> {
        config.validate()?;
        let bits = BitReader::new(data)?;
        Self::check_num_bits(&bits, num_bits)?;

        let DirectoryConfig { l1_size, l2_size } = config;
        let l1_bits = utils::ceil_log2(num_bits);
        let l2_bits = utils::ceil_log2(l1_size);

        let mut directory = BitWriter::new();
        let (mut pos, mut in_section) = (0, 0);
        let (mut count1, mut count2) = (0, 0);

        while pos + l2_size <= num_bits {
            count2 += bits.count(pos, l2_size)?;
            in_section += l2_size;
            pos += l2_size;
            if in_section == l1_size {
                count1 += count2;
                directory.write(count1 as u64, l1_bits)?;
                count2 = 0;
                in_section = 0;
            } else {
                directory.write(count2 as u64, l2_bits)?;
            }
        }

        debug!(
            num_bits,
            l1_size,
            l2_size,
            directory_bits = directory.len(),
            "built rank directory"
        );

        Self::from_parts(&directory.to_packed(), data, num_bits, config)
    }

    /// Restores the directory from a packed directory built by [`Self::build`].
    ///
    /// # Arguments
    ///
    ///  - `directory_data`: Packed directory, as returned by [`Self::as_packed`].
    ///  - `data`: Packed bit stream the directory was built over.
    ///  - `num_bits`: Number of bits indexed.
    ///  - `config`: Section sizes used for building.
    ///
    /// # Errors
    ///
    /// An error is returned if
    ///
    ///  - either string is not a valid packed string,
    ///  - `config` is invalid, or
    ///  - `data` has fewer than `num_bits` bits.
    pub fn from_parts(
        directory_data: &str,
        data: &str,
        num_bits: usize,
        config: DirectoryConfig,
    ) -> Result<Self> {
        config.validate()?;
        let data = BitReader::new(data)?;
        Self::check_num_bits(&data, num_bits)?;
        let directory = BitReader::new(directory_data)?;

        let l1_bits = utils::ceil_log2(num_bits);
        let l2_bits = utils::ceil_log2(config.l1_size);
        let section_bits = (config.l1_size / config.l2_size - 1) * l2_bits + l1_bits;

        Ok(Self {
            directory,
            data,
            config,
            l1_bits,
            l2_bits,
            section_bits,
            num_bits,
        })
    }

    fn check_num_bits(data: &BitReader, num_bits: usize) -> Result<()> {
        if data.len() < num_bits {
            return Err(Error::BufferBounds {
                pos: 0,
                len: num_bits,
                available: data.len(),
            });
        }
        Ok(())
    }

    /// Returns the packed directory.
    pub fn as_packed(&self) -> &str {
        self.directory.as_str()
    }

    /// Returns the reference of the indexed bit stream.
    pub const fn data(&self) -> &BitReader {
        &self.data
    }

    /// Returns the section sizes.
    pub const fn config(&self) -> DirectoryConfig {
        self.config
    }

    /// Returns the number of indexed bits.
    pub const fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Returns the number of `which` bits in `[0, x]`.
    ///
    /// # Errors
    ///
    /// [`Error::BufferBounds`] is returned if `x >= self.num_bits()`.
    pub fn rank(&self, which: Bit, x: usize) -> Result<usize> {
        match which {
            Bit::One => self.rank1(x),
            Bit::Zero => self.rank0(x),
        }
    }

    /// Returns the first position `x` such that `self.rank(which, x) == y`.
    ///
    /// # Errors
    ///
    /// [`Error::DirectoryInvariant`] is returned if no such position exists.
    pub fn select(&self, which: Bit, y: usize) -> Result<usize> {
        // Candidates lie in [-1, num_bits); shifted by one to stay unsigned.
        let (mut low, mut high) = (0, self.num_bits + 1);
        let mut found = None;

        while high - low > 1 {
            let probe = low + (high - low) / 2;
            let r = self.rank(which, probe - 1)?;
            if r == y {
                // Keep narrowing to reach the first occurrence.
                found = Some(probe - 1);
                high = probe;
            } else if r < y {
                low = probe;
            } else {
                high = probe;
            }
        }

        found.ok_or(Error::DirectoryInvariant { which, rank: y })
    }

    fn rank1_inner(&self, x: usize) -> Result<usize> {
        let DirectoryConfig { l1_size, l2_size } = self.config;
        let (mut rank, mut o, mut section_pos) = (0, x, 0);

        if o >= l1_size {
            section_pos = (o / l1_size) * self.section_bits;
            rank = self
                .directory
                .get(section_pos - self.l1_bits, self.l1_bits)? as usize;
            o %= l1_size;
        }
        if o >= l2_size {
            section_pos += (o / l2_size) * self.l2_bits;
            rank += self
                .directory
                .get(section_pos - self.l2_bits, self.l2_bits)? as usize;
        }
        rank += self.data.count(x - x % l2_size, x % l2_size + 1)?;
        Ok(rank)
    }
}

impl Ranker for RankDirectory {
    /// Returns the number of ones in `[0, x]`.
    ///
    /// # Errors
    ///
    /// [`Error::BufferBounds`] is returned if `x >= self.num_bits()`.
    fn rank1(&self, x: usize) -> Result<usize> {
        if x >= self.num_bits {
            return Err(Error::BufferBounds {
                pos: x,
                len: 1,
                available: self.num_bits,
            });
        }
        self.rank1_inner(x)
    }

    /// Returns the number of zeros in `[0, x]`.
    ///
    /// # Errors
    ///
    /// [`Error::BufferBounds`] is returned if `x >= self.num_bits()`.
    fn rank0(&self, x: usize) -> Result<usize> {
        Ok(x + 1 - self.rank1(x)?)
    }
}

impl Selector for RankDirectory {
    /// Returns the position of the `y`-th one (1-indexed), i.e., the first position
    /// whose inclusive rank1 is `y`.
    ///
    /// # Complexity
    ///
    /// $`O(\lg n)`$ rank queries.
    ///
    /// # Errors
    ///
    /// [`Error::DirectoryInvariant`] is returned if no such position exists.
    fn select1(&self, y: usize) -> Result<usize> {
        self.select(Bit::One, y)
    }

    /// Returns the position of the `y`-th zero (1-indexed), i.e., the first position
    /// whose inclusive rank0 is `y`.
    ///
    /// # Complexity
    ///
    /// $`O(\lg n)`$ rank queries.
    ///
    /// # Errors
    ///
    /// [`Error::DirectoryInvariant`] is returned if no such position exists.
    fn select0(&self, y: usize) -> Result<usize> {
        self.select(Bit::Zero, y)
    }
}
