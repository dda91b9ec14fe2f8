//! # `succinct-trie`: Succinct tries over packed bit streams
//!
//! `succinct-trie` encodes a dictionary of words into a pointer-free
//! [succinct](https://en.wikipedia.org/wiki/Succinct_data_structure) trie,
//! whose size approaches the information-theoretic minimum, and answers
//! membership and prefix-suggestion queries directly over the encoded bits.
//!
//! ## Data structures
//!
//! - [`TrieBuilder`]
//!   - Mutable trie used only at construction time, producing the encoded bit stream.
//! - [`RankDirectory`]
//!   - Two-level rank/select directory over the structure part of the stream.
//! - [`FrozenTrie`]
//!   - Read-only trie navigated by rank/select arithmetic over the encoded stream.
//! - [`TrieData`]
//!   - The exchanged artifact: node count, packed trie, and packed directory.
//!
//! ## Encoding
//!
//! The trie is encoded by the method of Jacobson (1989).
//! Nodes are numbered in level order. The structure part starts with the bits `10`
//! followed by, for every node, one `1` per child and a terminating `0`.
//! The payload part stores, for every node, the final-word flag and the code of
//! the node's symbol in [`Alphabet::data_bits()`] bits.
//! Bit streams are exchanged as strings of 6-bit symbols (see [`packed`]).
//!
//! ## Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use succinct_trie::{Alphabet, TrieBuilder};
//!
//! let alphabet = Alphabet::default();
//! let mut builder = TrieBuilder::new(alphabet.clone());
//! for word in ["apple", "orange", "alphapha", "lamp", "hello", "jello", "quiz"] {
//!     builder.insert(word);
//! }
//! assert_eq!(builder.num_nodes(), 37);
//!
//! // The three scalars to persist.
//! let data = builder.to_artifact()?;
//!
//! // Later, possibly in another process.
//! let trie = data.freeze(alphabet)?;
//! assert!(trie.lookup("apple")?);
//! assert!(!trie.lookup("appl")?);
//! assert_eq!(trie.suggest("a", 10)?, vec!["apple", "alphapha"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Limitation
//!
//! Tries are static: rebuilding from a [`TrieBuilder`] is the only way to update one.
#![deny(missing_docs)]

pub mod alphabet;
pub mod artifact;
pub mod bit_stream;
pub mod error;
pub mod frozen_trie;
pub mod packed;
pub mod rank_directory;
pub mod serial;
pub mod trie;
pub mod utils;

pub use alphabet::Alphabet;
pub use artifact::TrieData;
pub use error::{Error, Result};
pub use frozen_trie::{FrozenNode, FrozenTrie};
pub use rank_directory::{DirectoryConfig, RankDirectory};
pub use serial::Serializable;
pub use trie::TrieBuilder;

/// A bit value, used to choose between rank/select over ones or zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bit {
    /// Unset bit.
    Zero,
    /// Set bit.
    One,
}

impl std::fmt::Display for Bit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zero => write!(f, "0"),
            Self::One => write!(f, "1"),
        }
    }
}

/// An interface for rank operations on bit streams.
///
/// Unlike the usual exclusive definition, ranks are inclusive of the queried position.
pub trait Ranker {
    /// Returns the number of ones in positions `[0, x]`.
    fn rank1(&self, x: usize) -> Result<usize>;

    /// Returns the number of zeros in positions `[0, x]`.
    fn rank0(&self, x: usize) -> Result<usize>;
}

/// An interface for select operations on bit streams.
pub trait Selector {
    /// Returns the first position `x` such that `rank1(x) == y`,
    /// i.e., the position of the `y`-th one counting from one.
    fn select1(&self, y: usize) -> Result<usize>;

    /// Returns the first position `x` such that `rank0(x) == y`,
    /// i.e., the position of the `y`-th zero counting from one.
    fn select0(&self, y: usize) -> Result<usize>;
}
