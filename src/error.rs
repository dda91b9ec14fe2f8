//! Error types for encoding and decoding succinct tries.

use thiserror::Error;

use crate::Bit;

/// Error variants for succinct trie operations.
///
/// Apart from the validation variants, every error indicates a broken invariant
/// between the encoder and the decoder (a corrupted buffer, a mismatched alphabet,
/// or a directory built over a different stream). Words or prefixes that are
/// simply absent are not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A symbol outside the configured alphabet was found while encoding.
    #[error("unknown symbol {0:?} is not in the alphabet")]
    UnknownSymbol(char),

    /// A decoded code maps to no symbol of the alphabet.
    #[error("invalid code {0}: no symbol is assigned to it")]
    InvalidCode(u64),

    /// A select query found no position with the requested rank.
    #[error("directory invariant violated: no position has rank{which} = {rank}")]
    DirectoryInvariant {
        /// The bit value being selected.
        which: Bit,
        /// The requested rank.
        rank: usize,
    },

    /// A read extends past the end of the packed buffer.
    #[error("read of {len} bits at position {pos} exceeds the buffer of {available} bits")]
    BufferBounds {
        /// Starting bit position.
        pos: usize,
        /// Number of bits requested.
        len: usize,
        /// Number of bits available.
        available: usize,
    },

    /// A character outside the 64-symbol packing table.
    #[error("invalid packed symbol {0:?}")]
    InvalidPackedSymbol(char),

    /// A bit field wider than a machine word was requested.
    #[error("bit width must be in 0..=64, but got {0}")]
    InvalidWidth(usize),

    /// The alphabet is empty or contains duplicated symbols.
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// Invalid directory sizes or node count.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A node index at or beyond the node count.
    #[error("node index {index} is out of range for {num_nodes} nodes")]
    NodeOutOfRange {
        /// Requested node index.
        index: usize,
        /// Number of nodes in the trie.
        num_nodes: usize,
    },

    /// The alphabet supplied for decoding differs from the one used for encoding.
    #[error("alphabet fingerprint mismatch: artifact has {expected:#018x}, alphabet has {actual:#018x}")]
    AlphabetMismatch {
        /// Fingerprint stored in the artifact.
        expected: u64,
        /// Fingerprint of the supplied alphabet.
        actual: u64,
    },
}

/// A specialized Result type for succinct trie operations.
pub type Result<T> = std::result::Result<T, Error>;
