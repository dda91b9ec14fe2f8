//! Read-only trie navigated directly over its encoded bit stream.
use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use crate::rank_directory::{DirectoryConfig, RankDirectory};
use crate::{Bit, Selector};

/// Read-only trie over an encoded bit stream and its rank directory.
///
/// No node is materialized: the letter, final flag, and children of a node are
/// recomputed on every access. In the structure part of the stream, the children
/// of node `i` are encoded between the `(i+1)`-th and the `(i+2)`-th zeros, so
///
/// - the first child of node `i` is `select0(i + 1) - i`, and
/// - the first child of node `i + 1` is `select0(i + 2) - i - 1`.
///
/// Looking up a word of length $`m`$ takes $`O(m \sigma \lg n)`$ time for an
/// alphabet of $`\sigma`$ symbols and $`n`$ nodes.
///
/// The alphabet must be the one used for encoding.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use succinct_trie::{Alphabet, FrozenTrie};
///
/// let trie = FrozenTrie::new(
///     "v2qqqqqqqlFEgABxY5KB5aIAgih54BhZZBY5t5ZfMgA11x8g8A",
///     "BMIg",
///     37,
///     Alphabet::default(),
/// )?;
///
/// assert!(trie.lookup("hello")?);
/// assert!(!trie.lookup("kwijibo")?);
/// assert_eq!(trie.suggest("", 3)?, vec!["lamp", "quiz", "apple"]);
///
/// let root = trie.root()?;
/// assert_eq!(root.num_children(), 6);
/// assert_eq!(root.child(1)?.letter(), Some('o'));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrozenTrie {
    directory: RankDirectory,
    alphabet: Alphabet,
    num_nodes: usize,
    letter_start: usize,
}

impl FrozenTrie {
    /// Creates the trie from its packed parts, with the default directory sizes.
    ///
    /// # Arguments
    ///
    ///  - `trie_data`: Packed encoded trie.
    ///  - `directory_data`: Packed rank directory over the structure part of `trie_data`.
    ///  - `num_nodes`: Number of nodes in the trie.
    ///  - `alphabet`: Alphabet used for encoding.
    ///
    /// # Errors
    ///
    /// An error is returned if the parts are inconsistent with each other.
    pub fn new(
        trie_data: &str,
        directory_data: &str,
        num_nodes: usize,
        alphabet: Alphabet,
    ) -> Result<Self> {
        Self::with_config(
            trie_data,
            directory_data,
            num_nodes,
            alphabet,
            DirectoryConfig::default(),
        )
    }

    /// Creates the trie from its packed parts and the directory sizes used for encoding.
    ///
    /// # Errors
    ///
    /// An error is returned if the parts are inconsistent with each other.
    pub fn with_config(
        trie_data: &str,
        directory_data: &str,
        num_nodes: usize,
        alphabet: Alphabet,
        config: DirectoryConfig,
    ) -> Result<Self> {
        let num_bits = Self::structure_bits(num_nodes)?;
        let directory = RankDirectory::from_parts(directory_data, trie_data, num_bits, config)?;
        Self::from_directory(directory, num_nodes, alphabet)
    }

    /// Creates the trie from a directory built over the encoded trie.
    ///
    /// # Errors
    ///
    /// An error is returned if
    ///
    ///  - `num_nodes` is zero,
    ///  - the directory does not index exactly `2 * num_nodes + 1` bits, or
    ///  - the encoded trie is too short to hold the payloads of `num_nodes` nodes.
    pub fn from_directory(
        directory: RankDirectory,
        num_nodes: usize,
        alphabet: Alphabet,
    ) -> Result<Self> {
        let letter_start = Self::structure_bits(num_nodes)?;
        if directory.num_bits() != letter_start {
            return Err(Error::InvalidConfig(format!(
                "directory indexes {} bits, but {num_nodes} nodes need {letter_start}",
                directory.num_bits()
            )));
        }
        let available = directory.data().len();
        let too_short = |payload_bits| Error::BufferBounds {
            pos: letter_start,
            len: payload_bits,
            available,
        };
        let payload_bits = num_nodes
            .checked_mul(alphabet.data_bits())
            .ok_or_else(|| too_short(usize::MAX))?;
        match letter_start.checked_add(payload_bits) {
            Some(end) if end <= available => {}
            _ => return Err(too_short(payload_bits)),
        }

        debug!(
            num_nodes,
            letter_start,
            data_bits = alphabet.data_bits(),
            "decoded frozen trie"
        );
        Ok(Self {
            directory,
            alphabet,
            num_nodes,
            letter_start,
        })
    }

    fn structure_bits(num_nodes: usize) -> Result<usize> {
        if num_nodes == 0 {
            return Err(Error::InvalidConfig(
                "a trie has at least the root node".to_string(),
            ));
        }
        num_nodes
            .checked_mul(2)
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| Error::InvalidConfig(format!("{num_nodes} nodes is too many")))
    }

    /// Returns the node of level-order index `index`.
    ///
    /// # Errors
    ///
    /// - [`Error::NodeOutOfRange`] is returned if `index >= self.num_nodes()`.
    /// - [`Error::InvalidCode`] is returned if the stored code has no symbol.
    /// - [`Error::DirectoryInvariant`] is returned if the structure part is corrupted.
    pub fn node(&self, index: usize) -> Result<FrozenNode<'_>> {
        if index >= self.num_nodes {
            return Err(Error::NodeOutOfRange {
                index,
                num_nodes: self.num_nodes,
            });
        }

        let data = self.directory.data();
        let pos = self.letter_start + index * self.alphabet.data_bits();
        let is_final = data.get(pos, 1)? == 1;
        let letter = if index == 0 {
            None
        } else {
            let code = data.get(pos + 1, self.alphabet.code_bits())?;
            Some(self.alphabet.decode(code)?)
        };

        let broken = |rank| Error::DirectoryInvariant {
            which: Bit::Zero,
            rank,
        };
        let first_child = self
            .directory
            .select0(index + 1)?
            .checked_sub(index)
            .ok_or_else(|| broken(index + 1))?;
        // Children of the next node start here.
        let next_first_child = self
            .directory
            .select0(index + 2)?
            .checked_sub(index + 1)
            .ok_or_else(|| broken(index + 2))?;
        let num_children = next_first_child
            .checked_sub(first_child)
            .ok_or_else(|| broken(index + 2))?;

        Ok(FrozenNode {
            trie: self,
            index,
            letter,
            is_final,
            first_child,
            num_children,
        })
    }

    /// Returns the root node.
    ///
    /// # Errors
    ///
    /// An error is returned if the structure part is corrupted.
    pub fn root(&self) -> Result<FrozenNode<'_>> {
        self.node(0)
    }

    /// Returns the node reached by following the symbols of `prefix` from the root,
    /// or [`None`] if no stored word starts with `prefix`.
    ///
    /// # Errors
    ///
    /// An error is returned if the encoded trie is corrupted.
    pub fn walk(&self, prefix: &str) -> Result<Option<FrozenNode<'_>>> {
        let mut node = self.root()?;
        for symbol in prefix.chars() {
            match node.find_child(symbol)? {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }
        Ok(Some(node))
    }

    /// Checks if `word` is stored.
    ///
    /// Reaching the end of `word` is not enough: the node reached must be marked
    /// final, otherwise `word` is only a prefix of stored words.
    ///
    /// # Errors
    ///
    /// An error is returned if the encoded trie is corrupted.
    pub fn lookup(&self, word: &str) -> Result<bool> {
        Ok(self.walk(word)?.map_or(false, |node| node.is_final()))
    }

    /// Returns up to `limit` stored words starting with `prefix`.
    ///
    /// Words are reported in level order of the subtrie below `prefix`, i.e.,
    /// shorter words first and, within a length, in the order the trie stores
    /// children (not lexicographically). At most `limit` words are returned.
    ///
    /// # Errors
    ///
    /// An error is returned if the encoded trie is corrupted.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use succinct_trie::TrieBuilder;
    ///
    /// let mut builder = TrieBuilder::default();
    /// builder.insert_all(["a", "ab", "abc", "abd", "b", "ba", "bab"]);
    /// let trie = builder.to_artifact()?.freeze(builder.alphabet().clone())?;
    ///
    /// assert_eq!(trie.suggest("ab", 10)?, vec!["ab", "abc", "abd"]);
    /// assert_eq!(trie.suggest("", 4)?, vec!["a", "b", "ab", "ba"]);
    /// assert!(trie.suggest("c", 10)?.is_empty());
    /// assert!(trie.suggest("a", 0)?.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub fn suggest(&self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        let mut result = vec![];
        if limit == 0 {
            return Ok(result);
        }
        let Some(start) = self.walk(prefix)? else {
            trace!(prefix, "no stored word has the prefix");
            return Ok(result);
        };

        let mut queue = VecDeque::from([(start, prefix.to_string())]);
        while let Some((node, word)) = queue.pop_front() {
            if node.is_final() {
                result.push(word.clone());
                if result.len() == limit {
                    break;
                }
            }
            for child in node.children() {
                let child = child?;
                let mut child_word = word.clone();
                if let Some(letter) = child.letter() {
                    child_word.push(letter);
                }
                queue.push_back((child, child_word));
            }
        }
        trace!(prefix, limit, found = result.len(), "suggested words");
        Ok(result)
    }

    /// Returns the number of nodes.
    #[inline(always)]
    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the position where node payloads start, i.e., `2 * num_nodes + 1`.
    #[inline(always)]
    pub const fn letter_start(&self) -> usize {
        self.letter_start
    }

    /// Returns the reference of the alphabet.
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the reference of the rank directory.
    pub const fn directory(&self) -> &RankDirectory {
        &self.directory
    }

    /// Returns the packed encoded trie.
    pub fn trie_data(&self) -> &str {
        self.directory.data().as_str()
    }
}

/// A node of a [`FrozenTrie`], decoded on access.
#[derive(Clone, Copy)]
pub struct FrozenNode<'a> {
    trie: &'a FrozenTrie,
    index: usize,
    letter: Option<char>,
    is_final: bool,
    first_child: usize,
    num_children: usize,
}

impl<'a> FrozenNode<'a> {
    /// Returns the level-order index.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the symbol on the edge into this node, or [`None`] for the root.
    #[inline(always)]
    pub const fn letter(&self) -> Option<char> {
        self.letter
    }

    /// Checks if the path to this node spells a stored word.
    #[inline(always)]
    pub const fn is_final(&self) -> bool {
        self.is_final
    }

    /// Returns the level-order index of the first child.
    #[inline(always)]
    pub const fn first_child(&self) -> usize {
        self.first_child
    }

    /// Returns the number of children.
    #[inline(always)]
    pub const fn num_children(&self) -> usize {
        self.num_children
    }

    /// Returns the `i`-th child.
    ///
    /// # Errors
    ///
    /// [`Error::NodeOutOfRange`] is returned if `i >= self.num_children()`.
    pub fn child(&self, i: usize) -> Result<FrozenNode<'a>> {
        if i >= self.num_children {
            return Err(Error::NodeOutOfRange {
                index: self.first_child + i,
                num_nodes: self.first_child + self.num_children,
            });
        }
        self.trie.node(self.first_child + i)
    }

    /// Creates an iterator over the children.
    pub fn children(&self) -> impl Iterator<Item = Result<FrozenNode<'a>>> + 'a {
        let (trie, first_child) = (self.trie, self.first_child);
        (first_child..first_child + self.num_children).map(move |i| trie.node(i))
    }

    /// Returns the child on the edge labeled `symbol`, scanning the children linearly.
    ///
    /// # Errors
    ///
    /// An error is returned if the encoded trie is corrupted.
    pub fn find_child(&self, symbol: char) -> Result<Option<FrozenNode<'a>>> {
        for child in self.children() {
            let child = child?;
            if child.letter == Some(symbol) {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }
}

impl std::fmt::Debug for FrozenNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrozenNode")
            .field("index", &self.index)
            .field("letter", &self.letter)
            .field("is_final", &self.is_final)
            .field("first_child", &self.first_child)
            .field("num_children", &self.num_children)
            .finish()
    }
}
