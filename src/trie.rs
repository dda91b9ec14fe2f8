//! Mutable trie for building the encoded bit stream.
use std::collections::VecDeque;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::artifact::TrieData;
use crate::bit_stream::BitWriter;
use crate::error::Result;
use crate::frozen_trie::FrozenTrie;
use crate::rank_directory::{DirectoryConfig, RankDirectory};

/// Header written before the unary codes; it stands for the edge into the root.
const HEADER: u64 = 0b10;
const HEADER_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    // None only for the root.
    symbol: Option<char>,
    is_final: bool,
    // Indices into the arena, in first-insertion order.
    children: Vec<usize>,
}

impl Node {
    const fn new(symbol: Option<char>) -> Self {
        Self {
            symbol,
            is_final: false,
            children: vec![],
        }
    }
}

/// Mutable trie used at construction time to produce the encoded bit stream.
///
/// Nodes live in an arena addressed by index; the root is a synthetic node
/// standing for the empty prefix. Children keep their first-insertion order,
/// so the encoding is deterministic for a given insertion sequence.
///
/// Insertion is fastest when words come in sorted order, since the path of
/// the previous word is cached, but any order gives the same set of words.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use succinct_trie::{Alphabet, DirectoryConfig, TrieBuilder};
///
/// let mut builder = TrieBuilder::new(Alphabet::new("abc")?);
/// builder.insert("ab");
/// builder.insert("abc");
/// builder.insert("b");
///
/// assert_eq!(builder.num_nodes(), 5);
/// assert_eq!(builder.num_words(), 3);
///
/// let trie = builder.freeze(DirectoryConfig::default())?;
/// assert!(trie.lookup("ab")?);
/// assert!(!trie.lookup("a")?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieBuilder {
    alphabet: Alphabet,
    nodes: Vec<Node>,
    previous: Vec<char>,
    // cache[i] is the node of the length-i prefix of `previous`.
    cache: Vec<usize>,
    num_words: usize,
}

impl TrieBuilder {
    /// Creates an empty trie over `alphabet`.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            nodes: vec![Node::new(None)],
            previous: vec![],
            cache: vec![0],
            num_words: 0,
        }
    }

    /// Inserts `word`.
    ///
    /// Symbols are not checked against the alphabet until [`Self::encode`].
    pub fn insert(&mut self, word: &str) {
        let symbols: Vec<char> = word.chars().collect();
        let common = symbols
            .iter()
            .zip(self.previous.iter())
            .take_while(|(a, b)| a == b)
            .count();

        self.cache.truncate(common + 1);
        let mut node = self.cache[common];

        for &symbol in &symbols[common..] {
            // The scan keeps unsorted insertions from duplicating children.
            let found = self.nodes[node]
                .children
                .iter()
                .copied()
                .find(|&child| self.nodes[child].symbol == Some(symbol));
            node = match found {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::new(Some(symbol)));
                    self.nodes[node].children.push(child);
                    child
                }
            };
            self.cache.push(node);
        }

        if !self.nodes[node].is_final {
            self.nodes[node].is_final = true;
            self.num_words += 1;
        }
        self.previous = symbols;
    }

    /// Inserts all the words of `words`.
    pub fn insert_all<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words.into_iter().for_each(|w| self.insert(w.as_ref()));
    }

    /// Returns the number of nodes, including the root.
    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of distinct words inserted.
    #[inline(always)]
    pub const fn num_words(&self) -> usize {
        self.num_words
    }

    /// Checks if no word has been inserted.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.num_words == 0
    }

    /// Returns the reference of the alphabet.
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the number of bits in the structure part, i.e., `2 * num_nodes + 1`.
    ///
    /// This is also the position where the payload part starts.
    #[inline(always)]
    pub fn num_structure_bits(&self) -> usize {
        self.num_nodes() * 2 + 1
    }

    /// Encodes the trie, returning the packed bit stream.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownSymbol`](crate::Error::UnknownSymbol) is returned if an
    /// inserted word has a symbol outside the alphabet.
    pub fn encode(&self) -> Result<String> {
        Ok(self.encode_bits()?.to_packed())
    }

    /// Encodes the trie, returning the unpacked bit stream.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownSymbol`](crate::Error::UnknownSymbol) is returned if an
    /// inserted word has a symbol outside the alphabet.
    pub fn encode_bits(&self) -> Result<BitWriter> {
        let order = self.level_order();
        let data_bits = self.alphabet.data_bits();
        let mut bits =
            BitWriter::with_capacity(self.num_structure_bits() + self.num_nodes() * data_bits);

        // Unary codes of the number of children.
        bits.write(HEADER, HEADER_LEN)?;
        for &i in &order {
            for _ in 0..self.nodes[i].children.len() {
                bits.push_bit(true);
            }
            bits.push_bit(false);
        }
        debug_assert_eq!(bits.len(), self.num_structure_bits());

        // Final flag and symbol code of every node.
        let code_bits = self.alphabet.code_bits();
        for &i in &order {
            let node = &self.nodes[i];
            let code = match node.symbol {
                Some(symbol) => self.alphabet.encode(symbol)?,
                None => 0,
            };
            bits.write(((node.is_final as u64) << code_bits) | code, data_bits)?;
        }

        debug!(
            num_nodes = self.num_nodes(),
            num_words = self.num_words,
            structure_bits = self.num_structure_bits(),
            payload_bits = self.num_nodes() * data_bits,
            "encoded trie"
        );
        Ok(bits)
    }

    /// Encodes the trie and builds its rank directory, returning the artifact to persist.
    ///
    /// The directory is built with [`DirectoryConfig::default()`].
    ///
    /// # Errors
    ///
    /// An error is returned if encoding fails.
    pub fn to_artifact(&self) -> Result<TrieData> {
        let trie_data = self.encode()?;
        let directory = RankDirectory::build(
            &trie_data,
            self.num_structure_bits(),
            DirectoryConfig::default(),
        )?;
        Ok(TrieData::new(
            self.num_nodes(),
            trie_data,
            directory.as_packed().to_string(),
        )
        .with_fingerprint(self.alphabet.fingerprint()))
    }

    /// Encodes the trie and decodes it into a [`FrozenTrie`] with the given directory sizes.
    ///
    /// # Errors
    ///
    /// An error is returned if encoding fails or `config` is invalid.
    pub fn freeze(&self, config: DirectoryConfig) -> Result<FrozenTrie> {
        let trie_data = self.encode()?;
        let directory = RankDirectory::build(&trie_data, self.num_structure_bits(), config)?;
        FrozenTrie::from_directory(directory, self.num_nodes(), self.alphabet.clone())
    }

    /// Returns the node indices in level order, children in insertion order.
    fn level_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([0]);
        while let Some(i) = queue.pop_front() {
            order.push(i);
            queue.extend(self.nodes[i].children.iter().copied());
        }
        order
    }
}

impl Default for TrieBuilder {
    /// Creates an empty trie over [`Alphabet::default()`].
    fn default() -> Self {
        Self::new(Alphabet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Error;

    const SORTED_WORDS: [&str; 7] = ["alphapha", "apple", "hello", "jello", "lamp", "orange", "quiz"];
    const UNSORTED_WORDS: [&str; 7] = ["apple", "orange", "alphapha", "lamp", "hello", "jello", "quiz"];

    fn build(words: &[&str]) -> TrieBuilder {
        let mut builder = TrieBuilder::default();
        builder.insert_all(words);
        builder
    }

    #[test]
    fn test_encode_sorted() {
        let builder = build(&SORTED_WORDS);
        assert_eq!(builder.num_nodes(), 37);
        assert_eq!(builder.num_words(), 7);
        assert_eq!(
            builder.encode().unwrap(),
            "v2qqqqqqqpIUgAA5JZyBZ4ggCKh55ZZgBA5ZZd5vIEl1wx8g8A"
        );
        assert_eq!(builder.to_artifact().unwrap().directory_data, "BMIg");
    }

    #[test]
    fn test_encode_unsorted() {
        let builder = build(&UNSORTED_WORDS);
        assert_eq!(builder.num_nodes(), 37);
        assert_eq!(
            builder.encode().unwrap(),
            "v2qqqqqqqlFEgABxY5KB5aIAgih54BhZZBY5t5ZfMgA11x8g8A"
        );
    }

    #[test]
    fn test_insertion_order_does_not_duplicate() {
        let sorted = build(&SORTED_WORDS);
        let mut reversed = TrieBuilder::default();
        reversed.insert_all(SORTED_WORDS.iter().rev());
        assert_eq!(sorted.num_nodes(), reversed.num_nodes());

        let mut twice = build(&UNSORTED_WORDS);
        twice.insert_all(UNSORTED_WORDS);
        assert_eq!(twice.num_nodes(), 37);
        assert_eq!(twice.num_words(), 7);
        assert_eq!(twice.encode().unwrap(), build(&UNSORTED_WORDS).encode().unwrap());
    }

    #[test]
    fn test_structure_bits() {
        let builder = build(&["ab", "ac", "b"]);
        let bits = builder.encode_bits().unwrap();
        // header, root: 2 children, a: 2 children, b, ab, ac: leaves
        assert_eq!(builder.num_nodes(), 5);
        assert_eq!(
            &bits.debug_string(0)[..builder.num_structure_bits()],
            "10110110000"
        );
        assert_eq!(bits.len(), builder.num_structure_bits() + 5 * 6);
    }

    #[test]
    fn test_multi_byte_symbols() {
        let alphabet = Alphabet::new("abcdeghijklmnoprstuvyāīūṁṃŋṇṅñṭḍḷ…'’° -").unwrap();
        let mut builder = TrieBuilder::new(alphabet);
        builder.insert_all(["sacca", "ariya", "saccavācā", "dhammaṃ", "buddho", "viharati"]);
        assert_eq!(builder.num_nodes(), 36);
        assert_eq!(
            builder.encode().unwrap(),
            "vqqqqqqqlVKUACAAGBJgB4YkHBBwAMMCKCwYCBAFhh5MBNAFbJEFHqg"
        );
        assert_eq!(builder.to_artifact().unwrap().directory_data, "BIIQ");
    }

    #[test]
    fn test_common_prefix_counts_symbols() {
        let alphabet = Alphabet::new("aāb").unwrap();
        let mut builder = TrieBuilder::new(alphabet);
        builder.insert("aā");
        builder.insert("aāb");
        builder.insert("ab");
        assert_eq!(builder.num_nodes(), 5);
        assert_eq!(builder.num_words(), 3);
    }

    #[test]
    fn test_empty() {
        let mut builder = TrieBuilder::default();
        assert!(builder.is_empty());
        assert_eq!(builder.num_nodes(), 1);
        assert_eq!(builder.encode_bits().unwrap().debug_string(0), "100000000");

        builder.insert("");
        assert!(!builder.is_empty());
        assert_eq!(builder.num_nodes(), 1);
        assert_eq!(builder.encode_bits().unwrap().debug_string(0), "100100000");
    }

    #[test]
    fn test_unknown_symbol_aborts() {
        let builder = build(&["apple", "Pear"]);
        assert_eq!(builder.encode(), Err(Error::UnknownSymbol('P')));
        assert!(builder.to_artifact().is_err());
        assert!(builder.freeze(DirectoryConfig::default()).is_err());
    }
}
