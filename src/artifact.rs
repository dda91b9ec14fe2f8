//! The exchanged form of an encoded trie.
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use crate::frozen_trie::FrozenTrie;
use crate::Serializable;

/// Three scalars from which a [`FrozenTrie`] is restored: the node count,
/// the packed encoded trie, and the packed rank directory.
///
/// An optional alphabet fingerprint guards against decoding with a different
/// alphabet. The container format (JSON through serde, or the binary
/// [`Serializable`] format) is up to the caller.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use succinct_trie::{Alphabet, TrieData};
///
/// let data = TrieData::new(
///     37,
///     "v2qqqqqqqlFEgABxY5KB5aIAgih54BhZZBY5t5ZfMgA11x8g8A".to_string(),
///     "BMIg".to_string(),
/// );
/// let trie = data.freeze(Alphabet::default())?;
/// assert!(trie.lookup("jello")?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrieData {
    /// Number of nodes, including the root.
    pub node_count: usize,
    /// Packed encoded trie.
    pub trie_data: String,
    /// Packed rank directory over the structure part of `trie_data`.
    pub directory_data: String,
    /// Fingerprint of the alphabet used for encoding, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alphabet_fingerprint: Option<u64>,
}

impl TrieData {
    /// Creates an artifact without an alphabet fingerprint.
    pub const fn new(node_count: usize, trie_data: String, directory_data: String) -> Self {
        Self {
            node_count,
            trie_data,
            directory_data,
            alphabet_fingerprint: None,
        }
    }

    /// Records the alphabet fingerprint.
    #[must_use]
    pub const fn with_fingerprint(mut self, fingerprint: u64) -> Self {
        self.alphabet_fingerprint = Some(fingerprint);
        self
    }

    /// Decodes the artifact into a [`FrozenTrie`], using the default directory sizes.
    ///
    /// # Errors
    ///
    /// - [`Error::AlphabetMismatch`] is returned if a fingerprint is recorded and
    ///   differs from that of `alphabet`.
    /// - An error is returned if the parts are inconsistent with each other.
    pub fn freeze(&self, alphabet: Alphabet) -> Result<FrozenTrie> {
        if let Some(expected) = self.alphabet_fingerprint {
            let actual = alphabet.fingerprint();
            if expected != actual {
                return Err(Error::AlphabetMismatch { expected, actual });
            }
        }
        FrozenTrie::new(
            &self.trie_data,
            &self.directory_data,
            self.node_count,
            alphabet,
        )
    }
}

impl Serializable for TrieData {
    fn serialize_into<W: Write>(&self, mut writer: W) -> anyhow::Result<usize> {
        let mut mem = self.node_count.serialize_into(&mut writer)?;
        mem += self.trie_data.serialize_into(&mut writer)?;
        mem += self.directory_data.serialize_into(&mut writer)?;
        mem += self.alphabet_fingerprint.serialize_into(&mut writer)?;
        Ok(mem)
    }

    fn deserialize_from<R: Read>(mut reader: R) -> anyhow::Result<Self> {
        let node_count = usize::deserialize_from(&mut reader)?;
        let trie_data = String::deserialize_from(&mut reader)?;
        let directory_data = String::deserialize_from(&mut reader)?;
        let alphabet_fingerprint = Option::<u64>::deserialize_from(&mut reader)?;
        Ok(Self {
            node_count,
            trie_data,
            directory_data,
            alphabet_fingerprint,
        })
    }

    fn size_in_bytes(&self) -> usize {
        self.node_count.size_in_bytes()
            + self.trie_data.size_in_bytes()
            + self.directory_data.size_in_bytes()
            + self.alphabet_fingerprint.size_in_bytes()
    }
}
