//! Utilities for serialization.
pub mod primitive;

use std::io::{Read, Write};

use anyhow::{anyhow, Result};

/// Trait to serialize/deserialize data structures in a compact little-endian format.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use succinct_trie::{Serializable, TrieBuilder, TrieData};
///
/// let mut builder = TrieBuilder::default();
/// builder.insert_all(["hello", "jello"]);
/// let data = builder.to_artifact()?;
///
/// let mut bytes = vec![];
/// let size = data.serialize_into(&mut bytes)?;
/// let other = TrieData::deserialize_from(&bytes[..])?;
///
/// assert_eq!(data, other);
/// assert_eq!(size, bytes.len());
/// assert_eq!(size, data.size_in_bytes());
/// # Ok(())
/// # }
/// ```
pub trait Serializable: Sized {
    /// Serializes the data structure into the writer,
    /// returning the number of serialized bytes.
    ///
    /// # Arguments
    ///
    /// - `writer`: [`Write`] variable.
    fn serialize_into<W: Write>(&self, writer: W) -> Result<usize>;

    /// Deserializes the data structure from the reader.
    ///
    /// # Arguments
    ///
    /// - `reader`: [`Read`] variable.
    fn deserialize_from<R: Read>(reader: R) -> Result<Self>;

    /// Returns the number of bytes to serialize the data structure.
    fn size_in_bytes(&self) -> usize;

    /// Returns the size of a primitive type in bytes (if the type is so).
    fn size_of() -> Option<usize> {
        None
    }
}

impl<S> Serializable for Option<S>
where
    S: Serializable,
{
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        let mut mem = 0;
        if let Some(x) = self {
            mem += true.serialize_into(&mut writer)?;
            mem += x.serialize_into(&mut writer)?;
        } else {
            mem += false.serialize_into(&mut writer)?;
        }
        Ok(mem)
    }

    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        let x = if bool::deserialize_from(&mut reader)? {
            Some(S::deserialize_from(&mut reader)?)
        } else {
            None
        };
        Ok(x)
    }

    fn size_in_bytes(&self) -> usize {
        self.as_ref().map_or(0, |x| x.size_in_bytes()) + std::mem::size_of::<u8>()
    }
}

impl Serializable for String {
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        let mem = self.len().serialize_into(&mut writer)?;
        writer.write_all(self.as_bytes())?;
        Ok(mem + self.len())
    }

    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        let len = usize::deserialize_from(&mut reader)?;
        let mut buf = vec![0; len];
        reader.read_exact(&mut buf)?;
        String::from_utf8(buf).map_err(|e| anyhow!("serialized string is not UTF-8: {e}"))
    }

    fn size_in_bytes(&self) -> usize {
        std::mem::size_of::<u64>() + self.len()
    }
}
