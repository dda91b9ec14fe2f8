//! Bit streams packed into strings of 6-bit symbols.
//!
//! # Introduction
//!
//! Encoded tries and their rank directories are exchanged as packed strings
//! (see [`crate::packed`]). This module provides the two sides of that format:
//!
//! - [`BitWriter`] appends fields of up to 64 bits, most-significant bit first,
//!   and exports the accumulated bits as a packed string.
//! - [`BitReader`] wraps a packed string and supports random access to fields of
//!   up to 64 bits and population counts over arbitrary bit ranges.
//!
//! # Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use succinct_trie::bit_stream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write(0b101, 3)?;
//! writer.write(0b11110000, 8)?;
//!
//! let packed = writer.to_packed();
//! assert_eq!(packed, "vg");
//!
//! let reader = BitReader::new(&packed)?;
//! assert_eq!(reader.len(), 12);
//! assert_eq!(reader.get(0, 3)?, 0b101);
//! assert_eq!(reader.get(3, 8)?, 0b11110000);
//! assert_eq!(reader.count(0, 11)?, 6);
//! # Ok(())
//! # }
//! ```
pub mod reader;
pub mod writer;

pub use reader::BitReader;
pub use writer::BitWriter;
