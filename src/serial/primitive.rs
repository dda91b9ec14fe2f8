//! Serialization of integers in little-endian order.
use std::io::{Read, Write};

use anyhow::{anyhow, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use super::Serializable;

impl Serializable for u8 {
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        writer.write_u8(*self)?;
        Ok(std::mem::size_of::<Self>())
    }

    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        Ok(reader.read_u8()?)
    }

    fn size_in_bytes(&self) -> usize {
        std::mem::size_of::<Self>()
    }

    fn size_of() -> Option<usize> {
        Some(std::mem::size_of::<Self>())
    }
}

impl Serializable for u64 {
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        writer.write_u64::<LittleEndian>(*self)?;
        Ok(std::mem::size_of::<Self>())
    }

    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        Ok(reader.read_u64::<LittleEndian>()?)
    }

    fn size_in_bytes(&self) -> usize {
        std::mem::size_of::<Self>()
    }

    fn size_of() -> Option<usize> {
        Some(std::mem::size_of::<Self>())
    }
}

/// Serialized as `u64` so that the format does not depend on the pointer width.
impl Serializable for usize {
    fn serialize_into<W: Write>(&self, writer: W) -> Result<usize> {
        (*self as u64).serialize_into(writer)
    }

    fn deserialize_from<R: Read>(reader: R) -> Result<Self> {
        let x = u64::deserialize_from(reader)?;
        Self::try_from(x).map_err(|_| anyhow!("{x} does not fit in usize"))
    }

    fn size_in_bytes(&self) -> usize {
        std::mem::size_of::<u64>()
    }

    fn size_of() -> Option<usize> {
        Some(std::mem::size_of::<u64>())
    }
}

impl Serializable for bool {
    fn serialize_into<W: Write>(&self, writer: W) -> Result<usize> {
        (*self as u8).serialize_into(writer)
    }

    fn deserialize_from<R: Read>(reader: R) -> Result<Self> {
        match u8::deserialize_from(reader)? {
            0 => Ok(false),
            1 => Ok(true),
            x => Err(anyhow!("invalid serialized bool {x}")),
        }
    }

    fn size_in_bytes(&self) -> usize {
        std::mem::size_of::<u8>()
    }

    fn size_of() -> Option<usize> {
        Some(std::mem::size_of::<u8>())
    }
}
