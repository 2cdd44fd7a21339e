//! Big-endian integer primitives
//!
//! Every multi-byte integer in a box is stored in network byte order. These
//! helpers read or write exactly one fixed-width unit at the stream's current
//! position; a short read or write surfaces as [`BoxError::IoError`].
//!
//! [`BoxError::IoError`]: crate::core::error::BoxError::IoError

use crate::bmff::FourCC;
use crate::core::error::BoxResult;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

pub fn read_u8<R: Read>(reader: &mut R) -> BoxResult<u8> {
    Ok(reader.read_u8()?)
}

pub fn read_u32<R: Read>(reader: &mut R) -> BoxResult<u32> {
    Ok(reader.read_u32::<BigEndian>()?)
}

pub fn read_u64<R: Read>(reader: &mut R) -> BoxResult<u64> {
    Ok(reader.read_u64::<BigEndian>()?)
}

/// Read a raw 4-byte box type
pub fn read_fourcc<R: Read>(reader: &mut R) -> BoxResult<FourCC> {
    let mut name = [0u8; 4];
    reader.read_exact(&mut name)?;
    Ok(FourCC(name))
}

pub fn write_u8<W: Write>(writer: &mut W, value: u8) -> BoxResult<()> {
    Ok(writer.write_u8(value)?)
}

pub fn write_u32<W: Write>(writer: &mut W, value: u32) -> BoxResult<()> {
    Ok(writer.write_u32::<BigEndian>(value)?)
}

pub fn write_u64<W: Write>(writer: &mut W, value: u64) -> BoxResult<()> {
    Ok(writer.write_u64::<BigEndian>(value)?)
}

/// Write a raw 4-byte box type
pub fn write_fourcc<W: Write>(writer: &mut W, name: &FourCC) -> BoxResult<()> {
    Ok(writer.write_all(&name.0)?)
}
