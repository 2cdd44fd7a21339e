//! Chunk offset table rewriting
//!
//! `stco` and `co64` boxes share one payload layout:
//!
//! ```text
//! u32 version/flags | u32 entry_count | entry_count x (u32 | u64) offset
//! ```
//!
//! Each offset is an absolute position in the file, so every entry has to
//! move by the same amount as the media data it points to. The table can be
//! read from the source stream or from a payload already held in memory;
//! both go through [`OffsetSource`] so the rewrite itself is written once.

use crate::core::codec::{self, write_u32, write_u64};
use crate::core::error::{BoxError, BoxResult};
use byteorder::{BigEndian, ByteOrder};
use log::trace;
use std::io::{self, Read, Write};

/// Width of a single chunk offset entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryWidth {
    /// 4-byte entries (`stco`)
    U32,
    /// 8-byte entries (`co64`)
    U64,
}

impl EntryWidth {
    pub fn bytes(self) -> u64 {
        match self {
            EntryWidth::U32 => 4,
            EntryWidth::U64 => 8,
        }
    }
}

/// A readable source of big-endian integers, consumed front to back
pub trait OffsetSource {
    fn read_u32(&mut self) -> BoxResult<u32>;

    fn read_u64(&mut self) -> BoxResult<u64>;

    /// Copy the next `len` bytes to `writer` unchanged
    fn copy_rest<W: Write>(&mut self, writer: &mut W, len: u64) -> BoxResult<()>;
}

/// Offset source reading from a stream positioned at the payload
pub struct StreamSource<'a, R: Read> {
    reader: &'a mut R,
}

impl<'a, R: Read> StreamSource<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        Self { reader }
    }
}

impl<R: Read> OffsetSource for StreamSource<'_, R> {
    fn read_u32(&mut self) -> BoxResult<u32> {
        codec::read_u32(self.reader)
    }

    fn read_u64(&mut self) -> BoxResult<u64> {
        codec::read_u64(self.reader)
    }

    fn copy_rest<W: Write>(&mut self, writer: &mut W, len: u64) -> BoxResult<()> {
        let copied = io::copy(&mut self.reader.by_ref().take(len), writer)?;
        if copied != len {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        Ok(())
    }
}

/// Offset source reading from an in-memory payload
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> BoxResult<[u8; N]> {
        let bytes = self
            .data
            .get(self.pos..self.pos + N)
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))?;
        self.pos += N;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

impl OffsetSource for SliceSource<'_> {
    fn read_u32(&mut self) -> BoxResult<u32> {
        Ok(BigEndian::read_u32(&self.take::<4>()?))
    }

    fn read_u64(&mut self) -> BoxResult<u64> {
        Ok(BigEndian::read_u64(&self.take::<8>()?))
    }

    fn copy_rest<W: Write>(&mut self, writer: &mut W, len: u64) -> BoxResult<()> {
        let end = usize::try_from(len)
            .ok()
            .and_then(|len| self.pos.checked_add(len))
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))?;
        writer.write_all(&self.data[self.pos..end])?;
        self.pos = end;
        Ok(())
    }
}

/// Rewrite one chunk offset table payload of `content_size` bytes, adding
/// `delta` to every entry.
///
/// The version/flags word and entry count are copied unchanged. Bytes that
/// follow the last entry are copied through so the payload keeps its size.
/// Nothing is written if the declared table does not fit in `content_size`.
pub fn patch_offsets<S: OffsetSource, W: Write>(
    source: &mut S,
    writer: &mut W,
    width: EntryWidth,
    content_size: u64,
    delta: i64,
) -> BoxResult<()> {
    if content_size < 8 {
        return Err(BoxError::MalformedTable(format!(
            "payload of {} bytes is too small for a table header",
            content_size
        )));
    }

    let version_flags = source.read_u32()?;
    let entry_count = source.read_u32()?;

    let table_size = 8 + entry_count as u64 * width.bytes();
    if table_size > content_size {
        return Err(BoxError::MalformedTable(format!(
            "{} entries of {} bytes do not fit in a {} byte payload",
            entry_count,
            width.bytes(),
            content_size
        )));
    }
    trace!(
        "Patching {} offset entries ({:?}) by {}",
        entry_count,
        width,
        delta
    );

    write_u32(writer, version_flags)?;
    write_u32(writer, entry_count)?;
    match width {
        EntryWidth::U32 => {
            for _ in 0..entry_count {
                let entry = source.read_u32()?;
                write_u32(writer, shift_u32(entry, delta)?)?;
            }
        }
        EntryWidth::U64 => {
            for _ in 0..entry_count {
                let entry = source.read_u64()?;
                write_u64(writer, shift_u64(entry, delta)?)?;
            }
        }
    }

    source.copy_rest(writer, content_size - table_size)
}

fn shift_u32(entry: u32, delta: i64) -> BoxResult<u32> {
    (entry as i64)
        .checked_add(delta)
        .and_then(|shifted| u32::try_from(shifted).ok())
        .ok_or(BoxError::OffsetOverflow {
            entry: entry as u64,
            delta,
        })
}

fn shift_u64(entry: u64, delta: i64) -> BoxResult<u64> {
    entry
        .checked_add_signed(delta)
        .ok_or(BoxError::OffsetOverflow { entry, delta })
}
